//! The Unifier's input: a raw, possibly-duplicated bag of declarations
//! as produced by the (external, out-of-scope) parser.

use smallvec::SmallVec;

use crate::members::{AssociatedType, EnumCase, GenericRequirement, Method, Subscript, Variable};
use crate::type_name::TypeName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Struct,
    Enum,
    Protocol,
    ProtocolComposition,
    /// An `extension Foo { ... }` block. Carries no new kind
    /// information of its own; the Unifier folds its members into
    /// whatever declaration owns `global_name` (§4.A rule 1).
    Extension,
}

/// One raw declaration or extension site, exactly as the parser
/// handed it over: unmerged, with textual (unresolved) type names.
#[derive(Debug, Clone)]
pub struct RawTypeDeclaration {
    pub kind: DeclKind,
    pub global_name: String,
    pub module: String,
    pub imports: Vec<String>,
    pub variables: Vec<Variable>,
    pub methods: Vec<Method>,
    pub subscripts: Vec<Subscript>,
    pub inherited_types: SmallVec<[String; 2]>,
    pub cases: Vec<EnumCase>,
    pub associated_types: Vec<AssociatedType>,
    pub generic_requirements: Vec<GenericRequirement>,
    pub composed_type_names: Vec<TypeName>,
    pub containing_type: Option<String>,
}

impl RawTypeDeclaration {
    #[must_use]
    pub fn new(kind: DeclKind, global_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            kind,
            global_name: global_name.into(),
            module: module.into(),
            imports: Vec::new(),
            variables: Vec::new(),
            methods: Vec::new(),
            subscripts: Vec::new(),
            inherited_types: SmallVec::new(),
            cases: Vec::new(),
            associated_types: Vec::new(),
            generic_requirements: Vec::new(),
            composed_type_names: Vec::new(),
            containing_type: None,
        }
    }

    #[must_use]
    pub fn extension(global_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self::new(DeclKind::Extension, global_name, module)
    }
}

#[derive(Debug, Clone)]
pub struct RawTypealias {
    pub name: String,
    pub parent: Option<String>,
    pub module: String,
    pub type_name: TypeName,
}

impl RawTypealias {
    #[must_use]
    pub fn new(name: impl Into<String>, module: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            name: name.into(),
            parent: None,
            module: module.into(),
            type_name,
        }
    }
}

/// The core's sole input: everything one parser run produced, tagged
/// with declaring module and imports (§6).
#[derive(Debug, Clone, Default)]
pub struct ParserResult {
    pub types: Vec<RawTypeDeclaration>,
    pub functions: Vec<Method>,
    pub typealiases: Vec<RawTypealias>,
}
