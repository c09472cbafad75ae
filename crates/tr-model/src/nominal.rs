//! Nominal (named) types: the unit the Unifier canonicalizes and the
//! Ancestor Closure computes ancestor sets over.

use std::sync::OnceLock;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tr_common::Atom;

use crate::members::{AssociatedType, EnumCase, GenericRequirement, Method, Subscript, Variable};
use crate::slot::ResolvedSlot;
use crate::type_name::TypeName;

/// Fields common to every nominal type kind.
#[derive(Debug, Clone)]
pub struct TypeHeader {
    pub global_name: Atom,
    pub module: Atom,
    pub imports: Vec<Atom>,
    pub variables: Vec<Variable>,
    pub methods: Vec<Method>,
    pub subscripts: Vec<Subscript>,
    /// Raw, pre-resolution inherited-type text, in declaration order
    /// (order matters: the *first* entry decides `Class.supertype`,
    /// invariant 5). Most declarations name zero or one supertype plus
    /// maybe a protocol or two, so this stays inline rather than
    /// heap-allocating for the common case.
    pub inherited_types: SmallVec<[String; 2]>,
    /// Base-name keys still to resolve (§4.E step 3); populated from
    /// `inherited_types` once those names are known to exist.
    pub based: FxHashSet<Atom>,
    /// Transitive closure of `based` plus each base's own `based_types`.
    pub based_types: FxHashSet<Atom>,
    /// Subset of `based_types` classified as classes.
    pub inherits: FxHashSet<Atom>,
    /// Subset of `based_types` classified as protocols/compositions.
    pub implements: FxHashSet<Atom>,
    pub containing_type: Option<Atom>,
    pub nested_types: Vec<Atom>,
}

impl TypeHeader {
    #[must_use]
    pub fn new(global_name: Atom, module: Atom) -> Self {
        Self {
            global_name,
            module,
            imports: Vec::new(),
            variables: Vec::new(),
            methods: Vec::new(),
            subscripts: Vec::new(),
            inherited_types: SmallVec::new(),
            based: FxHashSet::default(),
            based_types: FxHashSet::default(),
            inherits: FxHashSet::default(),
            implements: FxHashSet::default(),
            containing_type: None,
            nested_types: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassType {
    pub header: TypeHeader,
    /// Set iff the first `inherited_types` entry resolves to another
    /// `Class` (invariant 5).
    pub supertype: Option<Atom>,
}

#[derive(Debug, Clone)]
pub struct StructType {
    pub header: TypeHeader,
}

/// The raw-type fields are both decided entirely by the Member
/// Resolver (§4.D), which overwrites whatever the parser may have
/// guessed — exactly one write happens per resolution pass, so they're
/// write-once slots like every other resolved field, letting Member
/// Resolution run against a shared `&EnumType` rather than `&mut`.
#[derive(Debug)]
pub struct EnumType {
    pub header: TypeHeader,
    pub cases: Vec<EnumCase>,
    /// Declared raw-type text (`enum E: Int`), kept even when the raw
    /// type turns out to be a protocol (invariant 4).
    raw_type_name: OnceLock<Option<TypeName>>,
    /// Resolved raw type, `None` unless it points at a concrete
    /// non-protocol type (invariant 4).
    raw_type: ResolvedSlot,
}

impl EnumType {
    #[must_use]
    pub fn new(header: TypeHeader, cases: Vec<EnumCase>) -> Self {
        Self {
            header,
            cases,
            raw_type_name: OnceLock::new(),
            raw_type: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn raw_type_name(&self) -> Option<&TypeName> {
        self.raw_type_name.get().and_then(|slot| slot.as_ref())
    }

    pub fn set_raw_type_name(&self, value: Option<TypeName>) {
        let _ = self.raw_type_name.set(value);
    }

    #[must_use]
    pub fn raw_type(&self) -> Option<Atom> {
        self.raw_type.resolved()
    }

    pub fn set_raw_type(&self, value: Option<Atom>) {
        self.raw_type.set(value);
    }
}

impl Clone for EnumType {
    fn clone(&self) -> Self {
        let cached = self.raw_type_name.get().cloned();
        let slot = OnceLock::new();
        if let Some(value) = cached {
            let _ = slot.set(value);
        }
        Self {
            header: self.header.clone(),
            cases: self.cases.clone(),
            raw_type_name: slot,
            raw_type: self.raw_type.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProtocolType {
    pub header: TypeHeader,
    pub associated_types: Vec<AssociatedType>,
    pub generic_requirements: Vec<GenericRequirement>,
}

/// `composed_types` is written once, as a whole batch, by the Member
/// Resolver — same write-once-slot reasoning as `EnumType`'s raw type.
#[derive(Debug)]
pub struct ProtocolCompositionType {
    pub header: TypeHeader,
    pub composed_type_names: Vec<TypeName>,
    composed_types: OnceLock<Vec<Atom>>,
}

impl ProtocolCompositionType {
    #[must_use]
    pub fn new(header: TypeHeader, composed_type_names: Vec<TypeName>) -> Self {
        Self {
            header,
            composed_type_names,
            composed_types: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn composed_types(&self) -> &[Atom] {
        self.composed_types.get().map_or(&[], Vec::as_slice)
    }

    pub fn set_composed_types(&self, value: Vec<Atom>) {
        let _ = self.composed_types.set(value);
    }
}

impl Clone for ProtocolCompositionType {
    fn clone(&self) -> Self {
        let slot = OnceLock::new();
        if let Some(value) = self.composed_types.get() {
            let _ = slot.set(value.clone());
        }
        Self {
            header: self.header.clone(),
            composed_type_names: self.composed_type_names.clone(),
            composed_types: slot,
        }
    }
}

/// A declared named type. Reimplemented as a tagged variant rather
/// than the source's subclass-plus-downcast style (§9 Design Notes).
#[derive(Debug, Clone)]
pub enum Type {
    Class(ClassType),
    Struct(StructType),
    Enum(EnumType),
    Protocol(ProtocolType),
    ProtocolComposition(ProtocolCompositionType),
}

impl Type {
    #[must_use]
    pub fn header(&self) -> &TypeHeader {
        match self {
            Type::Class(t) => &t.header,
            Type::Struct(t) => &t.header,
            Type::Enum(t) => &t.header,
            Type::Protocol(t) => &t.header,
            Type::ProtocolComposition(t) => &t.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut TypeHeader {
        match self {
            Type::Class(t) => &mut t.header,
            Type::Struct(t) => &mut t.header,
            Type::Enum(t) => &mut t.header,
            Type::Protocol(t) => &mut t.header,
            Type::ProtocolComposition(t) => &mut t.header,
        }
    }

    #[must_use]
    pub fn global_name(&self) -> &Atom {
        &self.header().global_name
    }

    #[must_use]
    pub fn is_class(&self) -> bool {
        matches!(self, Type::Class(_))
    }

    #[must_use]
    pub fn is_protocol_like(&self) -> bool {
        matches!(self, Type::Protocol(_) | Type::ProtocolComposition(_))
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Class(_) => "class",
            Type::Struct(_) => "struct",
            Type::Enum(_) => "enum",
            Type::Protocol(_) => "protocol",
            Type::ProtocolComposition(_) => "protocol composition",
        }
    }
}

/// `(name, parent type or nil, typeName, resolved type)`. Two working
/// sets exist at the `State` level: unresolved (fresh from the parser)
/// and resolved (flattened chain target per alias), per §3.1.
#[derive(Debug, Clone)]
pub struct Typealias {
    pub name: Atom,
    pub parent: Option<Atom>,
    pub module: Atom,
    pub type_name: TypeName,
    resolved: crate::slot::ResolvedSlot,
}

impl Typealias {
    #[must_use]
    pub fn new(name: Atom, module: Atom, type_name: TypeName) -> Self {
        Self {
            name,
            parent: None,
            module,
            type_name,
            resolved: crate::slot::ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_type(&self) -> Option<Atom> {
        self.resolved.resolved()
    }

    pub fn set_resolved_type(&self, value: Option<Atom>) {
        self.resolved.set(value);
    }
}
