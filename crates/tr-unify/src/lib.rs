//! The Unifier (§4.A): merges a possibly-duplicated list of type
//! declarations and extensions into one canonical record per
//! `global_name`, and builds the module-qualified lookup table.
//!
//! Unification does not resolve references — it only builds the
//! name-addressable universe the later phases look names up in.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{Level, debug, span};
use tr_common::Atom;
use tr_model::{
    AssociatedType, ClassType, DeclKind, EnumCase, EnumType, GenericRequirement, Method,
    MethodParameter, ParserResult, ProtocolCompositionType, ProtocolType, RawTypeDeclaration,
    State, StructType, Subscript, Type, TypeHeader, TypeName, Variable,
};

/// Accumulates every declaration/extension seen for one `global_name`
/// before a final `Type` is materialized.
struct MergedDecl {
    kind: Option<DeclKind>,
    global_name: String,
    module: String,
    imports: Vec<String>,
    variables: Vec<Variable>,
    methods: Vec<Method>,
    subscripts: Vec<Subscript>,
    inherited_types: SmallVec<[String; 2]>,
    cases: Vec<EnumCase>,
    associated_types: Vec<AssociatedType>,
    generic_requirements: Vec<GenericRequirement>,
    composed_type_names: Vec<TypeName>,
    containing_type: Option<String>,
}

impl MergedDecl {
    fn empty(global_name: &str, module: &str) -> Self {
        Self {
            kind: None,
            global_name: global_name.to_string(),
            module: module.to_string(),
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

    fn merge(&mut self, decl: RawTypeDeclaration) {
        // A full body takes precedence over an extension for
        // attributes that can only appear in a definition (§4.A rule
        // 1): kind, raw-type declaration, composed protocol list.
        if decl.kind != DeclKind::Extension {
            self.kind = Some(decl.kind);
            if !decl.composed_type_names.is_empty() {
                self.composed_type_names = decl.composed_type_names;
            }
            if decl.containing_type.is_some() {
                self.containing_type = decl.containing_type;
            }
        }
        self.imports.extend(decl.imports);
        self.variables.extend(decl.variables);
        self.methods.extend(decl.methods);
        self.subscripts.extend(decl.subscripts);
        self.inherited_types.extend(decl.inherited_types);
        self.cases.extend(decl.cases);
        self.associated_types.extend(decl.associated_types);
        self.generic_requirements.extend(decl.generic_requirements);
    }

    /// Materialize the canonical `Type`. Returns `None` for a
    /// "declaration" that only ever appeared as extensions — a
    /// malformed parser result the core is not responsible for
    /// diagnosing (§7), logged and dropped rather than panicking.
    fn into_type(self) -> Option<Type> {
        let global_name = Atom::from(self.global_name.as_str());
        let module = Atom::from(self.module.as_str());
        let mut header = TypeHeader::new(global_name, module);
        header.imports = self.imports.iter().map(|s| Atom::from(s.as_str())).collect();
        header.variables = self.variables;
        header.methods = self.methods;
        header.subscripts = self.subscripts;
        header.inherited_types = self.inherited_types;

        let kind = self.kind?;
        Some(match kind {
            DeclKind::Class => Type::Class(ClassType {
                header,
                supertype: None,
            }),
            DeclKind::Struct => Type::Struct(StructType { header }),
            DeclKind::Enum => Type::Enum(EnumType::new(header, self.cases)),
            DeclKind::Protocol => Type::Protocol(ProtocolType {
                header,
                associated_types: self.associated_types,
                generic_requirements: self.generic_requirements,
            }),
            DeclKind::ProtocolComposition => {
                Type::ProtocolComposition(ProtocolCompositionType::new(header, self.composed_type_names))
            }
            DeclKind::Extension => unreachable!("extensions never set `kind`"),
        })
    }
}

/// Merge every declaration/extension in `parser_result.types` into one
/// canonical record per `global_name`, build the module index, and
/// carry `functions` through unchanged. Returns the `State` later
/// phases mutate in place.
pub fn unify(parser_result: ParserResult) -> State {
    let _span = span!(Level::DEBUG, "unify", types = parser_result.types.len()).entered();

    let mut merged: FxHashMap<String, MergedDecl> = FxHashMap::default();
    let mut order: Vec<String> = Vec::new();
    let mut containing_type_by_child: FxHashMap<String, String> = FxHashMap::default();

    for decl in parser_result.types {
        if let Some(parent) = &decl.containing_type {
            containing_type_by_child.insert(decl.global_name.clone(), parent.clone());
        }
        let global_name = decl.global_name.clone();
        let module = decl.module.clone();
        merged
            .entry(global_name.clone())
            .or_insert_with(|| {
                order.push(global_name.clone());
                MergedDecl::empty(&global_name, &module)
            })
            .merge(decl);
    }

    let mut state = State::new();
    let mut dropped = 0u32;
    for name in &order {
        let Some(decl) = merged.remove(name) else {
            continue;
        };
        match decl.into_type() {
            Some(ty) => state.insert_type(ty),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "dropped extension-only declarations with no defining body");
    }

    // Rule 2: nested types contribute their own global_name into the
    // map (already true by construction above); additionally wire up
    // parent/child bookkeeping now that every type exists.
    for (child, parent) in containing_type_by_child {
        let parent_atom = Atom::from(parent.as_str());
        let child_atom = Atom::from(child.as_str());
        if let Some(ty) = state.type_map.get_mut(&child_atom) {
            ty.header_mut().containing_type = Some(parent_atom.clone());
        }
        if let Some(parent_ty) = state.type_map.get_mut(&parent_atom) {
            parent_ty.header_mut().nested_types.push(child_atom);
        }
    }

    state.functions = parser_result.functions;
    debug!(types = state.type_map.len(), "unification complete");
    state
}
