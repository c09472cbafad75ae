//! Member records: variables, methods, subscripts, enum cases and the
//! protocol-level associated-type / generic-requirement declarations.

use crate::slot::ResolvedSlot;
use crate::type_name::TypeName;
use tr_common::Atom;

#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub type_name: TypeName,
    /// Present when the declaration lives inside a generic extension,
    /// e.g. `extension Array where Element: Foo`. Resolving it is a
    /// typealias-rewrite side effect only; the result is discarded
    /// (§4.D).
    pub defined_in_type_name: Option<TypeName>,
    pub is_static: bool,
    pub writable: bool,
    /// `true` for a `var x: T { get { ... } }`-style computed property.
    /// Only a *stored* property can ever win the enum raw-type
    /// precedence check (spec.md line 113, invariant 4).
    pub is_computed: bool,
    resolved_type: ResolvedSlot,
}

impl Variable {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            name: name.into(),
            type_name,
            defined_in_type_name: None,
            is_static: false,
            writable: false,
            is_computed: false,
            resolved_type: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn is_stored(&self) -> bool {
        !self.is_computed
    }

    #[must_use]
    pub fn resolved_type(&self) -> Option<Atom> {
        self.resolved_type.resolved()
    }

    pub fn set_resolved_type(&self, value: Option<Atom>) {
        self.resolved_type.set(value);
    }
}

#[derive(Debug, Clone)]
pub struct MethodParameter {
    pub name: String,
    pub type_name: TypeName,
    resolved_type: ResolvedSlot,
}

impl MethodParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            name: name.into(),
            type_name,
            resolved_type: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_type(&self) -> Option<Atom> {
        self.resolved_type.resolved()
    }

    pub fn set_resolved_type(&self, value: Option<Atom>) {
        self.resolved_type.set(value);
    }
}

/// A return type that is explicitly `Void`/absent is represented as
/// `ReturnType::Void`; the Member Resolver skips resolving it (§4.D).
/// `Inferred` covers initializers, whose return type is synthesized
/// from the defining type rather than read from a `TypeName`.
#[derive(Debug, Clone)]
pub enum ReturnType {
    Void,
    Explicit(TypeName),
    Inferred,
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub parameters: Vec<MethodParameter>,
    pub return_type: ReturnType,
    pub defined_in_type_name: Option<TypeName>,
    pub is_static: bool,
    pub is_initializer: bool,
    pub is_failable_initializer: bool,
    /// Declaring module and imports, used only for free functions
    /// (§6 "each tagged with its declaring module and imports") — a
    /// method reached through `resolve_members` gets its scope from
    /// the owning type instead and leaves these empty.
    pub module: Atom,
    pub imports: Vec<Atom>,
    resolved_return_type: ResolvedSlot,
}

impl Method {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: ReturnType::Void,
            defined_in_type_name: None,
            is_static: false,
            is_initializer: false,
            is_failable_initializer: false,
            module: Atom::from(""),
            imports: Vec::new(),
            resolved_return_type: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_return_type(&self) -> Option<Atom> {
        self.resolved_return_type.resolved()
    }

    pub fn set_resolved_return_type(&self, value: Option<Atom>) {
        self.resolved_return_type.set(value);
    }
}

#[derive(Debug, Clone)]
pub struct Subscript {
    pub parameters: Vec<MethodParameter>,
    pub return_type_name: TypeName,
    pub defined_in_type_name: Option<TypeName>,
    resolved_return_type: ResolvedSlot,
}

impl Subscript {
    #[must_use]
    pub fn new(return_type_name: TypeName) -> Self {
        Self {
            parameters: Vec::new(),
            return_type_name,
            defined_in_type_name: None,
            resolved_return_type: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_return_type(&self) -> Option<Atom> {
        self.resolved_return_type.resolved()
    }

    pub fn set_resolved_return_type(&self, value: Option<Atom>) {
        self.resolved_return_type.set(value);
    }
}

#[derive(Debug, Clone)]
pub struct AssociatedValue {
    pub label: Option<String>,
    pub type_name: TypeName,
    resolved_type: ResolvedSlot,
}

impl AssociatedValue {
    #[must_use]
    pub fn new(type_name: TypeName) -> Self {
        Self {
            label: None,
            type_name,
            resolved_type: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_type(&self) -> Option<Atom> {
        self.resolved_type.resolved()
    }

    pub fn set_resolved_type(&self, value: Option<Atom>) {
        self.resolved_type.set(value);
    }
}

#[derive(Debug, Clone)]
pub struct EnumCase {
    pub name: String,
    pub associated_values: Vec<AssociatedValue>,
    pub raw_value: Option<String>,
}

impl EnumCase {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            associated_values: Vec::new(),
            raw_value: None,
        }
    }

    #[must_use]
    pub fn has_associated_values(&self) -> bool {
        !self.associated_values.is_empty()
    }
}

/// A protocol's `associatedtype` declaration, optionally constrained.
#[derive(Debug, Clone)]
pub struct AssociatedType {
    pub name: String,
    pub constraint_type_name: Option<TypeName>,
    resolved_constraint: ResolvedSlot,
}

impl AssociatedType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint_type_name: None,
            resolved_constraint: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_constraint(&self) -> Option<Atom> {
        self.resolved_constraint.resolved()
    }

    pub fn set_resolved_constraint(&self, value: Option<Atom>) {
        self.resolved_constraint.set(value);
    }
}

/// A `where Left: Right` generic requirement on a protocol.
#[derive(Debug, Clone)]
pub struct GenericRequirement {
    /// Textual left-hand side. The Member Resolver may rewrite this
    /// in place to the name of a matching associated type (§4.D).
    pub left_type_name: String,
    pub right_type_name: TypeName,
    resolved_right_type: ResolvedSlot,
}

impl GenericRequirement {
    #[must_use]
    pub fn new(left_type_name: impl Into<String>, right_type_name: TypeName) -> Self {
        Self {
            left_type_name: left_type_name.into(),
            right_type_name,
            resolved_right_type: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_right_type(&self) -> Option<Atom> {
        self.resolved_right_type.resolved()
    }

    pub fn set_resolved_right_type(&self, value: Option<Atom>) {
        self.resolved_right_type.set(value);
    }
}
