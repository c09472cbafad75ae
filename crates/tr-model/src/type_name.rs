//! `TypeName` — a rewritable textual description of a type reference,
//! and the compound type-expression nodes it can carry.

use std::fmt;
use std::sync::OnceLock;

use crate::slot::ResolvedSlot;

/// A textual type reference as written by the user, plus the mutable
/// `actual_type_name` cache the Type-Expression Rewriter fills in.
#[derive(Debug)]
pub struct TypeName {
    /// Canonical string form as declared (e.g. `"Foo?"`, `"[Int: String]"`).
    pub name: String,
    pub is_optional: bool,
    pub is_implicitly_unwrapped_optional: bool,
    pub is_protocol_composition: bool,
    pub tuple: Option<TupleType>,
    pub array: Option<ArrayType>,
    pub dictionary: Option<DictionaryType>,
    pub closure: Option<ClosureType>,
    pub generic: Option<GenericType>,
    /// Post-typealias-substitution rewritten form. Write-once per
    /// resolution pass (§3.3): `None` means "not computed yet",
    /// `Some(None)` means "computed, no substitution applies".
    actual_type_name: OnceLock<Option<Box<TypeName>>>,
}

impl TypeName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_optional: false,
            is_implicitly_unwrapped_optional: false,
            is_protocol_composition: false,
            tuple: None,
            array: None,
            dictionary: None,
            closure: None,
            generic: None,
            actual_type_name: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    #[must_use]
    pub fn with_tuple(mut self, tuple: TupleType) -> Self {
        self.tuple = Some(tuple);
        self
    }

    #[must_use]
    pub fn with_array(mut self, array: ArrayType) -> Self {
        self.array = Some(array);
        self
    }

    #[must_use]
    pub fn with_dictionary(mut self, dictionary: DictionaryType) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    #[must_use]
    pub fn with_closure(mut self, closure: ClosureType) -> Self {
        self.closure = Some(closure);
        self
    }

    #[must_use]
    pub fn with_generic(mut self, generic: GenericType) -> Self {
        self.generic = Some(generic);
        self
    }

    /// Textual form with leading/trailing optional markers removed.
    #[must_use]
    pub fn unwrapped_type_name(&self) -> &str {
        self.name
            .strip_suffix('?')
            .or_else(|| self.name.strip_suffix('!'))
            .unwrap_or(&self.name)
    }

    /// `true` if this reference has a compound substructure (tuple,
    /// array, dictionary, closure or generic) rather than being a
    /// plain identifier.
    #[must_use]
    pub fn is_compound(&self) -> bool {
        self.tuple.is_some()
            || self.array.is_some()
            || self.dictionary.is_some()
            || self.closure.is_some()
            || self.generic.is_some()
    }

    /// Whether the Rewriter has already computed (possibly to
    /// "no substitution") an `actual_type_name` for this instance.
    #[must_use]
    pub fn is_rewrite_cached(&self) -> bool {
        self.actual_type_name.get().is_some()
    }

    #[must_use]
    pub fn actual_type_name(&self) -> Option<&TypeName> {
        self.actual_type_name.get().and_then(|slot| slot.as_deref())
    }

    /// Write the rewritten form exactly once. Later writes (e.g. a
    /// second resolution pass racing with itself) are silently ignored
    /// rather than panicking — the monotonic-write invariant is about
    /// never *un-writing* a value, not about rejecting redundant ones.
    pub fn set_actual_type_name(&self, value: Option<TypeName>) {
        let _ = self.actual_type_name.set(value.map(Box::new));
    }

    /// The name to key a `typeMap` lookup by: the generic head name if
    /// this is a generic instantiation, otherwise the unwrapped name.
    #[must_use]
    pub fn lookup_key(&self) -> &str {
        self.generic
            .as_ref()
            .map(|g| g.name.as_str())
            .unwrap_or_else(|| self.unwrapped_type_name())
    }
}

/// Renders `name`, the canonical textual form already carried by every
/// `TypeName` (tuple/array/dictionary/closure/generic syntax included).
/// A pure projection of data already in the model — it reads
/// `actual_type_name` not at all, so it never forces a resolution pass.
impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Clone for TypeName {
    fn clone(&self) -> Self {
        let cached = self.actual_type_name.get().cloned();
        let slot = OnceLock::new();
        if let Some(value) = cached {
            let _ = slot.set(value);
        }
        Self {
            name: self.name.clone(),
            is_optional: self.is_optional,
            is_implicitly_unwrapped_optional: self.is_implicitly_unwrapped_optional,
            is_protocol_composition: self.is_protocol_composition,
            tuple: self.tuple.clone(),
            array: self.array.clone(),
            dictionary: self.dictionary.clone(),
            closure: self.closure.clone(),
            generic: self.generic.clone(),
            actual_type_name: slot,
        }
    }
}

/// One element of a tuple type expression, e.g. `label: Int` in
/// `(label: Int, String)`.
#[derive(Debug, Clone)]
pub struct TupleElement {
    pub label: Option<String>,
    pub type_name: TypeName,
}

#[derive(Debug, Clone, Default)]
pub struct TupleType {
    pub elements: Vec<TupleElement>,
    resolved: ResolvedSlot,
}

impl TupleType {
    #[must_use]
    pub fn new(elements: Vec<TupleElement>) -> Self {
        Self {
            elements,
            resolved: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_slot(&self) -> &ResolvedSlot {
        &self.resolved
    }
}

#[derive(Debug, Clone)]
pub struct ArrayType {
    pub element_type_name: Box<TypeName>,
    resolved: ResolvedSlot,
}

impl ArrayType {
    #[must_use]
    pub fn new(element_type_name: TypeName) -> Self {
        Self {
            element_type_name: Box::new(element_type_name),
            resolved: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_slot(&self) -> &ResolvedSlot {
        &self.resolved
    }
}

#[derive(Debug, Clone)]
pub struct DictionaryType {
    pub key_type_name: Box<TypeName>,
    pub value_type_name: Box<TypeName>,
    resolved: ResolvedSlot,
}

impl DictionaryType {
    #[must_use]
    pub fn new(key_type_name: TypeName, value_type_name: TypeName) -> Self {
        Self {
            key_type_name: Box::new(key_type_name),
            value_type_name: Box::new(value_type_name),
            resolved: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_slot(&self) -> &ResolvedSlot {
        &self.resolved
    }
}

#[derive(Debug, Clone)]
pub struct ClosureParameter {
    pub label: Option<String>,
    pub type_name: TypeName,
}

#[derive(Debug, Clone, Default)]
pub struct ClosureType {
    pub parameters: Vec<ClosureParameter>,
    pub return_type_name: Option<Box<TypeName>>,
    resolved: ResolvedSlot,
}

impl ClosureType {
    #[must_use]
    pub fn new(parameters: Vec<ClosureParameter>, return_type_name: TypeName) -> Self {
        Self {
            parameters,
            return_type_name: Some(Box::new(return_type_name)),
            resolved: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_slot(&self) -> &ResolvedSlot {
        &self.resolved
    }
}

/// A generic instantiation, e.g. `Array<Element>` or `Dictionary<K, V>`.
#[derive(Debug, Clone, Default)]
pub struct GenericType {
    pub name: String,
    pub type_parameters: Vec<TypeName>,
    resolved: ResolvedSlot,
}

impl GenericType {
    #[must_use]
    pub fn new(name: impl Into<String>, type_parameters: Vec<TypeName>) -> Self {
        Self {
            name: name.into(),
            type_parameters,
            resolved: ResolvedSlot::new(),
        }
    }

    #[must_use]
    pub fn resolved_slot(&self) -> &ResolvedSlot {
        &self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_trailing_optional_marker() {
        let tn = TypeName::new("Foo?");
        assert_eq!(tn.unwrapped_type_name(), "Foo");
    }

    #[test]
    fn actual_type_name_is_write_once() {
        let tn = TypeName::new("Foo");
        assert!(!tn.is_rewrite_cached());
        tn.set_actual_type_name(Some(TypeName::new("Bar")));
        tn.set_actual_type_name(Some(TypeName::new("Baz")));
        assert_eq!(tn.actual_type_name().unwrap().name, "Bar");
    }

    #[test]
    fn clone_preserves_cached_rewrite() {
        let tn = TypeName::new("Foo");
        tn.set_actual_type_name(Some(TypeName::new("Bar")));
        let cloned = tn.clone();
        assert_eq!(cloned.actual_type_name().unwrap().name, "Bar");
    }

    #[test]
    fn display_renders_the_canonical_textual_form() {
        let tn = TypeName::new("[Int: String]").with_dictionary(DictionaryType::new(
            TypeName::new("Int"),
            TypeName::new("String"),
        ));
        assert_eq!(tn.to_string(), "[Int: String]");
    }

    #[test]
    fn generic_lookup_key_uses_head_name() {
        let tn = TypeName::new("[String]").with_generic(GenericType::new(
            "Array",
            vec![TypeName::new("String")],
        ));
        assert_eq!(tn.lookup_key(), "Array");
    }
}
