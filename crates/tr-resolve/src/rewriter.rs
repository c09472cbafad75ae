//! The Type-Expression Rewriter (§4.C): recursively walks a compound
//! type expression, resolves every leaf, and materializes the
//! rewritten "actual" form.
//!
//! Each compound kind produces a *copy* with resolved leaves rather
//! than mutating children in place (§4.C rationale): the original
//! textual names stay available for diagnostic output while the
//! canonical form lives in `actual_type_name`.

use tr_common::Atom;
use tr_model::{
    ArrayType, ClosureParameter, ClosureType, DictionaryType, GenericType, TupleElement,
    TupleType, TypeName,
};

use crate::context::NameContext;
use crate::name_resolver::resolve_global_name;

/// `resolveType(typeName:containingType:) -> Type?`, returning the
/// resolved nominal type's global name (or `None` if unresolved /
/// structurally non-nominal). See `tr_model`'s module doc for why this
/// is an `Atom` key rather than a direct reference.
pub fn resolve_type(
    ctx: &NameContext,
    type_name: &TypeName,
    containing_type: Option<&Atom>,
    modules_in_scope: &[Atom],
) -> Option<Atom> {
    if type_name.is_rewrite_cached() {
        let effective = type_name.actual_type_name().unwrap_or(type_name);
        return final_lookup(ctx, effective);
    }

    let retrieved = actual_type_name_via_resolver(ctx, type_name, containing_type, modules_in_scope);
    let lookup_name: &TypeName = retrieved.as_ref().unwrap_or(type_name);
    let retrieved_present = retrieved.is_some();

    if let Some(tuple) = &lookup_name.tuple {
        let (changed, elements) = rewrite_tuple(ctx, tuple, containing_type, modules_in_scope);
        set_actual_if_changed(type_name, changed || retrieved_present, || {
            let mut rewritten = TypeName::new(render_tuple(&elements));
            rewritten.is_optional = type_name.is_optional;
            rewritten.is_implicitly_unwrapped_optional = type_name.is_implicitly_unwrapped_optional;
            rewritten.with_tuple(TupleType::new(elements))
        });
        return None; // tuples are never nominal
    }

    if let Some(array) = &lookup_name.array {
        let (changed, element) = rewrite_element(ctx, &array.element_type_name, containing_type, modules_in_scope);
        set_actual_if_changed(type_name, changed || retrieved_present, || {
            let mut rewritten = TypeName::new(format!("[{}]", element.name));
            rewritten.is_optional = type_name.is_optional;
            rewritten.is_implicitly_unwrapped_optional = type_name.is_implicitly_unwrapped_optional;
            rewritten
                .with_array(ArrayType::new(element.clone()))
                .with_generic(GenericType::new("Array", vec![element]))
        });
        return final_lookup(ctx, type_name.actual_type_name().unwrap_or(type_name));
    }

    if let Some(dictionary) = &lookup_name.dictionary {
        let (key_changed, key) = rewrite_element(ctx, &dictionary.key_type_name, containing_type, modules_in_scope);
        let (value_changed, value) =
            rewrite_element(ctx, &dictionary.value_type_name, containing_type, modules_in_scope);
        set_actual_if_changed(type_name, key_changed || value_changed || retrieved_present, || {
            let mut rewritten = TypeName::new(format!("[{}: {}]", key.name, value.name));
            rewritten.is_optional = type_name.is_optional;
            rewritten.is_implicitly_unwrapped_optional = type_name.is_implicitly_unwrapped_optional;
            rewritten
                .with_dictionary(DictionaryType::new(key.clone(), value.clone()))
                .with_generic(GenericType::new("Dictionary", vec![key, value]))
        });
        return final_lookup(ctx, type_name.actual_type_name().unwrap_or(type_name));
    }

    if let Some(closure) = &lookup_name.closure {
        let mut changed = retrieved_present;
        let mut params = Vec::with_capacity(closure.parameters.len());
        for p in &closure.parameters {
            let (p_changed, p_type) = rewrite_element(ctx, &p.type_name, containing_type, modules_in_scope);
            changed |= p_changed;
            params.push(ClosureParameter {
                label: p.label.clone(),
                type_name: p_type,
            });
        }
        let return_type = match &closure.return_type_name {
            Some(rt) => {
                let (rt_changed, rt_resolved) = rewrite_element(ctx, rt, containing_type, modules_in_scope);
                changed |= rt_changed;
                rt_resolved
            }
            None => TypeName::new("Void"),
        };
        set_actual_if_changed(type_name, changed, || {
            let mut rewritten = TypeName::new(render_closure(&params, &return_type));
            rewritten.is_optional = type_name.is_optional;
            rewritten.is_implicitly_unwrapped_optional = type_name.is_implicitly_unwrapped_optional;
            rewritten.with_closure(ClosureType::new(params, return_type))
        });
        return None; // closures are never nominal
    }

    if let Some(generic) = &lookup_name.generic {
        let mut changed = retrieved_present;
        let mut params = Vec::with_capacity(generic.type_parameters.len());
        for p in &generic.type_parameters {
            let (p_changed, p_type) = rewrite_element(ctx, p, containing_type, modules_in_scope);
            changed |= p_changed;
            params.push(p_type);
        }
        let head_name = generic.name.clone();
        set_actual_if_changed(type_name, changed, || {
            let mut rewritten = TypeName::new(render_generic(&head_name, &params));
            rewritten.is_optional = type_name.is_optional;
            rewritten.is_implicitly_unwrapped_optional = type_name.is_implicitly_unwrapped_optional;
            rewritten.with_generic(GenericType::new(head_name.clone(), params))
        });
        return final_lookup(ctx, type_name.actual_type_name().unwrap_or(type_name));
    }

    // Plain identifier, no compound substructure.
    if let Some(adopted) = retrieved {
        type_name.set_actual_type_name(Some(adopted.clone()));
        return final_lookup(ctx, type_name.actual_type_name().unwrap_or(type_name));
    }
    type_name.set_actual_type_name(None);
    final_lookup(ctx, type_name)
}

/// Resolve `tn` (writing its `actual_type_name` slot as a side
/// effect) and hand back `(did-it-change, substituted-copy-to-embed)`.
fn rewrite_element(
    ctx: &NameContext,
    tn: &TypeName,
    containing_type: Option<&Atom>,
    modules_in_scope: &[Atom],
) -> (bool, TypeName) {
    let _ = resolve_type(ctx, tn, containing_type, modules_in_scope);
    match tn.actual_type_name() {
        Some(actual) => (true, actual.clone()),
        None => (false, tn.clone()),
    }
}

fn rewrite_tuple(
    ctx: &NameContext,
    tuple: &TupleType,
    containing_type: Option<&Atom>,
    modules_in_scope: &[Atom],
) -> (bool, Vec<TupleElement>) {
    let mut changed = false;
    let mut elements = Vec::with_capacity(tuple.elements.len());
    for element in &tuple.elements {
        let (el_changed, substituted) =
            rewrite_element(ctx, &element.type_name, containing_type, modules_in_scope);
        changed |= el_changed;
        elements.push(TupleElement {
            label: element.label.clone(),
            type_name: substituted,
        });
    }
    (changed, elements)
}

fn set_actual_if_changed(type_name: &TypeName, changed: bool, build: impl FnOnce() -> TypeName) {
    if changed {
        type_name.set_actual_type_name(Some(build()));
    } else {
        type_name.set_actual_type_name(None);
    }
}

fn final_lookup(ctx: &NameContext, effective: &TypeName) -> Option<Atom> {
    ctx.type_map
        .get_key_value(effective.lookup_key())
        .map(|(key, _)| key.clone())
}

/// `actualTypeName(typeName:containingType:)`: the Name Resolver call
/// that either adopts a crossed typealias's own compound substructure,
/// or (if the lookup just landed on a differently-spelled, but plain,
/// fully-qualified name) returns a bare renamed `TypeName`, or `None`
/// if nothing about the identity changed.
fn actual_type_name_via_resolver(
    ctx: &NameContext,
    type_name: &TypeName,
    containing_type: Option<&Atom>,
    modules_in_scope: &[Atom],
) -> Option<TypeName> {
    let resolution = resolve_global_name(
        ctx,
        type_name.unwrapped_type_name(),
        containing_type,
        modules_in_scope,
    )?;

    if let Some(alias_name) = &resolution.typealias {
        if let Some(alias) = ctx.typealiases.get(alias_name) {
            let mut adopted = alias.type_name.clone();
            adopted.is_optional = type_name.is_optional;
            adopted.is_implicitly_unwrapped_optional = type_name.is_implicitly_unwrapped_optional;
            return Some(adopted);
        }
    }

    if resolution.name.as_str() == type_name.unwrapped_type_name() {
        None
    } else {
        Some(TypeName::new(resolution.name.as_str()))
    }
}

fn render_tuple(elements: &[TupleElement]) -> String {
    let parts: Vec<String> = elements
        .iter()
        .map(|e| match &e.label {
            Some(label) => format!("{label}: {}", e.type_name.name),
            None => e.type_name.name.clone(),
        })
        .collect();
    format!("({})", parts.join(", "))
}

fn render_closure(params: &[ClosureParameter], return_type: &TypeName) -> String {
    let parts: Vec<String> = params.iter().map(|p| p.type_name.name.clone()).collect();
    format!("({}) -> {}", parts.join(", "), return_type.name)
}

fn render_generic(name: &str, params: &[TypeName]) -> String {
    let parts: Vec<String> = params.iter().map(|p| p.name.clone()).collect();
    format!("{name}<{}>", parts.join(", "))
}
