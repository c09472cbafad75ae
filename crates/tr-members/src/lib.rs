//! The Member Resolver (§4.D): for each nominal type (and for free
//! functions), resolves every variable/method/subscript/enum-case/
//! protocol-associated-type reference via the Name Resolver + Rewriter.

use tracing::{Level, span, trace};
use tr_common::Atom;
use tr_model::{Method, ReturnType, Type, TypeName};
use tr_resolve::{NameContext, resolve_type};

/// Resolve every member of `ty` in place. Called once per type; safe
/// to run concurrently across distinct `ty` values since it only ever
/// writes into `ty`'s own fields and the `TypeName` slots they own
/// (§5: "each task writes only ... reachable from the type it owns").
pub fn resolve_members(ctx: &NameContext, ty: &Type) {
    let own_name = ty.global_name().clone();
    let header = ty.header();
    let modules_in_scope = ctx.modules_in_scope(&header.module, &header.imports);
    let containing = Some(&own_name);

    let _span = span!(Level::TRACE, "resolve_members", r#type = %own_name).entered();

    for variable in &header.variables {
        resolve_variable(ctx, variable, containing, &modules_in_scope);
    }
    for method in &header.methods {
        resolve_method(ctx, method, &own_name, containing, &modules_in_scope);
    }
    for subscript in &header.subscripts {
        resolve_subscript(ctx, subscript, containing, &modules_in_scope);
    }

    match ty {
        Type::Enum(enum_ty) => {
            for case in &enum_ty.cases {
                for value in &case.associated_values {
                    let resolved = resolve_type(ctx, &value.type_name, containing, &modules_in_scope);
                    value.set_resolved_type(resolved);
                }
            }
            resolve_enum_raw_type(ctx, enum_ty, containing, &modules_in_scope);
        }
        Type::ProtocolComposition(composition) => {
            let mut resolved = Vec::new();
            for composed in &composition.composed_type_names {
                if let Some(atom) = resolve_type(ctx, composed, containing, &modules_in_scope) {
                    resolved.push(atom);
                }
            }
            composition.set_composed_types(resolved);
        }
        Type::Protocol(protocol) => {
            for associated_type in &protocol.associated_types {
                if let Some(constraint) = &associated_type.constraint_type_name {
                    let resolved = resolve_type(ctx, constraint, containing, &modules_in_scope);
                    associated_type.set_resolved_constraint(resolved);
                }
            }
            for requirement in &protocol.generic_requirements {
                let resolved =
                    resolve_type(ctx, &requirement.right_type_name, containing, &modules_in_scope);
                requirement.set_resolved_right_type(resolved);
                // If the left-hand side already spells a known
                // associated type's name, it's already "adopted" it —
                // our left side is stored as plain text, so there's no
                // separate struct reference to rewrite here.
                if protocol
                    .associated_types
                    .iter()
                    .any(|at| at.name == requirement.left_type_name)
                {
                    trace!(left = %requirement.left_type_name, "generic requirement left side matches an associated type");
                }
            }
        }
        Type::Class(_) | Type::Struct(_) => {}
    }
}

/// Resolve one free function exactly like a method with no defining
/// type (§4.D: "resolved by the same method procedure with `of: nil`").
pub fn resolve_function(ctx: &NameContext, function: &Method, own_module: &Atom, imports: &[Atom]) {
    let modules_in_scope = ctx.modules_in_scope(own_module, imports);
    resolve_method(ctx, function, &Atom::from(""), None, &modules_in_scope);
}

fn resolve_variable(
    ctx: &NameContext,
    variable: &tr_model::Variable,
    containing: Option<&Atom>,
    modules_in_scope: &[Atom],
) {
    let resolved = resolve_type(ctx, &variable.type_name, containing, modules_in_scope);
    variable.set_resolved_type(resolved);
    if let Some(defined_in) = &variable.defined_in_type_name {
        let _ = resolve_type(ctx, defined_in, containing, modules_in_scope);
    }
}

fn resolve_method(
    ctx: &NameContext,
    method: &Method,
    defining_type: &Atom,
    containing: Option<&Atom>,
    modules_in_scope: &[Atom],
) {
    for param in &method.parameters {
        let resolved = resolve_type(ctx, &param.type_name, containing, modules_in_scope);
        param.set_resolved_type(resolved);
    }
    if let Some(defined_in) = &method.defined_in_type_name {
        let _ = resolve_type(ctx, defined_in, containing, modules_in_scope);
    }

    if method.is_initializer || method.is_failable_initializer {
        // The return type of an initializer is the defining type
        // itself; failable initializers return it wrapped optional.
        method.set_resolved_return_type(Some(defining_type.clone()));
        return;
    }

    match &method.return_type {
        ReturnType::Void => {}
        ReturnType::Inferred => {
            method.set_resolved_return_type(Some(defining_type.clone()));
        }
        ReturnType::Explicit(return_type_name) => {
            let resolved = resolve_type(ctx, return_type_name, containing, modules_in_scope);
            method.set_resolved_return_type(resolved);
        }
    }
}

fn resolve_subscript(
    ctx: &NameContext,
    subscript: &tr_model::Subscript,
    containing: Option<&Atom>,
    modules_in_scope: &[Atom],
) {
    for param in &subscript.parameters {
        let resolved = resolve_type(ctx, &param.type_name, containing, modules_in_scope);
        param.set_resolved_type(resolved);
    }
    let resolved = resolve_type(ctx, &subscript.return_type_name, containing, modules_in_scope);
    subscript.set_resolved_return_type(resolved);
    if let Some(defined_in) = &subscript.defined_in_type_name {
        let _ = resolve_type(ctx, defined_in, containing, modules_in_scope);
    }
}

fn resolve_enum_raw_type(
    ctx: &NameContext,
    enum_ty: &tr_model::EnumType,
    containing: Option<&Atom>,
    modules_in_scope: &[Atom],
) {
    let all_cases_carry_associated_values =
        !enum_ty.cases.is_empty() && enum_ty.cases.iter().all(|c| c.has_associated_values());
    if all_cases_carry_associated_values {
        enum_ty.set_raw_type_name(None);
        enum_ty.set_raw_type(None);
        return;
    }

    if let Some(raw_value_var) = enum_ty
        .header
        .variables
        .iter()
        .find(|v| v.name == "rawValue" && !v.is_static && v.is_stored())
    {
        let resolved = resolve_type(ctx, &raw_value_var.type_name, containing, modules_in_scope);
        raw_value_var.set_resolved_type(resolved.clone());
        enum_ty.set_raw_type_name(Some(raw_value_var.type_name.clone()));
        enum_ty.set_raw_type(resolved);
        return;
    }

    let Some(first_inherited) = enum_ty.header.inherited_types.first().cloned() else {
        return;
    };
    let has_simple_case = enum_ty.cases.iter().any(|c| !c.has_associated_values());
    let candidate = TypeName::new(first_inherited);
    let resolved = resolve_type(ctx, &candidate, containing, modules_in_scope);
    let declares_protocol = resolved
        .as_ref()
        .and_then(|name| ctx.type_map.get(name))
        .is_some_and(Type::is_protocol_like);

    if declares_protocol {
        enum_ty.set_raw_type_name(Some(candidate));
        enum_ty.set_raw_type(None);
    } else if has_simple_case {
        enum_ty.set_raw_type_name(Some(candidate));
        enum_ty.set_raw_type(resolved);
    }
}
