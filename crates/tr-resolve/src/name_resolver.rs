//! The Name Resolver (§4.B): looks up a textual name through the
//! scope chain (containing type → module → imports → global),
//! following typealiases to a fixed point.

use rustc_hash::FxHashSet;
use tr_common::Atom;

use crate::context::NameContext;

/// Result of a successful name lookup: the fully-qualified resolved
/// name, plus — if the chain crossed at least one typealias — the
/// *last* (innermost, closest-to-target) alias crossed, so a caller
/// can adopt its compound substructure (tuple/array/... shape).
#[derive(Debug, Clone)]
pub struct Resolution {
    pub name: Atom,
    pub typealias: Option<Atom>,
}

/// `resolveGlobalName(for:containingType:unique:modules:typealiases:)`.
///
/// `modules_in_scope` is the caller's own module followed by its
/// imports (§4.B step 3); build it with
/// [`NameContext::modules_in_scope`].
#[must_use]
pub fn resolve_global_name(
    ctx: &NameContext,
    name: &str,
    containing_type: Option<&Atom>,
    modules_in_scope: &[Atom],
) -> Option<Resolution> {
    let mut chain: FxHashSet<String> = FxHashSet::default();
    resolve_with_chain(ctx, name, containing_type, modules_in_scope, &mut chain)
}

fn resolve_with_chain(
    ctx: &NameContext,
    name: &str,
    containing_type: Option<&Atom>,
    modules_in_scope: &[Atom],
    chain: &mut FxHashSet<String>,
) -> Option<Resolution> {
    for candidate in candidates(ctx, name, containing_type, modules_in_scope) {
        if let Some(result) = try_candidate(ctx, &candidate, containing_type, modules_in_scope, chain) {
            return Some(result);
        }
    }
    None
}

/// Every string the lookup order probes, in priority order (§4.B
/// steps 1–3). Step 4 (the typealias probe) happens inside
/// `try_candidate` for each of these, not as a separate pass.
fn candidates(
    ctx: &NameContext,
    name: &str,
    containing_type: Option<&Atom>,
    modules_in_scope: &[Atom],
) -> Vec<String> {
    let mut out = Vec::new();

    // Step 1: containing-type scope chain, innermost to outermost.
    let mut scope = containing_type.cloned();
    while let Some(current) = scope {
        out.push(format!("{current}.{name}"));
        scope = ctx
            .type_map
            .get(&current)
            .and_then(|ty| ty.header().containing_type.clone());
    }

    // Step 2: direct (global, unqualified) name.
    out.push(name.to_string());

    // Step 3: each module in scope (own module, then imports).
    for module in modules_in_scope {
        out.push(format!("{module}.{name}"));
    }

    out
}

fn try_candidate(
    ctx: &NameContext,
    candidate: &str,
    containing_type: Option<&Atom>,
    modules_in_scope: &[Atom],
    chain: &mut FxHashSet<String>,
) -> Option<Resolution> {
    if !chain.insert(candidate.to_string()) {
        // Cycle guard (§4.B step 4): a name repeats along the chain —
        // return it as-is, an opaque name rather than infinite recursion.
        return Some(Resolution {
            name: Atom::from(candidate),
            typealias: None,
        });
    }

    if let Some(alias) = ctx.typealiases.get(&Atom::from(candidate)) {
        // A compound RHS (tuple/array/dictionary/closure/generic) has no
        // name to look up further — it's never itself an entry in
        // `type_map` or `typealiases`. Stop here and let the caller adopt
        // the alias's own shape instead of chasing its rendered text.
        if alias.type_name.is_compound() {
            return Some(Resolution {
                name: alias.name.clone(),
                typealias: Some(alias.name.clone()),
            });
        }

        let target = alias.type_name.unwrapped_type_name().to_string();
        let inner = resolve_with_chain(ctx, &target, containing_type, modules_in_scope, chain)?;
        // "the last step crossed a typealias": keep the deepest alias
        // the recursive call already found, otherwise this one is it.
        let typealias = inner.typealias.or_else(|| Some(alias.name.clone()));
        return Some(Resolution {
            name: inner.name,
            typealias,
        });
    }

    if ctx.type_map.contains_key(&Atom::from(candidate)) {
        return Some(Resolution {
            name: Atom::from(candidate),
            typealias: None,
        });
    }

    None
}
