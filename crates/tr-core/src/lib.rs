//! Orchestrator and public API (§4.F) for the type resolution core.
//!
//! [`unique_types_and_functions`] is the crate's sole entry point: it
//! takes one parser run's raw output and returns a fully cross-linked,
//! deterministically-ordered type graph.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{Level, info, span};

use tr_closure::compute_ancestor_closure;
use tr_common::{Atom, Error, ResolverOptions};
use tr_members::{resolve_function, resolve_members};
use tr_model::{Method, ParserResult, Type, Typealias};
use tr_resolve::{NameContext, resolve_global_name};
use tr_unify::unify;

/// The fully-resolved output of one run: every list sorted per
/// invariant 7 (types by `global_name`, functions by `name`,
/// typealiases by `name`).
#[derive(Debug)]
pub struct Resolved {
    pub types: Vec<Type>,
    pub functions: Vec<Method>,
    pub typealiases: Vec<Typealias>,
}

/// Run the full resolution pipeline: unify → typealias self-resolution
/// → Member Resolution (parallel, unless `options.deterministic`) →
/// Ancestor Closure → sorted output.
///
/// Returns `Err` only for the ambient failure modes in §7 (a thread
/// pool that fails to build); a pass over input with many unresolved
/// names still returns `Ok` — that permissiveness is the point of §7.
pub fn unique_types_and_functions(
    parser_result: ParserResult,
    options: &ResolverOptions,
) -> Result<Resolved, Error> {
    let _span = span!(Level::INFO, "unique_types_and_functions").entered();

    let ParserResult {
        types,
        functions,
        typealiases: raw_typealiases,
    } = parser_result;
    // The Unifier (§4.A) only merges type declarations/extensions;
    // typealiases have no extension concept and are handled here.
    let mut state = unify(ParserResult {
        types,
        functions,
        typealiases: Vec::new(),
    });

    state.unresolved_typealiases = raw_typealiases
        .into_iter()
        .map(|raw| {
            let mut typealias = Typealias::new(
                Atom::from(raw.name.as_str()),
                Atom::from(raw.module.as_str()),
                raw.type_name,
            );
            typealias.parent = raw.parent.map(|p| Atom::from(p.as_str()));
            typealias
        })
        .collect();

    let typealiases_index: FxHashMap<Atom, Typealias> = state
        .unresolved_typealiases
        .iter()
        .cloned()
        .map(|typealias| (typealias.name.clone(), typealias))
        .collect();

    {
        let ctx = NameContext::new(&state.type_map, &state.modules, &typealiases_index);

        for typealias in &state.unresolved_typealiases {
            let modules_in_scope = ctx.modules_in_scope(&typealias.module, &[]);
            let resolution = resolve_global_name(
                &ctx,
                typealias.type_name.unwrapped_type_name(),
                None,
                &modules_in_scope,
            );
            typealias.set_resolved_type(resolution.map(|r| r.name));
        }

        let type_work_items: Vec<&Type> = state.type_map.values().collect();
        if options.deterministic {
            type_work_items.iter().for_each(|ty| resolve_members(&ctx, ty));
            state.functions.iter().for_each(|f| resolve_free_function(&ctx, f));
        } else {
            let pool = build_thread_pool(options)?;
            pool.install(|| {
                type_work_items.par_iter().for_each(|ty| resolve_members(&ctx, ty));
                state.functions.par_iter().for_each(|f| resolve_free_function(&ctx, f));
            });
        }
    }

    compute_ancestor_closure(&mut state.type_map);

    state.resolved_typealiases = state
        .unresolved_typealiases
        .iter()
        .cloned()
        .map(|typealias| (typealias.name.clone(), typealias))
        .collect();

    let mut types: Vec<Type> = state.type_map.into_values().collect();
    types.sort_by(|a, b| a.global_name().as_str().cmp(b.global_name().as_str()));

    let mut functions = state.functions;
    functions.sort_by(|a, b| a.name.cmp(&b.name));

    let mut typealiases: Vec<Typealias> = state.resolved_typealiases.into_values().collect();
    typealiases.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));

    info!(
        types_resolved = types.len(),
        functions_resolved = functions.len(),
        typealiases_resolved = typealiases.len(),
        "resolution complete"
    );

    Ok(Resolved {
        types,
        functions,
        typealiases,
    })
}

/// A top-level function has no containing type or header to draw scope
/// from, unlike a method reached through [`resolve_members`] — its own
/// `module`/`imports` (§6) stand in for both.
fn resolve_free_function(ctx: &NameContext, function: &Method) {
    resolve_function(ctx, function, &function.module, &function.imports);
}

fn build_thread_pool(options: &ResolverOptions) -> Result<rayon::ThreadPool, Error> {
    let threads = options.effective_worker_threads();
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|source| Error::ThreadPool {
            requested: threads,
            source,
        })
}
