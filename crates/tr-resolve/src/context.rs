//! Read-only context the Name Resolver and Rewriter consult.
//!
//! Built once before the Member Resolver's parallel fan-out and
//! shared by reference across every task: everything here is a name
//! table (`Atom` keys), never a mutable `Type`, so no locking is
//! needed (§5 "Shared state during parallel phase").

use rustc_hash::FxHashMap;
use tr_common::Atom;
use tr_model::{Type, Typealias};

pub struct NameContext<'a> {
    pub type_map: &'a FxHashMap<Atom, Type>,
    pub modules: &'a FxHashMap<Atom, FxHashMap<Atom, Atom>>,
    /// Keyed by the typealias's own fully-qualified name.
    pub typealiases: &'a FxHashMap<Atom, Typealias>,
}

impl<'a> NameContext<'a> {
    #[must_use]
    pub fn new(
        type_map: &'a FxHashMap<Atom, Type>,
        modules: &'a FxHashMap<Atom, FxHashMap<Atom, Atom>>,
        typealiases: &'a FxHashMap<Atom, Typealias>,
    ) -> Self {
        Self {
            type_map,
            modules,
            typealiases,
        }
    }

    /// The type's own module plus every module it imports — the scope
    /// the Name Resolver probes in lookup order step 3.
    #[must_use]
    pub fn modules_in_scope(&self, own_module: &Atom, imports: &[Atom]) -> Vec<Atom> {
        let mut scope = Vec::with_capacity(imports.len() + 1);
        scope.push(own_module.clone());
        scope.extend(imports.iter().cloned());
        scope
    }
}
