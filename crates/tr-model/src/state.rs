//! `State` — the session object a single resolution run is built on.
//!
//! Constructed once per `ParserResult`, mutated in place by each
//! phase, discarded once the resolved triple is returned (§3.3).

use rustc_hash::FxHashMap;
use tr_common::Atom;

use crate::members::Method;
use crate::nominal::{Type, Typealias};

/// Owns every nominal type for the session (§3.4: "arena + string
/// keys"). Parent/base pointers elsewhere in the model are `Atom`
/// keys into this map, never direct references — that's what breaks
/// ownership cycles through protocol/class inheritance.
#[derive(Debug, Default)]
pub struct State {
    pub type_map: FxHashMap<Atom, Type>,
    /// `modules[module][short_name] = global_name`.
    pub modules: FxHashMap<Atom, FxHashMap<Atom, Atom>>,
    pub functions: Vec<Method>,
    pub unresolved_typealiases: Vec<Typealias>,
    /// Flattened chain target per alias, filled in as the Name
    /// Resolver resolves each alias on demand (§4.F step 2).
    pub resolved_typealiases: FxHashMap<Atom, Typealias>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ty` under its global name and index it into
    /// `modules`, overwriting any placeholder of the same name the
    /// Unifier may have already inserted while merging extensions.
    pub fn insert_type(&mut self, ty: Type) {
        let global_name = ty.global_name().clone();
        let module = ty.header().module.clone();
        let short_name = short_name(global_name.as_str());
        self.modules
            .entry(module)
            .or_default()
            .insert(Atom::from(short_name), global_name.clone());
        self.type_map.insert(global_name, ty);
    }
}

/// The last dotted component of a global name, e.g. `"Inner"` from
/// `"Outer.Inner"`.
#[must_use]
pub fn short_name(global_name: &str) -> &str {
    global_name.rsplit('.').next().unwrap_or(global_name)
}
