//! A single-write memoization slot for resolved-type fields.
//!
//! Every member record (`Variable`, `Method`, `Subscript`, ...) carries
//! one or more of these next to a `TypeName`. The Member Resolver
//! writes into it exactly once per resolution pass (§3.3 of the spec);
//! reading before that write observes "not yet resolved", which is
//! distinct from "resolved to nothing" (`Some(None)` vs `None`).

use std::sync::OnceLock;
use tr_common::Atom;

#[derive(Debug, Default)]
pub struct ResolvedSlot(OnceLock<Option<Atom>>);

impl ResolvedSlot {
    #[must_use]
    pub fn new() -> Self {
        Self(OnceLock::new())
    }

    /// `None` if never written; `Some(inner)` once the Member Resolver
    /// has run, where `inner` is the resolved nominal type's global
    /// name (or `None` if the reference never resolved).
    pub fn get(&self) -> Option<Option<Atom>> {
        self.0.get().cloned()
    }

    pub fn resolved(&self) -> Option<Atom> {
        self.0.get().cloned().flatten()
    }

    pub fn is_written(&self) -> bool {
        self.0.get().is_some()
    }

    /// Writes the slot. A second write is a silent no-op, preserving
    /// the "write exactly once" invariant without panicking parallel
    /// workers that race on idempotent recomputation.
    pub fn set(&self, value: Option<Atom>) {
        let _ = self.0.set(value);
    }
}

impl Clone for ResolvedSlot {
    fn clone(&self) -> Self {
        let slot = OnceLock::new();
        if let Some(value) = self.0.get() {
            let _ = slot.set(value.clone());
        }
        Self(slot)
    }
}
