//! Shared primitives for the type resolution core.
//!
//! This crate provides foundational types used across the resolution
//! pipeline (unify, resolve, members, closure, core):
//! - Content-addressed identifiers (`Atom`)
//! - `ResolverOptions` — the core's configuration surface
//! - `Error` — the core's own (non-permissive) failure modes
//! - `tracing` setup helpers

pub mod atom;
pub use atom::Atom;

pub mod options;
pub use options::ResolverOptions;

pub mod error;
pub use error::{Error, Result};

pub mod logging;
