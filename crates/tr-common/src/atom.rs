//! Content-addressed identifiers.
//!
//! Names that recur constantly while walking the type graph (global
//! names, module names, import names) are carried as `Atom`, a cheap
//! `Arc<str>` wrapper, so cloning and comparing a name along a scope
//! chain never re-copies or re-allocates the underlying bytes.

use std::fmt;
use std::sync::Arc;

/// A cheaply-cloned, cheaply-compared string.
///
/// Two `Atom`s compare equal by content, not by provenance — this keeps
/// `Atom` usable as a map key without surprising behavior when the same
/// name is built independently in different places (e.g. one per
/// parallel task).
#[derive(Clone, Eq)]
pub struct Atom(Arc<str>);

impl Atom {
    pub fn new(s: impl Into<Arc<str>>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl std::hash::Hash for Atom {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Ord for Atom {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({:?})", self.0)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Self::new(Arc::from(s))
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Self::new(Arc::from(s.into_boxed_str()))
    }
}

impl std::borrow::Borrow<str> for Atom {
    fn borrow(&self) -> &str {
        &self.0
    }
}
