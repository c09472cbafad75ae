//! The core's own failure modes.
//!
//! Unresolved *names* are never errors here — §7 of the spec is
//! permissive by design, so a name that doesn't resolve simply leaves
//! its resolved slot empty. `Error` instead covers failures orthogonal
//! to name resolution: bad run configuration and scheduling failures.

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("failed to build worker thread pool with {requested} threads: {source}")]
    ThreadPool {
        requested: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}
