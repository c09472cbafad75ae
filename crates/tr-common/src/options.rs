//! Configuration for a resolution run.
//!
//! Lives in `tr-common` so that `tr-core`'s orchestrator and any
//! embedding tool can share one options type without a circular
//! dependency, mirroring the teacher's convention of hanging run-wide
//! options off the common crate rather than the top-level binary.

/// Options controlling how a single `unique_types_and_functions` run
/// executes. Does not affect the *result* (resolution is permissive and
/// deterministic regardless of these settings) — only how it is
/// scheduled.
#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
    /// Number of worker threads for the Member Resolver's data-parallel
    /// phase. `None` uses `std::thread::available_parallelism()`.
    pub worker_threads: Option<usize>,

    /// Force single-threaded Member Resolution. Output is identical
    /// either way (ordering is sorted post-hoc), but this removes
    /// scheduling nondeterminism from timing-sensitive test fixtures
    /// and small embeddings that don't want to pay for a thread pool.
    pub deterministic: bool,
}

impl ResolverOptions {
    #[must_use]
    pub fn deterministic() -> Self {
        Self {
            worker_threads: Some(1),
            deterministic: true,
        }
    }

    /// Resolve the effective worker count, never zero: an explicit
    /// `Some(0)` is treated the same as `None` rather than handed to
    /// `rayon::ThreadPoolBuilder` as-is (which would silently fall back
    /// to its own default instead of producing a usable thread count).
    #[must_use]
    pub fn effective_worker_threads(&self) -> usize {
        if self.deterministic {
            return 1;
        }
        self.worker_threads.filter(|&n| n > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
        })
    }
}
