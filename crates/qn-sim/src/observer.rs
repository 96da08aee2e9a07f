//! Progress hooks for long runs.

/// Callbacks invoked by the drivers at run milestones.
///
/// All methods have no-op defaults; implement only what you need.  Use
/// [`NoopObserver`] when you need no callbacks at all.
pub trait RunObserver {
    /// Batch-means warm-up ended at `now`, after `served` jobs at the
    /// slowest center.
    fn on_warmup_end(&mut self, _now: f64, _served: u64) {}

    /// One finite-horizon replication drained at `now`.
    fn on_replication_end(&mut self, _replication: usize, _now: f64) {}

    /// The driver finished at `now`.
    fn on_run_end(&mut self, _now: f64) {}
}

/// An observer that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
