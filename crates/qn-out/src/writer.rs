//! The `OutputWriter` trait implemented by backend writers.

use qn_stats::ObservationSet;

use crate::{OutputResult, StatsRow};

/// A sink for simulation results.
pub trait OutputWriter {
    /// Write a batch of statistics rows.
    fn write_stats_rows(&mut self, rows: &[StatsRow]) -> OutputResult<()>;

    /// Write one center's replication-by-snapshot observation matrix.
    fn write_observations(&mut self, set: &ObservationSet) -> OutputResult<()>;

    /// Write one center's smoothed Welch curve.
    fn write_welch_curve(&mut self, center: &str, curve: &[f64]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
