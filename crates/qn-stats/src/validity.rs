//! Batch-means validity check via lag-1 autocorrelation.
//!
//! Batch means are only approximately independent; the standard sanity check
//! is that consecutive batch means are nearly uncorrelated.  A series whose
//! lag-1 autocorrelation stays within a small threshold in magnitude (0.2 by
//! convention) justifies treating the batches as i.i.d. for the t-interval.

use crate::{MetricKind, StatisticsLog};

/// Conventional acceptance threshold for batch-means independence.
pub const DEFAULT_ACF_THRESHOLD: f64 = 0.2;

/// Lag-1 autocorrelation estimate of a series.
///
/// Returns `None` when no estimate exists: fewer than two points, or a
/// constant series (zero variance).
///
/// The lag-1 covariance is averaged over its `k − 1` products and the
/// variance over its `k` squares, so a perfectly alternating series scores
/// exactly `−1.0`.
pub fn lag1_autocorrelation(xs: &[f64]) -> Option<f64> {
    let k = xs.len();
    if k < 2 {
        return None;
    }
    let m = xs.iter().sum::<f64>() / k as f64;
    let num: f64 = xs.windows(2).map(|w| (w[0] - m) * (w[1] - m)).sum();
    let den: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    if den == 0.0 {
        return None;
    }
    Some((num / (k - 1) as f64) / (den / k as f64))
}

/// The outcome of the independence check for one metric series.
#[derive(Copy, Clone, Debug)]
pub struct AcfVerdict {
    pub metric: MetricKind,
    /// `None` when the series admits no estimate (too short or constant).
    pub lag1: Option<f64>,
    /// `true` when an estimate exists and its magnitude sits below the
    /// threshold.  Correlation in either direction breaks the i.i.d.
    /// assumption behind the t-interval.
    pub passes: bool,
}

/// Check every metric series of a batch log against `threshold`.
///
/// This never fails — an inconclusive series simply yields a non-passing
/// verdict with `lag1 = None`.
pub fn acf_verdicts(log: &StatisticsLog, threshold: f64) -> Vec<AcfVerdict> {
    MetricKind::ALL
        .iter()
        .map(|&metric| {
            let lag1 = lag1_autocorrelation(log.series(metric));
            AcfVerdict {
                metric,
                lag1,
                passes: lag1.is_some_and(|r| r.abs() < threshold),
            }
        })
        .collect()
}
