//! Student-t confidence intervals over batch or replication means.
//!
//! The t critical value is computed from the Acklam normal quantile plus the
//! Cornish–Fisher expansion in powers of `1/df` — accurate to about 1e−4 for
//! df ≥ 5, which is far below the statistical noise of any run short enough
//! to have so few batches.

use qn_core::dists::inv_norm_cdf;

use crate::{MetricKind, StatisticsLog};

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Unbiased sample variance (divisor `n − 1`).
pub fn sample_variance(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(xs);
    xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (n - 1) as f64
}

/// Student-t quantile at cumulative probability `p` with `df` degrees of
/// freedom (Cornish–Fisher expansion around the normal quantile).
pub fn t_quantile(p: f64, df: usize) -> f64 {
    debug_assert!(df >= 1);
    let z = inv_norm_cdf(p);
    let (z2, d) = (z * z, df as f64);
    let g1 = (z2 + 1.0) * z / 4.0;
    let g2 = ((5.0 * z2 + 16.0) * z2 + 3.0) * z / 96.0;
    let g3 = (((3.0 * z2 + 19.0) * z2 + 17.0) * z2 - 15.0) * z / 384.0;
    let g4 = ((((79.0 * z2 + 776.0) * z2 + 1482.0) * z2 - 1920.0) * z2 - 945.0) * z / 92_160.0;
    z + g1 / d + g2 / (d * d) + g3 / (d * d * d) + g4 / (d * d * d * d)
}

// ── ConfidenceInterval ────────────────────────────────────────────────────────

/// A symmetric interval `mean ± half_width`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    pub mean:       f64,
    pub half_width: f64,
}

impl ConfidenceInterval {
    /// Two-sided interval at `level` from a series of window means.
    ///
    /// Returns `None` for fewer than two samples — there is no variance
    /// estimate to build an interval from.
    pub fn from_samples(xs: &[f64], level: f64) -> Option<ConfidenceInterval> {
        let n = xs.len();
        if n < 2 {
            return None;
        }
        let t = t_quantile(1.0 - (1.0 - level) / 2.0, n - 1);
        let half_width = t * sample_variance(xs).sqrt() / (n as f64).sqrt();
        Some(ConfidenceInterval {
            mean: mean(xs),
            half_width,
        })
    }

    #[inline]
    pub fn lower(&self) -> f64 {
        self.mean - self.half_width
    }

    #[inline]
    pub fn upper(&self) -> f64 {
        self.mean + self.half_width
    }

    /// Whether `value` falls inside the interval.
    #[inline]
    pub fn covers(&self, value: f64) -> bool {
        (value - self.mean).abs() <= self.half_width
    }
}

// ── ConfidenceReport ──────────────────────────────────────────────────────────

/// One interval per metric for a center's log.
#[derive(Clone, Debug)]
pub struct ConfidenceReport {
    pub name:      String,
    pub level:     f64,
    pub intervals: Vec<(MetricKind, ConfidenceInterval)>,
}

impl ConfidenceReport {
    /// Build intervals for every metric series in `log`.
    ///
    /// Metrics whose series are too short are omitted; a completed log always
    /// yields all seven.
    pub fn from_log(log: &StatisticsLog, level: f64) -> ConfidenceReport {
        let intervals = MetricKind::ALL
            .iter()
            .filter_map(|&metric| {
                ConfidenceInterval::from_samples(log.series(metric), level)
                    .map(|ci| (metric, ci))
            })
            .collect();
        ConfidenceReport {
            name: log.name().to_string(),
            level,
            intervals,
        }
    }

    /// The interval for one metric, if it was estimable.
    pub fn interval(&self, metric: MetricKind) -> Option<ConfidenceInterval> {
        self.intervals
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, ci)| *ci)
    }
}
