//! Comparison of simulated estimates against analytical references.
//!
//! The analytical values themselves (M/M/1 formulas, asymptotic
//! approximations, …) are application knowledge; this module only implements
//! the comparison contract: is the reference inside the estimate's
//! confidence interval?

use qn_stats::{ConfidenceReport, MeanReport, MetricKind};

/// One metric's comparison outcome.
#[derive(Copy, Clone, Debug)]
pub struct VerificationResult {
    pub metric:     MetricKind,
    pub simulated:  f64,
    pub analytical: f64,
    /// `|simulated − analytical|`.
    pub diff: f64,
    /// Half-width of the simulated estimate's interval (0 if inestimable).
    pub half_width: f64,
    /// Whether the analytical value is covered by the interval.
    pub within: bool,
}

/// Compare a center's estimates against reference values.
///
/// `reference` pairs each metric of interest with its analytical value;
/// metrics not listed are not checked.
pub fn verify_center(
    report:    &MeanReport,
    intervals: &ConfidenceReport,
    reference: &[(MetricKind, f64)],
) -> Vec<VerificationResult> {
    reference
        .iter()
        .map(|&(metric, analytical)| {
            let simulated = report.mean(metric);
            let half_width = intervals
                .interval(metric)
                .map(|ci| ci.half_width)
                .unwrap_or(0.0);
            let diff = (simulated - analytical).abs();
            VerificationResult {
                metric,
                simulated,
                analytical,
                diff,
                half_width,
                within: diff <= half_width,
            }
        })
        .collect()
}
