//! Random-variate generators over the currently selected RNG lane.
//!
//! Every function draws from whatever lane the caller last selected on the
//! stream set.  Callers that own a lane (service samplers, arrival processes,
//! routing policies) select it immediately before drawing.
//!
//! The normal quantile uses Acklam's rational approximation of the inverse
//! standard-normal CDF (absolute error < 1.15e−9 over the full open unit
//! interval), which is also what the statistics crate uses for Student-t
//! critical values.

use crate::RngStreams;

/// Exponential variate with the given mean (inverse-CDF method).
#[inline]
pub fn exponential(mean: f64, streams: &mut RngStreams) -> f64 {
    debug_assert!(mean > 0.0);
    -mean * (1.0 - streams.random()).ln()
}

/// Uniform variate in `(low, high)`.
#[inline]
pub fn uniform(low: f64, high: f64, streams: &mut RngStreams) -> f64 {
    debug_assert!(low < high);
    low + (high - low) * streams.random()
}

/// Normal variate with the given mean and standard deviation.
#[inline]
pub fn normal(mean: f64, sigma: f64, streams: &mut RngStreams) -> f64 {
    debug_assert!(sigma > 0.0);
    mean + sigma * inv_norm_cdf(streams.random())
}

/// Log-normal variate with the given location and scale parameters.
///
/// Note that `location`/`scale` parameterize the underlying normal; the
/// distribution's mean is `exp(location + scale²/2)`.
#[inline]
pub fn log_normal(location: f64, scale: f64, streams: &mut RngStreams) -> f64 {
    (location + scale * inv_norm_cdf(streams.random())).exp()
}

/// Log-normal variate truncated to `(0, cutoff]` by rejection, parameterized
/// so the *untruncated* distribution has the given mean.
///
/// The truncated mean is lower than `mean`; pick `cutoff` several standard
/// deviations out if the shift matters for the model.
pub fn truncated_log_normal(mean: f64, sigma: f64, cutoff: f64, streams: &mut RngStreams) -> f64 {
    debug_assert!(mean > 0.0 && cutoff > 0.0);
    let location = mean.ln() - sigma * sigma / 2.0;
    loop {
        let x = log_normal(location, sigma, streams);
        if x <= cutoff {
            return x;
        }
    }
}

/// `true` with probability `p`.
///
/// `p <= 0` never fires and `p >= 1` always fires (draws are in the open
/// interval, so the comparison is strict at both ends).
#[inline]
pub fn bernoulli(p: f64, streams: &mut RngStreams) -> bool {
    streams.random() < p
}

// ── Inverse standard-normal CDF (Acklam) ──────────────────────────────────────

const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];
const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];
const C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];
const D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

const P_LOW: f64 = 0.02425;
const P_HIGH: f64 = 1.0 - P_LOW;

/// Inverse CDF of the standard normal distribution, `p ∈ (0, 1)`.
pub fn inv_norm_cdf(p: f64) -> f64 {
    debug_assert!(p > 0.0 && p < 1.0, "p = {p} outside (0, 1)");
    if p < P_LOW {
        // lower tail
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        // central region
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        // upper tail, by symmetry
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -((((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0))
    }
}
