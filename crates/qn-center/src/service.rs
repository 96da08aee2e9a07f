//! Service-time samplers.
//!
//! Each sampler owns one RNG lane and re-selects it on every draw, so the
//! sequence of service demands at a center is unaffected by what any other
//! component draws in between.

use qn_core::{RngStreams, dists};

/// A source of service demands for one center.
pub trait ServiceTime {
    fn sample(&self, streams: &mut RngStreams) -> f64;
}

/// Exponentially distributed service times.
pub struct Exponential {
    mean:   f64,
    stream: usize,
}

impl Exponential {
    pub fn new(mean: f64, stream: usize) -> Self {
        Exponential { mean, stream }
    }
}

impl ServiceTime for Exponential {
    fn sample(&self, streams: &mut RngStreams) -> f64 {
        streams.select_stream(self.stream);
        dists::exponential(self.mean, streams)
    }
}

/// Uniformly distributed service times in `(low, high)`.
pub struct Uniform {
    low:    f64,
    high:   f64,
    stream: usize,
}

impl Uniform {
    pub fn new(low: f64, high: f64, stream: usize) -> Self {
        Uniform { low, high, stream }
    }
}

impl ServiceTime for Uniform {
    fn sample(&self, streams: &mut RngStreams) -> f64 {
        streams.select_stream(self.stream);
        dists::uniform(self.low, self.high, streams)
    }
}

/// Truncated log-normal service times — heavy-tailed demand with a hard cap.
pub struct TruncatedLogNormal {
    mean:   f64,
    sigma:  f64,
    cutoff: f64,
    stream: usize,
}

impl TruncatedLogNormal {
    pub fn new(mean: f64, sigma: f64, cutoff: f64, stream: usize) -> Self {
        TruncatedLogNormal { mean, sigma, cutoff, stream }
    }
}

impl ServiceTime for TruncatedLogNormal {
    fn sample(&self, streams: &mut RngStreams) -> f64 {
        streams.select_stream(self.stream);
        dists::truncated_log_normal(self.mean, self.sigma, self.cutoff, streams)
    }
}
