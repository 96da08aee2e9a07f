//! Top-level simulation configuration.

use crate::rng::{DEFAULT_SEED, STREAM_COUNT};
use crate::{QnError, QnResult};

/// Run parameters shared by the batch-means and finite-horizon drivers.
///
/// Typically built in the application crate (optionally deserialized from a
/// TOML/JSON file with the `serde` feature), validated once, and passed by
/// reference at construction.  Nothing re-reads configuration mid-run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: i64,

    /// Completions per batch in batch-means mode.
    pub batch_size: u64,

    /// Batches each center must accumulate before the run is done.
    pub num_batches: usize,

    /// Independent replications in finite-horizon mode.
    pub num_replications: usize,

    /// Fraction of the total batch workload discarded as warm-up, in `[0, 1)`.
    /// The threshold is `batch_size · num_batches · warmup_fraction` jobs
    /// served at *every* center.
    pub warmup_fraction: f64,

    /// Two-sided confidence level for interval estimates, in `(0, 1)`.
    pub confidence_level: f64,

    /// Finite-horizon arrival cutoff: no external arrival is scheduled past
    /// this time.
    pub stop_time: f64,

    /// Spacing of Welch observation snapshots in finite-horizon mode.
    /// `0` disables observation capture.
    pub observation_interval: f64,

    /// Lane reserved for chaining replication seeds.
    pub seed_stream: usize,
}

impl SimConfig {
    /// Check parameter ranges.  Call once before handing the config to a
    /// driver; drivers assume a validated config.
    pub fn validate(&self) -> QnResult<()> {
        if self.batch_size == 0 {
            return Err(QnError::Config("batch_size must be positive".into()));
        }
        if self.num_batches < 2 {
            return Err(QnError::Config(
                "num_batches must be at least 2 (variance needs two samples)".into(),
            ));
        }
        if self.num_replications == 0 {
            return Err(QnError::Config("num_replications must be positive".into()));
        }
        if !(0.0..1.0).contains(&self.warmup_fraction) {
            return Err(QnError::Config(format!(
                "warmup_fraction {} outside [0, 1)",
                self.warmup_fraction
            )));
        }
        if !(0.0..1.0).contains(&self.confidence_level) || self.confidence_level == 0.0 {
            return Err(QnError::Config(format!(
                "confidence_level {} outside (0, 1)",
                self.confidence_level
            )));
        }
        if !self.stop_time.is_finite() || self.stop_time < 0.0 {
            return Err(QnError::Config(format!("invalid stop_time {}", self.stop_time)));
        }
        if self.observation_interval < 0.0 {
            return Err(QnError::Config(format!(
                "observation_interval {} is negative",
                self.observation_interval
            )));
        }
        if self.seed_stream >= STREAM_COUNT {
            return Err(QnError::Config(format!(
                "seed_stream {} out of range (max {})",
                self.seed_stream,
                STREAM_COUNT - 1
            )));
        }
        Ok(())
    }

    /// Jobs every center must serve before warm-up ends.
    #[inline]
    pub fn warmup_threshold(&self) -> u64 {
        (self.batch_size as f64 * self.num_batches as f64 * self.warmup_fraction) as u64
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            seed:                 DEFAULT_SEED,
            batch_size:           1024,
            num_batches:          64,
            num_replications:     32,
            warmup_fraction:      0.2,
            confidence_level:     0.95,
            stop_time:            86_400.0,
            observation_interval: 0.0,
            seed_stream:          255,
        }
    }
}
