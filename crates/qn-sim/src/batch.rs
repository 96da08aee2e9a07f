//! The batch-means driver: one long run, chopped into batches.

use qn_core::{EventQueue, RngStreams, SimClock, SimConfig};
use qn_stats::{AcfVerdict, ConfidenceReport, MeanReport, StatisticsLog, acf_verdicts};

use crate::network::NetworkModel;
use crate::observer::RunObserver;
use crate::{SimError, SimResult};

/// Runs a network until every center has closed its target number of
/// batches.
///
/// The run has three phases:
///
/// 1. **Warm-up**: events flow but no batch closes.  Ends once every center
///    has served `batch_size · num_batches · warmup_fraction` jobs, at which
///    point all accumulators are discarded and measurement windows restart.
/// 2. **Measurement**: each center closes a batch every `batch_size`
///    completions; a closed batch appends one row to the center's batch log.
/// 3. **Drain-down**: centers that reached their target stop accumulating
///    while the rest catch up.  The run ends when all are done.
pub struct BatchRunner {
    config: SimConfig,
}

impl BatchRunner {
    /// Validates the configuration up front; drivers assume it afterwards.
    pub fn new(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(BatchRunner {
            config: config.clone(),
        })
    }

    pub fn run<N, O>(&self, net: &mut N, observer: &mut O) -> SimResult<BatchOutcome>
    where
        N: NetworkModel,
        O: RunObserver,
    {
        let mut streams = RngStreams::new(self.config.seed);
        let mut clock = SimClock::new(0.0);
        let mut queue = EventQueue::new();

        net.reset(0.0);
        net.start(0.0, &mut queue, &mut streams);

        let threshold = self.config.warmup_threshold();
        let mut warming = true;

        loop {
            if net.centers().iter().all(|c| c.is_done()) {
                break;
            }
            if warming {
                let slowest = net
                    .centers()
                    .iter()
                    .map(|c| c.total_served())
                    .min()
                    .unwrap_or(0);
                if slowest >= threshold {
                    warming = false;
                    let now = clock.current;
                    for center in net.centers_mut() {
                        center.stop_warmup(now);
                    }
                    observer.on_warmup_end(now, slowest);
                }
            }

            // A live network always has a pending event: something is either
            // in service or about to arrive.
            let event = queue.pop().ok_or(SimError::EventQueueEmpty)?;
            clock.set_next(event.time);
            let width = clock.width();
            for center in net.centers_mut() {
                center.integrate_area(width);
            }
            clock.advance();
            net.dispatch(event, &mut queue, &mut streams);
        }

        observer.on_run_end(clock.current);

        let logs = net
            .centers()
            .iter()
            .map(|c| c.batch_log().clone())
            .collect();
        Ok(BatchOutcome {
            logs,
            confidence_level: self.config.confidence_level,
        })
    }
}

// ── BatchOutcome ──────────────────────────────────────────────────────────────

/// The per-center batch logs of a completed run, with derived summaries.
pub struct BatchOutcome {
    logs:             Vec<StatisticsLog>,
    confidence_level: f64,
}

impl BatchOutcome {
    /// One batch log per center, in network order.
    pub fn logs(&self) -> &[StatisticsLog] {
        &self.logs
    }

    /// Point estimates per center.
    pub fn mean_reports(&self) -> Vec<MeanReport> {
        self.logs.iter().map(StatisticsLog::mean_report).collect()
    }

    /// Confidence intervals per center at the configured level.
    pub fn confidence_reports(&self) -> Vec<ConfidenceReport> {
        self.logs
            .iter()
            .map(|log| ConfidenceReport::from_log(log, self.confidence_level))
            .collect()
    }

    /// Batch-independence verdicts per center.
    pub fn acf_verdicts(&self, threshold: f64) -> Vec<(String, Vec<AcfVerdict>)> {
        self.logs
            .iter()
            .map(|log| (log.name().to_string(), acf_verdicts(log, threshold)))
            .collect()
    }
}
