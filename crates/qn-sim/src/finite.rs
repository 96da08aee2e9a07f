//! The finite-horizon driver: independent replications of a bounded run.

use qn_core::{Event, EventKind, EventQueue, RngStreams, SimClock, SimConfig};
use qn_stats::{ConfidenceReport, MeanReport, ObservationSet, StatisticsLog};

use crate::network::{NetworkModel, jobs_in_system};
use crate::observer::RunObserver;
use crate::{SimError, SimResult};

/// Runs `num_replications` bounded replications of a network.
///
/// Each replication arrives jobs until `stop_time`, then drains: the
/// replication ends when the arrival process is exhausted and the network is
/// empty.  One row per center per replication lands in the replication logs.
///
/// # Seed chaining
///
/// Replication `k+1` is planted from the state of a dedicated lane after one
/// draw at the end of replication `k`, so the replications are disjoint
/// segments of the generator's cycle and any single replication can be
/// reproduced from its chained seed alone.
///
/// # Welch observations
///
/// With a positive `observation_interval`, the driver schedules snapshot
/// events on that spacing and records each center's running response-time
/// estimate, building one observation row per replication for
/// [Welch's procedure][ObservationSet].  Snapshots stop once the replication
/// is drained.
pub struct FiniteRunner {
    config: SimConfig,
}

impl FiniteRunner {
    /// Validates the configuration up front; drivers assume it afterwards.
    pub fn new(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(FiniteRunner {
            config: config.clone(),
        })
    }

    pub fn run<N, O>(&self, net: &mut N, observer: &mut O) -> SimResult<FiniteOutcome>
    where
        N: NetworkModel,
        O: RunObserver,
    {
        let mut streams = RngStreams::new(self.config.seed);
        let mut seed = self.config.seed;
        let mut observations: Vec<ObservationSet> = net
            .centers()
            .iter()
            .map(|c| ObservationSet::new(c.name()))
            .collect();

        for replication in 0..self.config.num_replications {
            streams.plant_seeds(seed);
            let mut clock = SimClock::new(0.0);
            let mut queue = EventQueue::new();

            net.reset(0.0);
            // Finite runs measure the whole horizon; there is no warm-up
            // trim, so open the measurement windows immediately.
            for center in net.centers_mut() {
                center.stop_warmup(0.0);
            }
            net.start(0.0, &mut queue, &mut streams);

            let interval = self.config.observation_interval;
            if interval > 0.0 {
                queue.push(Event::snapshot(interval));
            }
            let mut rows: Vec<Vec<f64>> = vec![Vec::new(); observations.len()];

            while let Some(event) = queue.pop() {
                clock.set_next(event.time);
                let width = clock.width();
                for center in net.centers_mut() {
                    center.integrate_area(width);
                }
                clock.advance();

                if event.kind == EventKind::Snapshot {
                    if net.arrivals_exhausted() && jobs_in_system(net) == 0 {
                        // Drained; let the queue empty out.
                        continue;
                    }
                    for (row, center) in rows.iter_mut().zip(net.centers()) {
                        if let Some(estimate) = center.response_time_estimate() {
                            row.push(estimate);
                        }
                    }
                    queue.push(Event::snapshot(event.time + interval));
                    continue;
                }
                net.dispatch(event, &mut queue, &mut streams);
            }

            let stranded = jobs_in_system(net);
            if stranded != 0 {
                return Err(SimError::Stalled { jobs: stranded });
            }

            for center in net.centers_mut() {
                center.save_replication_row();
            }
            for (set, row) in observations.iter_mut().zip(rows) {
                set.push_row(row);
            }
            observer.on_replication_end(replication, clock.current);

            // Chain the next replication's seed off the dedicated lane.
            streams.select_stream(self.config.seed_stream);
            streams.random();
            seed = streams.seed();
        }

        let logs = net
            .centers()
            .iter()
            .map(|c| c.replication_log().clone())
            .collect();
        Ok(FiniteOutcome {
            logs,
            observations,
            confidence_level: self.config.confidence_level,
        })
    }
}

// ── FiniteOutcome ─────────────────────────────────────────────────────────────

/// Replication logs and Welch observation matrices of a completed run.
pub struct FiniteOutcome {
    logs:             Vec<StatisticsLog>,
    observations:     Vec<ObservationSet>,
    confidence_level: f64,
}

impl FiniteOutcome {
    /// One replication log per center, in network order.
    pub fn logs(&self) -> &[StatisticsLog] {
        &self.logs
    }

    /// One observation matrix per center, in network order.
    pub fn observations(&self) -> &[ObservationSet] {
        &self.observations
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

    /// Smoothed Welch curve per center.
    pub fn welch_curves(&self, max_window: usize) -> Vec<(String, Vec<f64>)> {
        self.observations
            .iter()
            .map(|set| (set.name().to_string(), set.welch_curve(max_window)))
            .collect()
    }
}
