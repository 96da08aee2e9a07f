//! Flattened output rows.

use qn_stats::{MetricKind, StatisticsLog};

/// One log row (a batch or a replication) flattened for emission.
#[derive(Clone, Debug)]
pub struct StatsRow {
    pub center: String,
    /// Batch index or replication index, 0-based.
    pub row: usize,
    /// Metric values in [`MetricKind::ALL`] order.
    pub metrics: [f64; 7],
}

impl StatsRow {
    /// Flatten every row of a log.
    pub fn from_log(log: &StatisticsLog) -> Vec<StatsRow> {
        (0..log.rows())
            .map(|row| {
                let mut metrics = [0.0; 7];
                for metric in MetricKind::ALL {
                    metrics[metric.index()] = log.series(metric)[row];
                }
                StatsRow {
                    center: log.name().to_string(),
                    row,
                    metrics,
                }
            })
            .collect()
    }
}
