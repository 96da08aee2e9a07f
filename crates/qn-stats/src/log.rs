//! Append-only statistics logs.
//!
//! # Design
//!
//! One `StatisticsLog` holds seven parallel series, one per [`MetricKind`].
//! A row is derived and appended atomically across all seven — there is no
//! way to append to one metric without the others — so the series always
//! share one length and "is this log complete?" is a single comparison.
//!
//! The same type backs both batch-means logs (one row per closed batch) and
//! replication logs (one row per replication); only who calls `save_row`
//! and the target row count differ.

use std::fmt;

use crate::Area;

// ── MetricKind ────────────────────────────────────────────────────────────────

/// The seven tracked performance metrics.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetricKind {
    /// Mean time in node, `E[Ts]`.
    ResponseTime,
    /// Mean time in queue, `E[Tq]`.
    QueueTime,
    /// Mean service demand, `E[s]`.
    ServiceTime,
    /// Mean jobs in node, `E[Ns]`.
    SystemPopulation,
    /// Mean jobs in queue, `E[Nq]`.
    QueuePopulation,
    /// Server utilization, `ρ`.
    Utilization,
    /// Completion rate, `λ`.
    Throughput,
}

impl MetricKind {
    pub const ALL: [MetricKind; 7] = [
        MetricKind::ResponseTime,
        MetricKind::QueueTime,
        MetricKind::ServiceTime,
        MetricKind::SystemPopulation,
        MetricKind::QueuePopulation,
        MetricKind::Utilization,
        MetricKind::Throughput,
    ];

    /// Classical queueing-theory label.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::ResponseTime     => "E[Ts]",
            MetricKind::QueueTime        => "E[Tq]",
            MetricKind::ServiceTime      => "E[s]",
            MetricKind::SystemPopulation => "E[Ns]",
            MetricKind::QueuePopulation  => "E[Nq]",
            MetricKind::Utilization      => "rho",
            MetricKind::Throughput       => "lambda",
        }
    }

    /// Position in [`MetricKind::ALL`] / a log's series array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── RowSample ─────────────────────────────────────────────────────────────────

/// Raw accumulators a center hands over when a measurement window closes.
#[derive(Copy, Clone, Debug)]
pub struct RowSample {
    /// Time-weighted integrals for the window.
    pub area: Area,
    /// Jobs served in the window.  Must be positive: windows in which nothing
    /// completed produce no row.
    pub served: u64,
    /// Total service time delivered in the window (summed over servers).
    pub total_service: f64,
    /// Time of the last completion in the window.
    pub last_completion: f64,
    /// Time the window opened.
    pub window_start: f64,
}

// ── StatisticsLog ─────────────────────────────────────────────────────────────

/// Seven append-only series of derived metric values for one center.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatisticsLog {
    name:        String,
    target_rows: usize,
    series:      [Vec<f64>; 7],
}

impl StatisticsLog {
    /// An empty log for the named center, complete at `target_rows` rows.
    pub fn new(name: impl Into<String>, target_rows: usize) -> Self {
        StatisticsLog {
            name: name.into(),
            target_rows,
            series: Default::default(),
        }
    }

    /// Derive the seven metrics from a window's accumulators and append one
    /// row to every series.
    ///
    /// With `elapsed = last_completion − window_start`:
    ///
    /// | metric   | formula                   |
    /// |----------|---------------------------|
    /// | `E[Ts]`  | node_area / served        |
    /// | `E[Tq]`  | queue_area / served       |
    /// | `E[s]`   | total_service / served    |
    /// | `E[Ns]`  | node_area / elapsed       |
    /// | `E[Nq]`  | queue_area / elapsed      |
    /// | `ρ`      | service_area / elapsed    |
    /// | `λ`      | served / elapsed          |
    ///
    /// # Panics
    /// Asserts `served > 0` and a positive elapsed window; callers only close
    /// windows in which something completed.
    pub fn save_row(&mut self, sample: RowSample) {
        assert!(sample.served > 0, "{}: closing a window with zero completions", self.name);
        let elapsed = sample.last_completion - sample.window_start;
        assert!(elapsed > 0.0, "{}: empty measurement window", self.name);

        let served = sample.served as f64;
        let area = sample.area;
        self.series[MetricKind::ResponseTime.index()].push(area.node / served);
        self.series[MetricKind::QueueTime.index()].push(area.queue / served);
        self.series[MetricKind::ServiceTime.index()].push(sample.total_service / served);
        self.series[MetricKind::SystemPopulation.index()].push(area.node / elapsed);
        self.series[MetricKind::QueuePopulation.index()].push(area.queue / elapsed);
        self.series[MetricKind::Utilization.index()].push(area.service / elapsed);
        self.series[MetricKind::Throughput.index()].push(served / elapsed);
    }

    /// Rows appended so far (all series share this length).
    #[inline]
    pub fn rows(&self) -> usize {
        self.series[0].len()
    }

    /// Whether the log has reached its target row count.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.rows() >= self.target_rows
    }

    #[inline]
    pub fn target_rows(&self) -> usize {
        self.target_rows
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The series for one metric.
    #[inline]
    pub fn series(&self, metric: MetricKind) -> &[f64] {
        &self.series[metric.index()]
    }

    /// Discard all rows (replication restart) without touching the target.
    pub fn clear(&mut self) {
        for s in &mut self.series {
            s.clear();
        }
    }

    /// Arithmetic mean of every series.
    pub fn mean_report(&self) -> MeanReport {
        let mut means = [0.0; 7];
        for metric in MetricKind::ALL {
            let xs = self.series(metric);
            if !xs.is_empty() {
                means[metric.index()] = xs.iter().sum::<f64>() / xs.len() as f64;
            }
        }
        MeanReport {
            name: self.name.clone(),
            rows: self.rows(),
            means,
        }
    }
}

// ── MeanReport ────────────────────────────────────────────────────────────────

/// Point estimates for one center: the mean of each metric series.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeanReport {
    pub name: String,
    pub rows: usize,
    means:    [f64; 7],
}

impl MeanReport {
    #[inline]
    pub fn mean(&self, metric: MetricKind) -> f64 {
        self.means[metric.index()]
    }
}

impl fmt::Display for MeanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} rows)", self.name, self.rows)?;
        for metric in MetricKind::ALL {
            writeln!(f, "  {:<7} {:>12.6}", metric.label(), self.mean(metric))?;
        }
        Ok(())
    }
}
