//! The `Center` trait and the bookkeeping state every discipline composes.

use qn_core::{CenterId, Event, EventQueue, RngStreams};
use qn_stats::{Area, RowSample, StatisticsLog};

// ── Center ────────────────────────────────────────────────────────────────────

/// One service center in a queueing network.
///
/// Implemented by [`SingleServer`][crate::SingleServer],
/// [`MultiServer`][crate::MultiServer], and
/// [`InfiniteServer`][crate::InfiniteServer].  Drivers only ever see this
/// trait; the network model owns the concrete values.
///
/// # Event protocol
///
/// `process_arrival` and `process_completion` receive the popped event *after*
/// the driver has integrated areas over the staged clock width and advanced
/// the clock.  They may push follow-up events (the completion of a started
/// service, arrivals routed downstream) but must never touch the clock.
pub trait Center<J> {
    fn id(&self) -> CenterId;
    fn name(&self) -> &str;

    /// A job arrives.  Either a service starts (scheduling its completion) or
    /// the payload joins the waiting line.
    fn process_arrival(&mut self, event: Event<J>, queue: &mut EventQueue<J>, streams: &mut RngStreams);

    /// A service completes.  Accounting happens first, then a batch window may
    /// close, then the payload is routed, then the next waiting job (if any)
    /// starts service.
    fn process_completion(&mut self, event: Event<J>, queue: &mut EventQueue<J>, streams: &mut RngStreams);

    /// Integrate the time-weighted areas over one event gap, *before* the
    /// event's state transition is applied.
    fn integrate_area(&mut self, width: f64);

    /// Clear per-replication state (population, waiting line, windows, sums).
    /// Accumulated log rows survive; a center serves exactly one driver run.
    fn reset(&mut self, start: f64);

    /// End the warm-up: discard accumulated areas and sums and restart the
    /// measurement window at `now`.
    fn stop_warmup(&mut self, now: f64);

    /// Whether the batch log has reached its target row count.
    fn is_done(&self) -> bool;

    /// Jobs currently in the node (waiting + in service).
    fn jobs_in_node(&self) -> u64;

    /// Jobs served since the last reset (drives the warm-up threshold).
    fn total_served(&self) -> u64;

    fn batch_log(&self) -> &StatisticsLog;
    fn replication_log(&self) -> &StatisticsLog;

    /// Close the replication window and append one row to the replication
    /// log.  A center that served nothing contributes no row.
    fn save_replication_row(&mut self);

    /// Running mean response time since the measurement window opened, or
    /// `None` before the first completion.  Sampled at snapshot events for
    /// Welch's procedure.
    fn response_time_estimate(&self) -> Option<f64>;
}

// ── CenterState ───────────────────────────────────────────────────────────────

/// Bookkeeping shared by all disciplines: population count, event times,
/// measurement windows, areas, and the two logs.
///
/// Owned by composition — each discipline embeds one and layers its own
/// queueing structure (waiting line, server slots) on top.
#[derive(Clone, Debug)]
pub struct CenterState {
    pub id:   CenterId,
    pub name: String,

    /// Completions per batch window.
    pub batch_size: u64,

    pub jobs_in_node:    u64,
    pub last_arrival:    f64,
    pub last_completion: f64,

    /// When the current measurement window opened.
    pub window_start: f64,

    /// `true` until the driver ends the warm-up; batches never close while
    /// warming.
    pub warming: bool,

    /// Completions since the current batch window opened.
    pub jobs_in_batch: u64,

    pub area:            Area,
    pub batch_log:       StatisticsLog,
    pub replication_log: StatisticsLog,
}

impl CenterState {
    /// Fresh state for a named center.
    ///
    /// `num_batches` is the batch-means target; pass `0` in finite-horizon
    /// runs, which disables batch closing entirely.  `num_replications` sizes
    /// the replication log.
    pub fn new(
        id:               CenterId,
        name:             impl Into<String>,
        batch_size:       u64,
        num_batches:      usize,
        num_replications: usize,
    ) -> Self {
        let name = name.into();
        CenterState {
            id,
            batch_size,
            jobs_in_node:    0,
            last_arrival:    0.0,
            last_completion: 0.0,
            window_start:    0.0,
            warming:         true,
            jobs_in_batch:   0,
            area:            Area::default(),
            batch_log:       StatisticsLog::new(name.clone(), num_batches),
            replication_log: StatisticsLog::new(name.clone(), num_replications),
            name,
        }
    }

    /// Account an arrival: bump the population and remember the time.
    #[inline]
    pub fn record_arrival(&mut self, t: f64) {
        self.jobs_in_node += 1;
        self.last_arrival = t;
    }

    /// Account a completion: drop the population, remember the time, and —
    /// once warmed up and while the batch log is still filling — advance the
    /// batch counter.
    #[inline]
    pub fn record_completion(&mut self, t: f64) {
        debug_assert!(self.jobs_in_node > 0, "{}: completion with empty node", self.name);
        self.jobs_in_node -= 1;
        self.last_completion = t;
        if !self.warming && !self.batch_log.is_done() {
            self.jobs_in_batch += 1;
        }
    }

    /// Whether the current batch window is full and should be closed.
    #[inline]
    pub fn batch_due(&self) -> bool {
        !self.warming && !self.batch_log.is_done() && self.jobs_in_batch == self.batch_size
    }

    /// Close the batch window at `now`: append a row from the window's
    /// accumulators and open the next window.  The caller passes the window's
    /// aggregated served count and service time (and resets its own sums).
    pub fn close_batch(&mut self, now: f64, served: u64, total_service: f64) {
        self.batch_log.save_row(RowSample {
            area: self.area,
            served,
            total_service,
            last_completion: now,
            window_start: self.window_start,
        });
        self.area.reset();
        self.jobs_in_batch = 0;
        self.window_start = now;
    }

    /// End the warm-up at `now`: discard areas, restart the window.
    pub fn stop_warmup(&mut self, now: f64) {
        self.warming = false;
        self.area.reset();
        self.jobs_in_batch = 0;
        self.window_start = now;
    }

    /// Clear per-replication state; log rows survive.
    pub fn reset(&mut self, start: f64) {
        self.jobs_in_node = 0;
        self.last_arrival = start;
        self.last_completion = start;
        self.window_start = start;
        self.warming = true;
        self.jobs_in_batch = 0;
        self.area.reset();
    }

    /// Append the replication row, unless nothing was served.
    pub fn save_replication_row(&mut self, served: u64, total_service: f64) {
        if served == 0 {
            return;
        }
        self.replication_log.save_row(RowSample {
            area: self.area,
            served,
            total_service,
            last_completion: self.last_completion,
            window_start: self.window_start,
        });
    }
}
