//! The external arrival source.

use qn_core::{CenterId, Event, EventQueue, RngStreams, dists};

/// Poisson arrival process feeding one entry center.
///
/// Inter-arrival gaps are exponential, drawn on the process's own lane.  The
/// job factory builds each arriving payload (it may draw on lanes of its
/// own).  Past `stop_time` no further arrival is scheduled and the process
/// reports itself exhausted — the finite-horizon termination condition.
/// Batch-means runs pass `f64::INFINITY` as the cutoff.
pub struct ArrivalProcess<J> {
    entry:             CenterId,
    mean_interarrival: f64,
    stream:            usize,
    stop_time:         f64,
    exhausted:         bool,
    factory:           Box<dyn FnMut(f64, &mut RngStreams) -> J>,
}

impl<J> ArrivalProcess<J> {
    pub fn new(
        entry:             CenterId,
        mean_interarrival: f64,
        stream:            usize,
        stop_time:         f64,
        factory:           Box<dyn FnMut(f64, &mut RngStreams) -> J>,
    ) -> Self {
        ArrivalProcess {
            entry,
            mean_interarrival,
            stream,
            stop_time,
            exhausted: false,
            factory,
        }
    }

    /// Reset the cutoff flag and schedule the first arrival after `now`.
    pub fn start(&mut self, now: f64, queue: &mut EventQueue<J>, streams: &mut RngStreams) {
        self.exhausted = false;
        self.schedule_next(now, queue, streams);
    }

    /// Draw the next gap and schedule one arrival, or mark the process
    /// exhausted if it would land past the cutoff.
    ///
    /// Call exactly once per external arrival dispatched, so there is always
    /// at most one pending external arrival.
    pub fn schedule_next(&mut self, now: f64, queue: &mut EventQueue<J>, streams: &mut RngStreams) {
        if self.exhausted {
            return;
        }
        streams.select_stream(self.stream);
        let t = now + dists::exponential(self.mean_interarrival, streams);
        if t > self.stop_time {
            self.exhausted = true;
            return;
        }
        let job = (self.factory)(t, streams);
        queue.push(Event::arrival(self.entry, t, job));
    }

    /// Whether the cutoff has been reached.
    #[inline]
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// The center this process feeds.
    #[inline]
    pub fn entry(&self) -> CenterId {
        self.entry
    }
}
