//! Routing policies — where a completed job goes next.

use qn_core::{EventQueue, RngStreams};

/// Decides the fate of a job leaving a center.
///
/// The policy receives the job by value and pushes zero or more arrival
/// events for downstream centers (including feedback to an upstream center).
/// Pushing nothing means the job leaves the network.
///
/// Implemented for closures, so a network model can wire its topology
/// inline:
///
/// ```rust,ignore
/// let routing = move |job, now, queue: &mut EventQueue<_>, streams: &mut RngStreams| {
///     streams.select_stream(ROUTING_STREAM);
///     if dists::bernoulli(P_ACCEPT, streams) {
///         queue.push(Event::arrival(NEXT, now, job));
///     }
/// };
/// ```
pub trait Routing<J> {
    fn route(&mut self, job: J, now: f64, queue: &mut EventQueue<J>, streams: &mut RngStreams);
}

impl<J, F> Routing<J> for F
where
    F: FnMut(J, f64, &mut EventQueue<J>, &mut RngStreams),
{
    fn route(&mut self, job: J, now: f64, queue: &mut EventQueue<J>, streams: &mut RngStreams) {
        self(job, now, queue, streams)
    }
}

/// Terminal routing: every job leaves the network.
pub struct Sink;

impl<J> Routing<J> for Sink {
    fn route(&mut self, _job: J, _now: f64, _queue: &mut EventQueue<J>, _streams: &mut RngStreams) {}
}
