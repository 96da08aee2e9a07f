//! The `NetworkModel` trait — the main extension point for user code.

use qn_center::Center;
use qn_core::{Event, EventQueue, RngStreams};

/// A concrete queueing network: which centers exist, how jobs enter, and how
/// events reach their centers.
///
/// The drivers own the clock, the event queue, and the RNG streams; the
/// model owns the centers and the arrival process.  Drivers compute global
/// quantities (total population, warm-up progress, overall completion)
/// generically through [`centers`][Self::centers].
///
/// # Example
///
/// ```rust,ignore
/// impl NetworkModel for Mm1 {
///     type Job = f64;
///
///     fn dispatch(&mut self, event: Event<f64>, queue: &mut EventQueue<f64>, streams: &mut RngStreams) {
///         match event.kind {
///             EventKind::Arrival => {
///                 self.arrivals.schedule_next(event.time, queue, streams);
///                 self.server.process_arrival(event, queue, streams);
///             }
///             EventKind::Completion => self.server.process_completion(event, queue, streams),
///             EventKind::Snapshot => {}
///         }
///     }
///     // ...
/// }
/// ```
pub trait NetworkModel {
    /// The job payload flowing through this network.
    type Job;

    /// Clear per-replication state in every center and the arrival process.
    /// Log rows accumulated so far survive.
    fn reset(&mut self, start: f64);

    /// Schedule the first external arrival(s).
    fn start(&mut self, now: f64, queue: &mut EventQueue<Self::Job>, streams: &mut RngStreams);

    /// Deliver one popped event.  Arrival events for the entry center should
    /// also re-arm the external arrival process.  Snapshot events are handled
    /// by the driver and never reach this method.
    fn dispatch(
        &mut self,
        event:   Event<Self::Job>,
        queue:   &mut EventQueue<Self::Job>,
        streams: &mut RngStreams,
    );

    /// All centers, in a fixed order (log, observation, and report rows
    /// follow this order).
    fn centers(&self) -> Vec<&dyn Center<Self::Job>>;

    fn centers_mut(&mut self) -> Vec<&mut dyn Center<Self::Job>>;

    /// Whether the external arrival process has passed its cutoff.
    fn arrivals_exhausted(&self) -> bool;
}

/// Total jobs currently in the network.
pub fn jobs_in_system<N: NetworkModel>(net: &N) -> u64 {
    net.centers().iter().map(|c| c.jobs_in_node()).sum()
}
