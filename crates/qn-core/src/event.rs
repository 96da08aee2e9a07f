//! The event record flowing through the simulation.

use crate::CenterId;

/// What an [`Event`] asks the network to do.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A job arrives at `center` (external or routed from another center).
    Arrival,
    /// A service completes at `center`.
    Completion,
    /// A driver-level observation point; belongs to no center.
    Snapshot,
}

/// One scheduled occurrence, generic over the job payload `J`.
///
/// `service` and `server` are meaningful only for completions: the sampled
/// service time being repaid and, for multi-server centers, which server
/// finished.  `job` is the payload being carried; snapshots carry none.
#[derive(Clone, Debug)]
pub struct Event<J> {
    pub kind:    EventKind,
    pub center:  CenterId,
    pub time:    f64,
    pub service: f64,
    pub server:  Option<usize>,
    pub job:     Option<J>,
}

impl<J> Event<J> {
    /// An arrival of `job` at `center` at time `time`.
    pub fn arrival(center: CenterId, time: f64, job: J) -> Self {
        Event {
            kind: EventKind::Arrival,
            center,
            time,
            service: 0.0,
            server: None,
            job: Some(job),
        }
    }

    /// A completion at `center` after `service` time units, optionally on a
    /// specific server.
    pub fn completion(
        center:  CenterId,
        time:    f64,
        service: f64,
        server:  Option<usize>,
        job:     J,
    ) -> Self {
        Event {
            kind: EventKind::Completion,
            center,
            time,
            service,
            server,
            job: Some(job),
        }
    }

    /// An observation point at `time`.
    pub fn snapshot(time: f64) -> Self {
        Event {
            kind:    EventKind::Snapshot,
            center:  CenterId::INVALID,
            time,
            service: 0.0,
            server:  None,
            job:     None,
        }
    }
}
