//! `qn-center` — the service centers a queueing network is assembled from.
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`center`]   | The [`Center`] trait and shared [`CenterState`]          |
//! | [`single`]   | [`SingleServer`] — FCFS, one server                      |
//! | [`multi`]    | [`MultiServer`] — FCFS, `c` servers, longest-idle pick   |
//! | [`infinite`] | [`InfiniteServer`] — pure delay station                  |
//! | [`service`]  | [`ServiceTime`] samplers (exponential, uniform, …)       |
//! | [`routing`]  | [`Routing`] policies — where completed jobs go next      |
//! | [`arrivals`] | [`ArrivalProcess`] — the external Poisson source         |
//!
//! # Design
//!
//! The three disciplines are siblings behind one object-safe trait, not a
//! hierarchy: shared bookkeeping (population count, measurement windows,
//! areas, logs) is *composed* into each via [`CenterState`], and each
//! discipline owns its own queueing structure outright.  Job payloads are
//! moved — into the waiting line, into a completion event, out through the
//! routing policy — never aliased.

pub mod arrivals;
pub mod center;
pub mod infinite;
pub mod multi;
pub mod routing;
pub mod service;
pub mod single;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arrivals::ArrivalProcess;
pub use center::{Center, CenterState};
pub use infinite::InfiniteServer;
pub use multi::MultiServer;
pub use routing::{Routing, Sink};
pub use service::{Exponential, ServiceTime, TruncatedLogNormal, Uniform};
pub use single::SingleServer;
