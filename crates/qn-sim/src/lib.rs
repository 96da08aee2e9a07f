//! `qn-sim` — the drivers that run a queueing network.
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`network`]  | The [`NetworkModel`] trait — the user's topology          |
//! | [`batch`]    | [`BatchRunner`] — one long run, batch-means output        |
//! | [`finite`]   | [`FiniteRunner`] — replicated finite-horizon runs         |
//! | [`observer`] | [`RunObserver`] progress hooks                            |
//! | [`verify`]   | Comparison of estimates against analytical references     |
//! | [`error`]    | `SimError`, `SimResult`                                   |
//!
//! # The event loop
//!
//! Both drivers share the same core discipline: pop the earliest event, stage
//! its time on the clock, integrate every center's areas over the gap, commit
//! the clock, and only then dispatch the event to the network.  Integration
//! strictly precedes the state transition, so the time-weighted integrals are
//! exact for piecewise-constant populations.

pub mod batch;
pub mod error;
pub mod finite;
pub mod network;
pub mod observer;
pub mod verify;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use batch::{BatchOutcome, BatchRunner};
pub use error::{SimError, SimResult};
pub use finite::{FiniteOutcome, FiniteRunner};
pub use network::{NetworkModel, jobs_in_system};
pub use observer::{NoopObserver, RunObserver};
pub use verify::{VerificationResult, verify_center};
