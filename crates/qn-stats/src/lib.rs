//! `qn-stats` — measurement and output analysis for the `rust_qn` simulator.
//!
//! # What lives here
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`area`]       | `Area` — time-weighted population integrals            |
//! | [`sums`]       | `ServiceSum` — served count + accumulated service time |
//! | [`log`]        | `MetricKind`, `StatisticsLog`, `MeanReport`            |
//! | [`confidence`] | Student-t confidence intervals                         |
//! | [`validity`]   | Lag-1 autocorrelation check for batch means            |
//! | [`welch`]      | Welch's graphical warm-up procedure                    |
//!
//! Everything here is passive arithmetic over samples the simulation crates
//! feed in; nothing draws random numbers or touches the event queue.

pub mod area;
pub mod confidence;
pub mod log;
pub mod sums;
pub mod validity;
pub mod welch;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use area::Area;
pub use confidence::{ConfidenceInterval, ConfidenceReport};
pub use log::{MeanReport, MetricKind, RowSample, StatisticsLog};
pub use sums::ServiceSum;
pub use validity::{AcfVerdict, acf_verdicts, lag1_autocorrelation};
pub use welch::ObservationSet;
