//! `qn-core` — foundational types for the `rust_qn` queueing-network simulator.
//!
//! This crate is a dependency of every other `qn-*` crate.  It intentionally
//! has no `qn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `CenterId`                                                |
//! | [`rng`]     | `RngStreams` — 256-lane Lehmer generator                  |
//! | [`dists`]   | Variate generators over a selected lane                   |
//! | [`clock`]   | `SimClock` — two-register continuous event clock          |
//! | [`event`]   | `Event`, `EventKind`                                      |
//! | [`queue`]   | `EventQueue` — time-ordered, FIFO on ties                 |
//! | [`config`]  | `SimConfig`                                               |
//! | [`error`]   | `QnError`, `QnResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to configuration and ID types. |

pub mod clock;
pub mod config;
pub mod dists;
pub mod error;
pub mod event;
pub mod ids;
pub mod queue;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::SimClock;
pub use config::SimConfig;
pub use error::{QnError, QnResult};
pub use event::{Event, EventKind};
pub use ids::CenterId;
pub use queue::EventQueue;
pub use rng::RngStreams;
