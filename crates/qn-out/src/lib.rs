//! `qn-out` — file emission of simulation results.
//!
//! # What lives here
//!
//! | Module     | Contents                                      |
//! |------------|-----------------------------------------------|
//! | [`row`]    | `StatsRow` — one flattened log row            |
//! | [`writer`] | The `OutputWriter` trait                      |
//! | [`csv`]    | CSV backend                                   |
//! | [`error`]  | `OutputError`, `OutputResult`                 |

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::StatsRow;
pub use writer::OutputWriter;
