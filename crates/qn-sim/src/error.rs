//! Error types for qn-sim.

use thiserror::Error;

use qn_core::QnError;

/// Errors a driver can surface.  Both variants beyond `Core` are invariant
/// violations — a well-formed network model never produces them.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] QnError),

    #[error("event queue empty before every center finished its batches")]
    EventQueueEmpty,

    #[error("replication stalled: {jobs} jobs in system with no pending events")]
    Stalled { jobs: u64 },
}

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;
