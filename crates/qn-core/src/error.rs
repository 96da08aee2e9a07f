//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into `QnError`
//! via `From` impls, or keep them separate and wrap `QnError` as one variant.
//! Both patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `qn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum QnError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `qn-*` crates.
pub type QnResult<T> = Result<T, QnError>;
