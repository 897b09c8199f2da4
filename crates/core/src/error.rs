//! Error types for hpglkit.

use thiserror::Error;

/// Primary error type for HPGL emission.
///
/// Every variant is fatal to the drawing session that produced it: the
/// session makes no attempt to recover and callers are expected to start
/// over with a fresh one.
#[derive(Error, Debug)]
pub enum HpglError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("matrix stack overflow: cannot push more than {depth} transforms")]
    StackOverflow { depth: usize },

    #[error("matrix stack underflow: pop without matching push")]
    StackUnderflow,

    #[error("precondition violated: {0}")]
    Precondition(String),
}

impl HpglError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }
}

/// Convenience Result type alias for HpglError.
pub type Result<T> = std::result::Result<T, HpglError>;
