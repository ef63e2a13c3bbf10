//! Session storage errors
//!
//! Only storage backends return these. The session store logs them and
//! carries on, so callers never see a storage failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be parsed or written as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
