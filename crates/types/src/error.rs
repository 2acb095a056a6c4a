use thiserror::Error;

/// Every failure mode the storage engine can surface, per the error-handling
/// design: point lookups turn `NotFound` into an `Option` at the call site,
/// everything else propagates.
#[derive(Error, Debug)]
pub enum Error {
    #[error("not found")]
    NotFound,

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("store is closed")]
    Closed,

    #[error("store is read-only")]
    ReadOnly,

    #[error("batch too large: {0}")]
    BatchTooLarge(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("internal storage error: {0}")]
    Internal(String),
}

impl Error {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Error::InvalidData(msg.into())
    }

    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Error::InvalidKey(msg.into())
    }

    pub fn internal(msg: impl std::fmt::Display) -> Self {
        Error::Internal(msg.to_string())
    }

    /// True for errors that a paginated listing should skip-and-warn on
    /// rather than abort the whole query for (a dangling secondary index).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
