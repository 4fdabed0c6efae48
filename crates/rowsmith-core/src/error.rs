use thiserror::Error;

/// Core error type shared across rowsmith crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested record count is non-numeric or outside `1..=MAX_RECORDS`.
    #[error("invalid record count: {0}")]
    InvalidCount(String),
    /// A stored or supplied date of birth is not `dd/mm/yyyy`.
    #[error("invalid date of birth '{0}'")]
    InvalidDate(String),
}

/// Convenience alias for results returned by rowsmith crates.
pub type Result<T> = std::result::Result<T, Error>;
