use thiserror::Error;

/// Errors emitted by the synthesizer.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid record count: {0}")]
    InvalidCount(String),
    #[error("invalid name pools: {0}")]
    InvalidPools(String),
    #[error("invalid age range: {0}")]
    InvalidAgeRange(String),
    #[error("no calendar date for {0}")]
    Date(String),
    #[error("generated {generated} of {requested} unique records before the retry budget ran out")]
    PartialGeneration { requested: usize, generated: usize },
}
