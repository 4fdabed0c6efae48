use thiserror::Error;

/// Errors emitted by batch stores.
///
/// `Replace` and `Commit` are only returned after the transaction was rolled
/// back; `Inconsistent` means the rollback itself failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
    #[error("batch replace rolled back after {inserted} rows: {source}")]
    Replace { inserted: u64, source: sqlx::Error },
    #[error("batch commit failed after {inserted} rows: {source}")]
    Commit { inserted: u64, source: sqlx::Error },
    #[error("rollback failed, stored batch may be inconsistent ({cause}): {source}")]
    Inconsistent { cause: String, source: sqlx::Error },
    #[error("stored row {id} is malformed: {message}")]
    Decode { id: i64, message: String },
}
