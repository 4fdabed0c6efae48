use thiserror::Error;

use rowsmith_store::StoreError;

/// Errors emitted by the exporter.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no stored records to export")]
    EmptyBatch,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("invalid export path: {0}")]
    InvalidPath(String),
}
