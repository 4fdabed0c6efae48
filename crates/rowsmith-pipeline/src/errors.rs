use std::path::PathBuf;

use thiserror::Error;

use rowsmith_export::ExportError;
use rowsmith_generate::GenerationError;
use rowsmith_store::StoreError;

/// Failure of one pipeline request. Later stages never run after a failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid record count: {0}")]
    InvalidCount(String),
    #[error("generated {generated} of {requested} requested records")]
    PartialGeneration { requested: usize, generated: usize },
    #[error("generation error: {0}")]
    Generation(GenerationError),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("no stored records to export")]
    EmptyBatch,
    #[error("export error: {0}")]
    Export(ExportError),
    #[error("export file not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl PipelineError {
    /// Stable identifier for structured failure responses.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::InvalidCount(_) => "invalid_count",
            PipelineError::PartialGeneration { .. } => "partial_generation",
            PipelineError::Generation(_) => "generation_error",
            PipelineError::Storage(_) => "storage_error",
            PipelineError::EmptyBatch => "empty_batch",
            PipelineError::Export(_) => "export_io_error",
            PipelineError::NotFound(_) => "not_found",
            PipelineError::Io(_) => "io_error",
            PipelineError::Task(_) => "internal_error",
        }
    }
}

impl From<GenerationError> for PipelineError {
    fn from(value: GenerationError) -> Self {
        match value {
            GenerationError::InvalidCount(message) => PipelineError::InvalidCount(message),
            GenerationError::PartialGeneration {
                requested,
                generated,
            } => PipelineError::PartialGeneration {
                requested,
                generated,
            },
            other => PipelineError::Generation(other),
        }
    }
}

impl From<ExportError> for PipelineError {
    fn from(value: ExportError) -> Self {
        match value {
            ExportError::EmptyBatch => PipelineError::EmptyBatch,
            ExportError::Store(err) => PipelineError::Storage(err),
            other => PipelineError::Export(other),
        }
    }
}
