use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use rowsmith_core::{Error as CoreError, RecordCount};
use rowsmith_export::{ExportSummary, Exporter};
use rowsmith_generate::{Strategy, Synthesizer};
use rowsmith_store::BatchStore;

use crate::errors::PipelineError;

/// Result of a successful generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub requested: u32,
    pub record_count: u64,
    pub export_path: PathBuf,
    pub strategy: Strategy,
    /// Set when sampling ran out of retries and fewer records were stored.
    pub partial: bool,
    pub bytes_written: u64,
}

/// Snapshot of the resident batch and export artifact.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStatus {
    pub engine: String,
    pub stored_records: u64,
    pub export_path: PathBuf,
    pub export_bytes: Option<u64>,
}

/// Synthesizer, batch store and exporter wired together.
///
/// Generation requests are serialized; at most one replace is in flight.
pub struct Pipeline {
    synthesizer: Arc<Synthesizer>,
    store: Arc<dyn BatchStore>,
    exporter: Exporter,
    gate: Mutex<()>,
}

impl Pipeline {
    pub fn new(synthesizer: Synthesizer, store: Arc<dyn BatchStore>, exporter: Exporter) -> Self {
        Self {
            synthesizer: Arc::new(synthesizer),
            store,
            exporter,
            gate: Mutex::new(()),
        }
    }

    pub fn export_path(&self) -> &Path {
        self.exporter.path()
    }

    /// Generate `count` records, replace the stored batch and re-export.
    pub async fn request_generation(&self, count: i64) -> Result<GenerationOutcome, PipelineError> {
        let count = RecordCount::new(count).map_err(invalid_count)?;
        self.generate(count).await
    }

    /// Same as [`Pipeline::request_generation`] for unparsed caller input.
    pub async fn request_generation_text(
        &self,
        raw: &str,
    ) -> Result<GenerationOutcome, PipelineError> {
        let count: RecordCount = raw.parse().map_err(invalid_count)?;
        self.generate(count).await
    }

    /// Remove the stored batch. The export artifact is left as is.
    pub async fn request_reset(&self) -> Result<(), PipelineError> {
        let _gate = self.gate.lock().await;
        self.store.clear().await?;
        info!(event = "batch_reset");
        Ok(())
    }

    /// Re-export the stored batch without generating a new one.
    pub async fn request_export(&self) -> Result<ExportSummary, PipelineError> {
        let _gate = self.gate.lock().await;
        Ok(self.exporter.export().await?)
    }

    /// Open the current export artifact for streaming.
    pub async fn request_export_file(&self) -> Result<tokio::fs::File, PipelineError> {
        let path = self.exporter.path();
        match tokio::fs::File::open(path).await {
            Ok(file) => Ok(file),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(PipelineError::NotFound(path.to_path_buf()))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn status(&self) -> Result<PipelineStatus, PipelineError> {
        let stored_records = self.store.count().await?;
        let export_bytes = match tokio::fs::metadata(self.exporter.path()).await {
            Ok(meta) => Some(meta.len()),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };
        Ok(PipelineStatus {
            engine: self.store.engine().to_string(),
            stored_records,
            export_path: self.exporter.path().to_path_buf(),
            export_bytes,
        })
    }

    async fn generate(&self, count: RecordCount) -> Result<GenerationOutcome, PipelineError> {
        let _gate = self.gate.lock().await;
        let timer = Instant::now();
        info!(event = "generation_requested", requested = count.get());

        let synthesizer = Arc::clone(&self.synthesizer);
        let strict = synthesizer.options().strict;
        let synthesis =
            tokio::task::spawn_blocking(move || synthesizer.generate(count.as_usize())).await??;
        let synthesis = synthesis.into_checked(strict)?;

        let partial = match synthesis.shortfall() {
            Some(shortfall) => {
                warn!(
                    event = "partial_generation_accepted",
                    requested = shortfall.requested,
                    generated = shortfall.generated
                );
                true
            }
            None => false,
        };
        let strategy = synthesis.strategy;

        let record_count = self.store.replace_all(synthesis.records).await?;
        let export = self.exporter.export().await?;

        info!(
            event = "generation_finished",
            requested = count.get(),
            record_count,
            strategy = strategy.as_str(),
            partial,
            duration_ms = timer.elapsed().as_millis() as u64
        );

        Ok(GenerationOutcome {
            requested: count.get(),
            record_count,
            export_path: export.path,
            strategy,
            partial,
            bytes_written: export.bytes_written,
        })
    }
}

fn invalid_count(err: CoreError) -> PipelineError {
    match err {
        CoreError::InvalidCount(message) => PipelineError::InvalidCount(message),
        other => PipelineError::InvalidCount(other.to_string()),
    }
}
