use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::StreamExt;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::info;

use rowsmith_core::Record;
use rowsmith_store::{BatchStore, StoreError};

use crate::atomic::write_atomic;
use crate::errors::ExportError;
use crate::output::csv::CsvRecordWriter;

/// Records handed to the file writer per message.
const EXPORT_CHUNK: usize = 1_024;
/// Chunks in flight between the store reader and the file writer.
const EXPORT_BUFFER: usize = 4;

type Chunk = Result<Vec<Record>, StoreError>;

/// Result of a successful export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: u64,
    pub bytes_written: u64,
}

/// Renders the stored batch into a CSV file at a fixed path.
#[derive(Clone)]
pub struct Exporter {
    store: Arc<dyn BatchStore>,
    path: PathBuf,
}

impl Exporter {
    pub fn new(store: Arc<dyn BatchStore>, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stream the stored batch into the export file, replacing it.
    ///
    /// Rows flow from the store to a blocking writer in bounded chunks, so
    /// the batch is never held in memory at once. An empty batch or a store
    /// error mid-stream leaves any previous export in place.
    pub async fn export(&self) -> Result<ExportSummary, ExportError> {
        let timer = Instant::now();
        let (sender, receiver) = mpsc::channel::<Chunk>(EXPORT_BUFFER);
        let path = self.path.clone();
        let writer = tokio::task::spawn_blocking(move || write_chunks(&path, receiver));

        let mut stream = self.store.stream_all();
        let mut chunk = Vec::with_capacity(EXPORT_CHUNK);
        let mut failed = false;
        while let Some(row) = stream.next().await {
            match row {
                Ok(record) => {
                    chunk.push(record);
                    if chunk.len() == EXPORT_CHUNK {
                        let full = std::mem::take(&mut chunk);
                        if sender.send(Ok(full)).await.is_err() {
                            // Writer stopped early; its result carries the error.
                            failed = true;
                            break;
                        }
                    }
                }
                Err(err) => {
                    let _ = sender.send(Err(err)).await;
                    failed = true;
                    break;
                }
            }
        }
        if !failed && !chunk.is_empty() {
            let _ = sender.send(Ok(chunk)).await;
        }
        drop(stream);
        drop(sender);

        let (rows, bytes_written) = writer.await??.ok_or(ExportError::EmptyBatch)?;

        let summary = ExportSummary {
            path: self.path.clone(),
            rows,
            bytes_written,
        };

        info!(
            event = "export_written",
            path = %summary.path.display(),
            rows = summary.rows,
            bytes_written = summary.bytes_written,
            duration_ms = timer.elapsed().as_millis() as u64
        );

        Ok(summary)
    }
}

/// Write received chunks through a temp file. Returns `None` when the channel
/// closes before any record arrives; the target path is then never touched.
fn write_chunks(
    path: &Path,
    mut chunks: mpsc::Receiver<Chunk>,
) -> Result<Option<(u64, u64)>, ExportError> {
    let first = match chunks.blocking_recv() {
        Some(chunk) => chunk?,
        None => return Ok(None),
    };

    write_atomic(path, |file| {
        let mut csv = CsvRecordWriter::new(file)?;
        csv.write_all(&first)?;
        while let Some(chunk) = chunks.blocking_recv() {
            csv.write_all(&chunk?)?;
        }
        let rows = csv.rows();
        Ok((rows, csv.finish()?))
    })
    .map(Some)
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("engine", &self.store.engine())
            .field("path", &self.path)
            .finish()
    }
}
