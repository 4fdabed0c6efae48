use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::StreamExt;
use futures::stream::{self, BoxStream};

use rowsmith_core::Record;
use rowsmith_export::{ExportError, Exporter};
use rowsmith_store::{BatchStore, SqliteBatchStore, StoreError, StoreOptions};

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("rowsmith_export_{label}_{}", uuid::Uuid::new_v4()));
    dir
}

async fn open_store(dir: &Path) -> Result<Arc<dyn BatchStore>> {
    let store = SqliteBatchStore::connect(&StoreOptions::new(dir.join("database.sqlite")))
        .await
        .context("connecting to sqlite")?;
    Ok(Arc::new(store))
}

fn records(len: u32) -> Vec<Record> {
    (1..=len)
        .map(|id| {
            let date = NaiveDate::from_ymd_opt(1990, 1 + id % 12, 1 + id % 28).unwrap_or_default();
            Record::new(id, "Charlotte", "Johnson", 36, date)
        })
        .collect()
}

#[tokio::test]
async fn export_writes_header_and_one_row_per_record() -> Result<()> {
    let dir = temp_dir("rows");
    let store = open_store(&dir).await?;
    store.replace_all(records(5)).await?;

    let exporter = Exporter::new(Arc::clone(&store), dir.join("outputs/output.csv"));
    let summary = exporter.export().await?;

    assert_eq!(summary.rows, 5);
    let text = std::fs::read_to_string(&summary.path)?;
    assert_eq!(summary.bytes_written as usize, text.len());

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Id,Name,Surname,Initials,Age,DateOfBirth");
    assert_eq!(lines[1], "1,Charlotte,Johnson,CJ,36,02/02/1990");
    assert!(lines[5].starts_with("5,"));
    Ok(())
}

#[tokio::test]
async fn export_streams_batches_larger_than_one_chunk() -> Result<()> {
    let dir = temp_dir("large");
    let store = open_store(&dir).await?;
    store.replace_all(records(5_000)).await?;

    let exporter = Exporter::new(Arc::clone(&store), dir.join("output.csv"));
    let summary = exporter.export().await?;
    assert_eq!(summary.rows, 5_000);

    let text = std::fs::read_to_string(exporter.path())?;
    assert_eq!(summary.bytes_written as usize, text.len());
    let ids: Vec<u32> = text
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap_or_default().parse())
        .collect::<Result<_, _>>()?;
    assert_eq!(ids, (1..=5_000).collect::<Vec<u32>>());
    Ok(())
}

#[tokio::test]
async fn export_overwrites_previous_file() -> Result<()> {
    let dir = temp_dir("overwrite");
    let store = open_store(&dir).await?;
    let exporter = Exporter::new(Arc::clone(&store), dir.join("output.csv"));

    store.replace_all(records(8)).await?;
    exporter.export().await?;

    store.replace_all(records(2)).await?;
    exporter.export().await?;

    let text = std::fs::read_to_string(exporter.path())?;
    assert_eq!(text.lines().count(), 3);
    Ok(())
}

#[tokio::test]
async fn empty_batch_fails_and_writes_nothing() -> Result<()> {
    let dir = temp_dir("empty");
    let store = open_store(&dir).await?;
    let exporter = Exporter::new(store, dir.join("output.csv"));

    let result = exporter.export().await;
    assert!(matches!(result, Err(ExportError::EmptyBatch)));
    assert!(!exporter.path().exists());
    Ok(())
}

#[tokio::test]
async fn empty_batch_keeps_previous_export() -> Result<()> {
    let dir = temp_dir("keep");
    let store = open_store(&dir).await?;
    let exporter = Exporter::new(Arc::clone(&store), dir.join("output.csv"));

    store.replace_all(records(3)).await?;
    exporter.export().await?;
    let before = std::fs::read_to_string(exporter.path())?;

    store.clear().await?;
    assert!(matches!(
        exporter.export().await,
        Err(ExportError::EmptyBatch)
    ));
    assert_eq!(std::fs::read_to_string(exporter.path())?, before);
    Ok(())
}

struct UnreadableStore;

#[async_trait]
impl BatchStore for UnreadableStore {
    fn engine(&self) -> &'static str {
        "unreadable"
    }

    async fn replace_all(&self, _records: Vec<Record>) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn read_all(&self) -> Result<Vec<Record>, StoreError> {
        Err(StoreError::Decode {
            id: 1,
            message: "corrupt row".to_string(),
        })
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(0)
    }
}

/// Yields `good` records, then a decode error.
struct TruncatedStore {
    good: u32,
}

#[async_trait]
impl BatchStore for TruncatedStore {
    fn engine(&self) -> &'static str {
        "truncated"
    }

    async fn replace_all(&self, _records: Vec<Record>) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn read_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(records(self.good))
    }

    fn stream_all(&self) -> BoxStream<'_, Result<Record, StoreError>> {
        let failure = StoreError::Decode {
            id: i64::from(self.good) + 1,
            message: "corrupt row".to_string(),
        };
        stream::iter(records(self.good).into_iter().map(Ok))
            .chain(stream::iter([Err(failure)]))
            .boxed()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(u64::from(self.good))
    }
}

#[tokio::test]
async fn failure_mid_stream_keeps_previous_export() -> Result<()> {
    let dir = temp_dir("truncated");
    let path = dir.join("output.csv");
    let store = open_store(&dir).await?;
    store.replace_all(records(3)).await?;
    Exporter::new(store, path.clone()).export().await?;
    let before = std::fs::read_to_string(&path)?;

    let exporter = Exporter::new(Arc::new(TruncatedStore { good: 3_000 }), path.clone());
    assert!(matches!(
        exporter.export().await,
        Err(ExportError::Store(StoreError::Decode { id: 3_001, .. }))
    ));
    assert_eq!(std::fs::read_to_string(&path)?, before);
    Ok(())
}

#[tokio::test]
async fn store_failures_surface_as_store_errors() -> Result<()> {
    let dir = temp_dir("unreadable");
    let exporter = Exporter::new(Arc::new(UnreadableStore), dir.join("output.csv"));

    assert!(matches!(
        exporter.export().await,
        Err(ExportError::Store(StoreError::Decode { .. }))
    ));
    assert!(!exporter.path().exists());
    Ok(())
}
