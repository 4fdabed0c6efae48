use std::time::Instant;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio::sync::Mutex;
use tracing::{info, warn};

use rowsmith_core::Record;

use crate::errors::StoreError;
use crate::options::StoreOptions;
use crate::store::BatchStore;

mod mapper;
mod queries;

/// Batch store backed by a single SQLite table keyed by `id`.
#[derive(Debug)]
pub struct SqliteBatchStore {
    pool: SqlitePool,
    insert_chunk_size: usize,
    writer: Mutex<()>,
}

impl SqliteBatchStore {
    /// Open (or create) the database file and make sure the table exists.
    pub async fn connect(options: &StoreOptions) -> Result<Self, StoreError> {
        if options.max_connections == 0 {
            return Err(StoreError::InvalidConfig(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if let Some(parent) = options.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|err| {
                    StoreError::InvalidConfig(format!(
                        "cannot create {}: {err}",
                        parent.display()
                    ))
                })?;
            }
        }

        let connect = SqliteConnectOptions::new()
            .filename(&options.database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(options.acquire_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect_with(connect)
            .await?;

        info!(
            event = "store_connected",
            path = %options.database_path.display(),
            max_connections = options.max_connections
        );

        Self::from_pool(pool, options.insert_chunk_size).await
    }

    /// Wrap a pre-configured pool, creating the table if it is missing.
    pub async fn from_pool(pool: SqlitePool, insert_chunk_size: usize) -> Result<Self, StoreError> {
        if insert_chunk_size == 0 {
            return Err(StoreError::InvalidConfig(
                "insert_chunk_size must be at least 1".to_string(),
            ));
        }
        queries::create_table(&pool).await?;
        Ok(Self {
            pool,
            insert_chunk_size,
            writer: Mutex::new(()),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl BatchStore for SqliteBatchStore {
    fn engine(&self) -> &'static str {
        "sqlite"
    }

    async fn replace_all(&self, records: Vec<Record>) -> Result<u64, StoreError> {
        let _writer = self.writer.lock().await;
        let timer = Instant::now();
        let total = records.len();

        let mut tx = self.pool.begin().await?;
        info!(event = "batch_replace_started", records = total);

        match write_batch(&mut tx, &records, self.insert_chunk_size).await {
            Ok(inserted) => {
                tx.commit()
                    .await
                    .map_err(|source| StoreError::Commit { inserted, source })?;
                info!(
                    event = "batch_replaced",
                    inserted,
                    duration_ms = timer.elapsed().as_millis() as u64
                );
                Ok(inserted)
            }
            Err(WriteFailure { inserted, source }) => {
                warn!(event = "batch_replace_failed", inserted, error = %source);
                if let Err(rollback) = tx.rollback().await {
                    return Err(StoreError::Inconsistent {
                        cause: source.to_string(),
                        source: rollback,
                    });
                }
                Err(StoreError::Replace { inserted, source })
            }
        }
    }

    async fn read_all(&self) -> Result<Vec<Record>, StoreError> {
        let rows = queries::select_all(&self.pool).await?;
        let records = mapper::map_records(rows)?;
        info!(event = "batch_read", records = records.len());
        Ok(records)
    }

    fn stream_all(&self) -> BoxStream<'_, Result<Record, StoreError>> {
        queries::stream_rows(&self.pool)
            .map(|row| row.map_err(StoreError::from).and_then(mapper::map_record))
            .boxed()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count = queries::count_rows(&self.pool).await?;
        Ok(count.max(0) as u64)
    }
}

struct WriteFailure {
    inserted: u64,
    source: sqlx::Error,
}

async fn write_batch(
    tx: &mut Transaction<'static, Sqlite>,
    records: &[Record],
    chunk_size: usize,
) -> Result<u64, WriteFailure> {
    let mut inserted = 0_u64;

    let removed = queries::delete_all(&mut **tx)
        .await
        .map_err(|source| WriteFailure { inserted, source })?;
    info!(event = "batch_cleared", removed);

    for chunk in records.chunks(chunk_size) {
        let written = queries::insert_chunk(&mut **tx, chunk)
            .await
            .map_err(|source| WriteFailure { inserted, source })?;
        inserted += written;
    }

    Ok(inserted)
}
