use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::{self, BoxStream};

use rowsmith_core::Record;

use crate::errors::StoreError;

/// Owner of the persisted batch. Exactly one batch is resident at a time.
#[async_trait]
pub trait BatchStore: Send + Sync {
    /// Returns the engine identifier (e.g. `sqlite`).
    fn engine(&self) -> &'static str;

    /// Atomically replace the stored batch with `records`.
    ///
    /// Either every record is stored and the previous batch is gone, or the
    /// previous batch is left untouched. Returns the number of rows written.
    async fn replace_all(&self, records: Vec<Record>) -> Result<u64, StoreError>;

    /// Every stored record, ordered by id.
    async fn read_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Every stored record, ordered by id, without collecting the batch.
    ///
    /// A decode or query error ends the stream.
    fn stream_all(&self) -> BoxStream<'_, Result<Record, StoreError>> {
        stream::once(self.read_all())
            .flat_map(|result| {
                let items: Vec<Result<Record, StoreError>> = match result {
                    Ok(records) => records.into_iter().map(Ok).collect(),
                    Err(err) => vec![Err(err)],
                };
                stream::iter(items)
            })
            .boxed()
    }

    async fn count(&self) -> Result<u64, StoreError>;

    /// Remove the stored batch.
    async fn clear(&self) -> Result<(), StoreError> {
        self.replace_all(Vec::new()).await.map(|_| ())
    }
}
