use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use futures::TryStreamExt;

use rowsmith_core::Record;
use rowsmith_store::{BatchStore, SqliteBatchStore, StoreError, StoreOptions};

fn temp_db_path(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("rowsmith_store_{label}_{}", uuid::Uuid::new_v4()));
    dir.join("database.sqlite")
}

async fn open_store(label: &str, chunk: usize) -> Result<SqliteBatchStore> {
    let mut options = StoreOptions::new(temp_db_path(label));
    options.insert_chunk_size = chunk;
    SqliteBatchStore::connect(&options)
        .await
        .context("connecting to sqlite")
}

fn record(id: u32, given: &str, family: &str, age: u8) -> Record {
    let date = NaiveDate::from_ymd_opt(2026 - i32::from(age), 1 + id % 12, 1 + id % 28)
        .unwrap_or_default();
    Record::new(id, given, family, age, date)
}

fn batch(len: u32) -> Vec<Record> {
    (1..=len)
        .map(|id| record(id, "Harper", "Wilson", 18 + (id % 60) as u8))
        .collect()
}

#[tokio::test]
async fn replace_then_read_round_trips() -> Result<()> {
    let store = open_store("round_trip", 150).await?;
    let records = batch(5);

    let written = store.replace_all(records.clone()).await?;
    assert_eq!(written, 5);
    assert_eq!(store.read_all().await?, records);
    assert_eq!(store.count().await?, 5);
    Ok(())
}

#[tokio::test]
async fn stream_matches_read_all() -> Result<()> {
    let store = open_store("stream", 150).await?;
    store.replace_all(batch(2_000)).await?;

    let streamed: Vec<Record> = store.stream_all().try_collect().await?;
    assert_eq!(streamed, store.read_all().await?);

    store.clear().await?;
    let empty: Vec<Record> = store.stream_all().try_collect().await?;
    assert!(empty.is_empty());
    Ok(())
}

#[tokio::test]
async fn read_order_is_by_id_not_insert_order() -> Result<()> {
    let store = open_store("order", 2).await?;
    let shuffled = vec![
        record(4, "Ava", "Jones", 30),
        record(1, "Mia", "Lee", 31),
        record(3, "Emma", "Chao", 32),
        record(2, "James", "Brown", 33),
    ];

    store.replace_all(shuffled.clone()).await?;

    let mut expected = shuffled;
    expected.sort_by_key(|record| record.id);
    assert_eq!(store.read_all().await?, expected);
    Ok(())
}

#[tokio::test]
async fn replace_discards_previous_batch() -> Result<()> {
    let store = open_store("replace", 150).await?;
    store.replace_all(batch(10)).await?;

    let next = vec![record(1, "Thabo", "Ndlovu", 50)];
    store.replace_all(next.clone()).await?;

    assert_eq!(store.read_all().await?, next);
    Ok(())
}

#[tokio::test]
async fn large_batch_spans_many_chunks() -> Result<()> {
    let store = open_store("chunks", 150).await?;
    let records = batch(2_501);

    assert_eq!(store.replace_all(records.clone()).await?, 2_501);
    let stored = store.read_all().await?;
    assert_eq!(stored.len(), 2_501);
    assert_eq!(stored.first(), records.first());
    assert_eq!(stored.last(), records.last());
    Ok(())
}

#[tokio::test]
async fn clear_is_idempotent() -> Result<()> {
    let store = open_store("clear", 150).await?;
    store.replace_all(batch(3)).await?;

    store.clear().await?;
    assert!(store.read_all().await?.is_empty());

    store.clear().await?;
    assert!(store.read_all().await?.is_empty());
    assert_eq!(store.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn failed_replace_keeps_previous_batch() -> Result<()> {
    let store = open_store("atomic", 2).await?;
    let previous = batch(4);
    store.replace_all(previous.clone()).await?;

    // The second chunk repeats id 3 and violates the primary key.
    let malformed = vec![
        record(1, "Daniel", "Taylor", 40),
        record(2, "Evelyn", "Martin", 41),
        record(3, "Richard", "Lopez", 42),
        record(3, "Amelia", "Davis", 43),
    ];

    let err = store
        .replace_all(malformed)
        .await
        .expect_err("duplicate id must fail");
    match err {
        StoreError::Replace { inserted, .. } => assert_eq!(inserted, 2),
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(store.read_all().await?, previous);
    Ok(())
}

#[tokio::test]
async fn concurrent_replacements_never_mix_batches() -> Result<()> {
    let store = Arc::new(open_store("concurrent", 50).await?);
    let first: Vec<Record> = (1..=300).map(|id| record(id, "Joseph", "Garcia", 20)).collect();
    let second: Vec<Record> = (1..=200).map(|id| record(id, "Lerato", "Singh", 60)).collect();

    let a = tokio::spawn({
        let store = Arc::clone(&store);
        let first = first.clone();
        async move { store.replace_all(first).await }
    });
    let b = tokio::spawn({
        let store = Arc::clone(&store);
        let second = second.clone();
        async move { store.replace_all(second).await }
    });
    a.await??;
    b.await??;

    let stored = store.read_all().await?;
    assert!(stored == first || stored == second, "batches must not interleave");
    Ok(())
}

#[tokio::test]
async fn zero_chunk_size_is_rejected() -> Result<()> {
    let mut options = StoreOptions::new(temp_db_path("bad_chunk"));
    options.insert_chunk_size = 0;
    let result = SqliteBatchStore::connect(&options).await;
    assert!(matches!(result, Err(StoreError::InvalidConfig(_))));
    Ok(())
}
