use std::path::PathBuf;
use std::time::Duration;

/// Options that control how the SQLite store connects and writes.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Rows per multi-row `INSERT`. Six parameters are bound per row.
    pub insert_chunk_size: usize,
}

impl StoreOptions {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("database.sqlite"),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
            insert_chunk_size: 150,
        }
    }
}
