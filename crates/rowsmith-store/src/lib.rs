//! Persistence for the resident record batch.

pub mod errors;
pub mod options;
pub mod sqlite;
pub mod store;

pub use errors::StoreError;
pub use options::StoreOptions;
pub use sqlite::SqliteBatchStore;
pub use store::BatchStore;
