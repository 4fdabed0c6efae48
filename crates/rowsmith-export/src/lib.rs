//! Tabular export of the stored batch.

pub mod atomic;
pub mod errors;
pub mod exporter;
pub mod output;

pub use atomic::{write_atomic, write_bytes_atomic};
pub use errors::ExportError;
pub use exporter::{ExportSummary, Exporter};
