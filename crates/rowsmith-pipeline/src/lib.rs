//! Request-level entry points that drive generation, persistence and export.
//!
//! Callers hand over an unvalidated count and get back either a structured
//! outcome or a [`PipelineError`] naming the stage that failed.

pub mod errors;
pub mod pipeline;

pub use errors::PipelineError;
pub use pipeline::{GenerationOutcome, Pipeline, PipelineStatus};
