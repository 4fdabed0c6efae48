//! Synthetic record generation for rowsmith.
//!
//! Small requests are sampled at random from the name pools and retried on
//! duplicates; large requests are enumerated deterministically so they never
//! retry.

mod enumeration;
mod sampling;

pub mod engine;
pub mod errors;
pub mod model;
pub mod pools;

pub use engine::Synthesizer;
pub use errors::GenerationError;
pub use model::{GenerateOptions, PartialGeneration, Strategy, Synthesis};
pub use pools::{AgeRange, NamePools};
