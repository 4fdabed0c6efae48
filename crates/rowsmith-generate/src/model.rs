use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rowsmith_core::{Record, SAMPLING_THRESHOLD};

use crate::errors::GenerationError;

/// Options for the synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for the sampling strategy. A fresh random seed is used when unset.
    pub seed: Option<u64>,
    /// Largest request served by random sampling.
    pub sampling_threshold: usize,
    /// Date ages are measured against. Defaults to today (UTC).
    pub reference_date: Option<NaiveDate>,
    /// Treat an exhausted retry budget as a failure.
    pub strict: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            sampling_threshold: SAMPLING_THRESHOLD,
            reference_date: None,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Sampling,
    Enumeration,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Sampling => "sampling",
            Strategy::Enumeration => "enumeration",
        }
    }
}

/// Shortfall reported when sampling could not reach the requested count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialGeneration {
    pub requested: usize,
    pub generated: usize,
}

/// Output of one `generate` call.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub records: Vec<Record>,
    pub requested: usize,
    pub strategy: Strategy,
    pub attempts: u64,
}

impl Synthesis {
    pub fn shortfall(&self) -> Option<PartialGeneration> {
        (self.records.len() < self.requested).then_some(PartialGeneration {
            requested: self.requested,
            generated: self.records.len(),
        })
    }

    /// Apply the partial-result policy: a shortfall is an error when `strict`
    /// is set or when nothing at all was generated.
    pub fn into_checked(self, strict: bool) -> Result<Self, GenerationError> {
        match self.shortfall() {
            Some(PartialGeneration {
                requested,
                generated,
            }) if strict || generated == 0 => Err(GenerationError::PartialGeneration {
                requested,
                generated,
            }),
            _ => Ok(self),
        }
    }
}
