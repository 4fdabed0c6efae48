use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use rowsmith_core::MAX_RECORDS;

use crate::enumeration::enumerate;
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, Strategy, Synthesis};
use crate::pools::{AgeRange, NamePools};
use crate::sampling::sample;

/// Entry point for building a batch of unique records in memory.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    options: GenerateOptions,
    pools: NamePools,
    ages: AgeRange,
}

impl Synthesizer {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            pools: NamePools::default(),
            ages: AgeRange::default(),
        }
    }

    pub fn with_pools(
        options: GenerateOptions,
        pools: NamePools,
        ages: AgeRange,
    ) -> Result<Self, GenerationError> {
        pools.validate()?;
        ages.validate()?;
        Ok(Self {
            options,
            pools,
            ages,
        })
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn strategy_for(&self, count: usize) -> Strategy {
        if count <= self.options.sampling_threshold {
            Strategy::Sampling
        } else {
            Strategy::Enumeration
        }
    }

    /// Generate `count` records with ids `1..=count`.
    ///
    /// Under the sampling strategy the result may be shorter than `count`;
    /// see [`Synthesis::shortfall`].
    pub fn generate(&self, count: usize) -> Result<Synthesis, GenerationError> {
        if count == 0 {
            return Err(GenerationError::InvalidCount(
                "record count must be positive".to_string(),
            ));
        }
        if count > MAX_RECORDS as usize {
            return Err(GenerationError::InvalidCount(format!(
                "{count} exceeds the maximum of {MAX_RECORDS}"
            )));
        }

        let start = Instant::now();
        let reference = self.reference_date();
        let strategy = self.strategy_for(count);

        info!(
            requested = count,
            strategy = strategy.as_str(),
            given_names = self.pools.given.len(),
            family_names = self.pools.family.len(),
            "generation started"
        );

        let (records, attempts) = match strategy {
            Strategy::Sampling => {
                let seed = self.options.seed.unwrap_or_else(rand::random);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                sample(count, &self.pools, self.ages, reference, &mut rng)?
            }
            Strategy::Enumeration => {
                let records = enumerate(count, &self.pools, self.ages, reference)?;
                let attempts = records.len() as u64;
                (records, attempts)
            }
        };

        let synthesis = Synthesis {
            records,
            requested: count,
            strategy,
            attempts,
        };

        if let Some(shortfall) = synthesis.shortfall() {
            warn!(
                requested = shortfall.requested,
                generated = shortfall.generated,
                attempts,
                "retry budget exhausted"
            );
        }

        info!(
            generated = synthesis.records.len(),
            attempts,
            duration_ms = start.elapsed().as_millis() as u64,
            "generation completed"
        );

        Ok(synthesis)
    }

    fn reference_date(&self) -> NaiveDate {
        self.options
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(GenerateOptions::default())
    }
}
