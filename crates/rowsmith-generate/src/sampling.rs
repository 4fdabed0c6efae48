use std::collections::HashSet;

use chrono::NaiveDate;
use rand::Rng;

use rowsmith_core::{birth_year, Record};

use crate::errors::GenerationError;
use crate::pools::{AgeRange, NamePools};

/// Every draw counts against the budget, accepted or not.
const ATTEMPTS_PER_RECORD: u64 = 10;

/// Draw random records until `count` distinct keys are collected or the
/// budget runs out. Returns the records and the number of draws made.
pub(crate) fn sample(
    count: usize,
    pools: &NamePools,
    ages: AgeRange,
    reference: NaiveDate,
    rng: &mut impl Rng,
) -> Result<(Vec<Record>, u64), GenerationError> {
    let budget = (count as u64).saturating_mul(ATTEMPTS_PER_RECORD);
    let mut records = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);
    let mut attempts = 0_u64;

    while records.len() < count && attempts < budget {
        attempts += 1;

        let given = &pools.given[rng.random_range(0..pools.given.len())];
        let family = &pools.family[rng.random_range(0..pools.family.len())];
        let age = rng.random_range(ages.min()..=ages.max());
        let month = rng.random_range(1..=12_u32);
        let day = rng.random_range(1..=28_u32);
        let year = birth_year(reference, age);
        let date_of_birth = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| GenerationError::Date(format!("{day:02}/{month:02}/{year}")))?;

        let id = records.len() as u32 + 1;
        let record = Record::new(id, given.as_str(), family.as_str(), age, date_of_birth);
        if seen.insert(record.key()) {
            records.push(record);
        }
    }

    Ok((records, attempts))
}
