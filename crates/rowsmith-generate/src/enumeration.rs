use chrono::NaiveDate;
use tracing::debug;

use rowsmith_core::{birth_year, Record};

use crate::errors::GenerationError;
use crate::pools::{AgeRange, NamePools};

const PROGRESS_EVERY: usize = 10_000;

/// Build `count` records by walking the name pools in order.
///
/// Record `i` uses given name `i mod G` and family name `(i / G) mod F`. Once
/// every pair has been used, the cycle number `i / (G * F)` is appended to the
/// given name, so no two records share a name pair.
pub(crate) fn enumerate(
    count: usize,
    pools: &NamePools,
    ages: AgeRange,
    reference: NaiveDate,
) -> Result<Vec<Record>, GenerationError> {
    let given_len = pools.given.len();
    let family_len = pools.family.len();
    let per_cycle = pools.pair_count();
    let age_span = ages.span();

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let base = &pools.given[i % given_len];
        let family = &pools.family[(i / given_len) % family_len];
        let given = if i >= per_cycle {
            format!("{base}{}", i / per_cycle)
        } else {
            base.clone()
        };

        let age = ages.min() + (i % age_span) as u8;
        let day = 1 + (i % 28) as u32;
        let month = 1 + (i % 12) as u32;
        let year = birth_year(reference, age);
        let date_of_birth = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| GenerationError::Date(format!("{day:02}/{month:02}/{year}")))?;

        records.push(Record::new(
            i as u32 + 1,
            given,
            family.as_str(),
            age,
            date_of_birth,
        ));

        if count > 1_000 && (i + 1) % PROGRESS_EVERY == 0 {
            debug!(generated = i + 1, requested = count, "enumeration progress");
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_starts_after_first_cycle() {
        let pools = NamePools::new(&["Ava", "Mia"], &["Lee", "Chao"]);
        let reference = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap_or_default();
        let records =
            enumerate(9, &pools, AgeRange::default(), reference).expect("enumerate records");

        let names: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.given_name.as_str(), r.family_name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Ava", "Lee"),
                ("Mia", "Lee"),
                ("Ava", "Chao"),
                ("Mia", "Chao"),
                ("Ava1", "Lee"),
                ("Mia1", "Lee"),
                ("Ava1", "Chao"),
                ("Mia1", "Chao"),
                ("Ava2", "Lee"),
            ]
        );
        assert_eq!(records[4].initials, "AL");
    }

    #[test]
    fn dates_follow_index() {
        let reference = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap_or_default();
        let records = enumerate(30, &NamePools::default(), AgeRange::default(), reference)
            .expect("enumerate records");

        let first = &records[0];
        assert_eq!(first.age, 18);
        assert_eq!(
            first.date_of_birth,
            NaiveDate::from_ymd_opt(2008, 1, 1).unwrap_or_default()
        );

        let twenty_ninth = &records[28];
        assert_eq!(twenty_ninth.age, 18 + 28);
        assert_eq!(
            twenty_ninth.date_of_birth,
            NaiveDate::from_ymd_opt(2026 - 46, 5, 1).unwrap_or_default()
        );
    }
}
