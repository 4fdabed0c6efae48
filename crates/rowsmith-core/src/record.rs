use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::birth_year;

/// A synthetic person, labelled by its position in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    #[serde(rename = "name")]
    pub given_name: String,
    #[serde(rename = "surname")]
    pub family_name: String,
    pub initials: String,
    pub age: u8,
    #[serde(rename = "dateOfBirth", with = "dob_text")]
    pub date_of_birth: NaiveDate,
}

impl Record {
    /// Build a record, deriving initials from the two names.
    pub fn new(
        id: u32,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        age: u8,
        date_of_birth: NaiveDate,
    ) -> Self {
        let given_name = given_name.into();
        let family_name = family_name.into();
        let initials = initials_of(&given_name, &family_name);
        Self {
            id,
            given_name,
            family_name,
            initials,
            age,
            date_of_birth,
        }
    }

    /// The tuple that must be distinct across a batch. `id` is not part of it.
    pub fn key(&self) -> UniquenessKey {
        UniquenessKey {
            given_name: self.given_name.clone(),
            family_name: self.family_name.clone(),
            age: self.age,
            date_of_birth: self.date_of_birth,
        }
    }

    /// Whether `age` matches the birth year relative to `reference`.
    pub fn age_consistent_with(&self, reference: NaiveDate) -> bool {
        self.date_of_birth.year() == birth_year(reference, self.age)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniquenessKey {
    pub given_name: String,
    pub family_name: String,
    pub age: u8,
    pub date_of_birth: NaiveDate,
}

/// First character of each name, concatenated.
pub fn initials_of(given_name: &str, family_name: &str) -> String {
    given_name
        .chars()
        .take(1)
        .chain(family_name.chars().take(1))
        .collect()
}

mod dob_text {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::date::{format_date_of_birth, parse_date_of_birth};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date_of_birth(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date_of_birth(&raw).map_err(serde::de::Error::custom)
    }
}
