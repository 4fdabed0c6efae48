use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_RECORDS;
use crate::error::{Error, Result};

/// Number of records requested for one batch, guaranteed to be in
/// `1..=MAX_RECORDS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct RecordCount(u32);

impl RecordCount {
    pub fn new(value: i64) -> Result<Self> {
        if value <= 0 {
            return Err(Error::InvalidCount(format!(
                "{value} is not positive; expected 1 to {MAX_RECORDS}"
            )));
        }
        if value > i64::from(MAX_RECORDS) {
            return Err(Error::InvalidCount(format!(
                "{value} exceeds the maximum of {MAX_RECORDS}"
            )));
        }
        Ok(Self(value as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl FromStr for RecordCount {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| Error::InvalidCount(format!("'{trimmed}' is not a whole number")))?;
        Self::new(value)
    }
}

impl TryFrom<i64> for RecordCount {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RecordCount> for u32 {
    fn from(value: RecordCount) -> Self {
        value.0
    }
}

impl fmt::Display for RecordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
