use std::collections::HashSet;

use rowsmith_core::{FAMILY_NAMES, GIVEN_NAMES, MAX_AGE, MIN_AGE};

use crate::errors::GenerationError;

/// Name pools the strategies draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePools {
    pub given: Vec<String>,
    pub family: Vec<String>,
}

impl Default for NamePools {
    fn default() -> Self {
        Self::new(GIVEN_NAMES, FAMILY_NAMES)
    }
}

impl NamePools {
    pub fn new(given: &[&str], family: &[&str]) -> Self {
        Self {
            given: given.iter().map(|name| name.to_string()).collect(),
            family: family.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Number of distinct (given, family) pairs.
    pub fn pair_count(&self) -> usize {
        self.given.len() * self.family.len()
    }

    pub(crate) fn validate(&self) -> Result<(), GenerationError> {
        check_pool("given", &self.given)?;
        check_pool("family", &self.family)
    }
}

fn check_pool(label: &str, pool: &[String]) -> Result<(), GenerationError> {
    if pool.is_empty() {
        return Err(GenerationError::InvalidPools(format!(
            "{label} name pool is empty"
        )));
    }
    let mut seen = HashSet::with_capacity(pool.len());
    for name in pool {
        if name.is_empty() {
            return Err(GenerationError::InvalidPools(format!(
                "{label} name pool contains an empty name"
            )));
        }
        // Enumeration appends digits to given names, so a trailing digit could
        // collide with a suffixed name.
        if name.ends_with(|c: char| c.is_ascii_digit()) {
            return Err(GenerationError::InvalidPools(format!(
                "{label} name '{name}' ends with a digit"
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(GenerationError::InvalidPools(format!(
                "{label} name '{name}' appears twice"
            )));
        }
    }
    Ok(())
}

/// Inclusive age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: u8,
    max: u8,
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            min: MIN_AGE,
            max: MAX_AGE,
        }
    }
}

impl AgeRange {
    pub fn new(min: u8, max: u8) -> Result<Self, GenerationError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub(crate) fn validate(&self) -> Result<(), GenerationError> {
        if self.min > self.max {
            return Err(GenerationError::InvalidAgeRange(format!(
                "min {} is greater than max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Number of distinct ages in the range.
    pub fn span(&self) -> usize {
        usize::from(self.max - self.min) + 1
    }

    pub fn contains(&self, age: u8) -> bool {
        (self.min..=self.max).contains(&age)
    }
}
