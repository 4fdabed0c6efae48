use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};

/// `dd/mm/yyyy`, the on-disk and exported form of a date of birth.
pub const DATE_OF_BIRTH_FORMAT: &str = "%d/%m/%Y";

/// Birth year implied by `age` relative to `reference`.
pub fn birth_year(reference: NaiveDate, age: u8) -> i32 {
    reference.year() - i32::from(age)
}

pub fn format_date_of_birth(date: NaiveDate) -> String {
    date.format(DATE_OF_BIRTH_FORMAT).to_string()
}

pub fn parse_date_of_birth(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_OF_BIRTH_FORMAT)
        .map_err(|_| Error::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_zero_padding() {
        let date = NaiveDate::from_ymd_opt(1990, 3, 7).unwrap_or_default();
        assert_eq!(format_date_of_birth(date), "07/03/1990");
    }

    #[test]
    fn parse_rejects_iso_dates() {
        assert!(matches!(
            parse_date_of_birth("1990-03-07"),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            parse_date_of_birth("31/02/1990"),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn birth_year_subtracts_age() {
        let reference = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap_or_default();
        assert_eq!(birth_year(reference, 18), 2008);
        assert_eq!(birth_year(reference, 85), 1941);
    }
}
