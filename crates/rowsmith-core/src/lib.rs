//! Core contracts for rowsmith.
//!
//! This crate defines the synthetic person record, its uniqueness key, the
//! validated record count, and the fixed pools every generator draws from.

pub mod constants;
pub mod count;
pub mod date;
pub mod error;
pub mod record;

pub use constants::{
    CSV_FILENAME, FAMILY_NAMES, GIVEN_NAMES, MAX_AGE, MAX_RECORDS, MIN_AGE,
    SAMPLING_THRESHOLD,
};
pub use count::RecordCount;
pub use date::{birth_year, format_date_of_birth, parse_date_of_birth, DATE_OF_BIRTH_FORMAT};
pub use error::{Error, Result};
pub use record::{initials_of, Record, UniquenessKey};

/// Column titles of the export header, in output order.
pub const EXPORT_HEADER: [&str; 6] = ["Id", "Name", "Surname", "Initials", "Age", "DateOfBirth"];
