use rowsmith_core::{parse_date_of_birth, Record};

use crate::errors::StoreError;

use super::queries::RawRecord;

pub fn map_records(rows: Vec<RawRecord>) -> Result<Vec<Record>, StoreError> {
    rows.into_iter().map(map_record).collect()
}

pub fn map_record(row: RawRecord) -> Result<Record, StoreError> {
    let id = u32::try_from(row.id).map_err(|_| decode(row.id, "id out of range"))?;
    let age = u8::try_from(row.age).map_err(|_| decode(row.id, "age out of range"))?;
    let date_of_birth = parse_date_of_birth(&row.date_of_birth)
        .map_err(|err| decode(row.id, &err.to_string()))?;

    Ok(Record {
        id,
        given_name: row.name,
        family_name: row.surname,
        initials: row.initials,
        age,
        date_of_birth,
    })
}

fn decode(id: i64, message: &str) -> StoreError {
    StoreError::Decode {
        id,
        message: message.to_string(),
    }
}
