use futures::stream::BoxStream;
use sqlx::sqlite::Sqlite;
use sqlx::{QueryBuilder, SqliteConnection, SqlitePool};

use rowsmith_core::{format_date_of_birth, Record};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS csv_import (
      id INTEGER PRIMARY KEY,
      name TEXT NOT NULL,
      surname TEXT NOT NULL,
      initials TEXT NOT NULL,
      age INTEGER NOT NULL,
      dateOfBirth TEXT NOT NULL
    )
"#;

const INSERT_PREFIX: &str =
    "INSERT INTO csv_import (id, name, surname, initials, age, dateOfBirth) ";

#[derive(Debug, sqlx::FromRow)]
pub struct RawRecord {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub initials: String,
    pub age: i64,
    #[sqlx(rename = "dateOfBirth")]
    pub date_of_birth: String,
}

pub async fn create_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TABLE).execute(pool).await?;
    Ok(())
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM csv_import").execute(conn).await?;
    Ok(result.rows_affected())
}

/// Insert `records` with one multi-row statement.
pub async fn insert_chunk(
    conn: &mut SqliteConnection,
    records: &[Record],
) -> Result<u64, sqlx::Error> {
    if records.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(INSERT_PREFIX);
    builder.push_values(records, |mut row, record| {
        row.push_bind(i64::from(record.id))
            .push_bind(record.given_name.as_str())
            .push_bind(record.family_name.as_str())
            .push_bind(record.initials.as_str())
            .push_bind(i64::from(record.age))
            .push_bind(format_date_of_birth(record.date_of_birth));
    });

    let result = builder.build().execute(conn).await?;
    Ok(result.rows_affected())
}

const SELECT_ALL: &str = r#"
    SELECT id, name, surname, initials, age, dateOfBirth
    FROM csv_import
    ORDER BY id
"#;

pub async fn select_all(pool: &SqlitePool) -> Result<Vec<RawRecord>, sqlx::Error> {
    sqlx::query_as::<_, RawRecord>(SELECT_ALL)
        .fetch_all(pool)
        .await
}

/// Rows of one `SELECT`, so a concurrent replace is never seen half-way.
pub fn stream_rows(pool: &SqlitePool) -> BoxStream<'_, Result<RawRecord, sqlx::Error>> {
    sqlx::query_as::<_, RawRecord>(SELECT_ALL).fetch(pool)
}

pub async fn count_rows(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM csv_import")
        .fetch_one(pool)
        .await
}
