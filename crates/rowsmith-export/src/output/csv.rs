use std::io::Write;

use rowsmith_core::{format_date_of_birth, Record, EXPORT_HEADER};

/// Incremental CSV output: header on creation, rows as they arrive.
pub struct CsvRecordWriter<W: Write> {
    inner: csv::Writer<CountingWriter<W>>,
    rows: u64,
}

impl<W: Write> CsvRecordWriter<W> {
    pub fn new(writer: W) -> Result<Self, csv::Error> {
        let mut inner = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(CountingWriter::new(writer));
        inner.write_record(EXPORT_HEADER)?;
        Ok(Self { inner, rows: 0 })
    }

    pub fn write(&mut self, record: &Record) -> Result<(), csv::Error> {
        self.inner.write_record([
            record.id.to_string(),
            record.given_name.clone(),
            record.family_name.clone(),
            record.initials.clone(),
            record.age.to_string(),
            format_date_of_birth(record.date_of_birth),
        ])?;
        self.rows += 1;
        Ok(())
    }

    pub fn write_all(&mut self, records: &[Record]) -> Result<(), csv::Error> {
        records.iter().try_for_each(|record| self.write(record))
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush buffered rows and return the total bytes written.
    pub fn finish(mut self) -> Result<u64, csv::Error> {
        self.inner.flush()?;
        let counting = self.inner.into_inner().map_err(|err| err.into_error())?;
        Ok(counting.bytes_written())
    }
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let date = NaiveDate::from_ymd_opt(1979, 2, 9).unwrap_or_default();
        let records = vec![
            Record::new(1, "Sophia", "Hernandez", 47, date),
            Record::new(2, "O'Brien, Jr", "Lee", 47, date),
        ];

        let mut buffer = Vec::new();
        let mut writer = CsvRecordWriter::new(&mut buffer).expect("write header");
        writer.write_all(&records).expect("write rows");
        assert_eq!(writer.rows(), 2);
        let bytes = writer.finish().expect("flush csv");
        let text = String::from_utf8(buffer).expect("utf8 output");

        assert_eq!(bytes as usize, text.len());
        assert_eq!(
            text,
            "Id,Name,Surname,Initials,Age,DateOfBirth\n\
             1,Sophia,Hernandez,SH,47,09/02/1979\n\
             2,\"O'Brien, Jr\",Lee,OL,47,09/02/1979\n"
        );
    }
}
