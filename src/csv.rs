use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::model::attendance::AttendanceRecord;
use crate::store;

pub const HEADER: &str = "EmployeeID,EmployeeName,AttendanceStatus";

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 3 comma-separated fields")]
    MalformedLine { line: usize },

    #[error("line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

/// Write the records to `path` as comma-delimited text, header line first,
/// one record per line. Overwrites the destination. Fields are written as-is;
/// the validation rules keep ids and statuses comma-free, names are assumed so.
pub fn write_records(records: &[AttendanceRecord], path: &Path) -> Result<(), CsvError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{HEADER}")?;
    for record in records {
        writeln!(
            writer,
            "{},{},{}",
            record.employee_id, record.employee_name, record.status
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Read records back from `path`. The first line is skipped as the header
/// (its content is not checked) and blank lines are ignored. Every data line
/// must split into exactly 3 fields and pass the same field validation the
/// store applies on add, plus id uniqueness within the file; the first
/// offending line fails the whole read. Line numbers are 1-based.
pub fn read_records(path: &Path) -> Result<Vec<AttendanceRecord>, CsvError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut records: Vec<AttendanceRecord> = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 {
            // header
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let number = idx + 1;

        let fields: Vec<&str> = line.split(',').collect();
        let [employee_id, employee_name, status] = fields.as_slice() else {
            return Err(CsvError::MalformedLine { line: number });
        };

        let record = store::validate_record(employee_id, employee_name, status).map_err(|e| {
            CsvError::InvalidRecord {
                line: number,
                reason: e.to_string(),
            }
        })?;
        if records.iter().any(|r| r.employee_id == record.employee_id) {
            return Err(CsvError::InvalidRecord {
                line: number,
                reason: format!("duplicate employee id {}", record.employee_id),
            });
        }
        records.push(record);
    }
    Ok(records)
}
