use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::csv::{self, CsvError};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

static EMPLOYEE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("employee id must contain only digits")]
    InvalidIdFormat,

    #[error("attendance status must be one of: Present, Absent, On Leave")]
    InvalidStatus,

    #[error("an attendance record for this employee id already exists")]
    DuplicateId,

    #[error("employee id not found")]
    NotFound,
}

/// Validate the three raw input fields and build a record from them.
///
/// Empty checks run for all fields before format checks, matching the order
/// a caller sees the failures in.
pub(crate) fn validate_record(
    employee_id: &str,
    employee_name: &str,
    status: &str,
) -> Result<AttendanceRecord, StoreError> {
    let employee_id = employee_id.trim();
    let employee_name = employee_name.trim();
    let status = status.trim();

    if employee_id.is_empty() {
        return Err(StoreError::EmptyField {
            field: "employee id",
        });
    }
    if employee_name.is_empty() {
        return Err(StoreError::EmptyField {
            field: "employee name",
        });
    }
    if status.is_empty() {
        return Err(StoreError::EmptyField {
            field: "attendance status",
        });
    }
    if !EMPLOYEE_ID_RE.is_match(employee_id) {
        return Err(StoreError::InvalidIdFormat);
    }
    let status = AttendanceStatus::from_str(status).map_err(|_| StoreError::InvalidStatus)?;

    Ok(AttendanceRecord {
        employee_id: employee_id.to_string(),
        employee_name: employee_name.to_string(),
        status,
    })
}

/// In-memory authoritative collection of attendance records, one per
/// employee id, in insertion order. All mutation goes through `add`,
/// `update_status` and `replace_all`; callers only ever see projections.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<AttendanceRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the raw inputs and append a new record. Rejects an id that
    /// is already present, leaving the store unchanged.
    pub fn add(
        &mut self,
        employee_id: &str,
        employee_name: &str,
        status: &str,
    ) -> Result<(), StoreError> {
        let record = validate_record(employee_id, employee_name, status)?;
        if self
            .records
            .iter()
            .any(|r| r.employee_id == record.employee_id)
        {
            return Err(StoreError::DuplicateId);
        }
        self.records.push(record);
        Ok(())
    }

    /// Change the status of the record with the given id, in place. Id and
    /// name are immutable once added; only the status ever changes.
    pub fn update_status(&mut self, employee_id: &str, status: &str) -> Result<(), StoreError> {
        let employee_id = employee_id.trim();
        let status = status.trim();

        if employee_id.is_empty() {
            return Err(StoreError::EmptyField {
                field: "employee id",
            });
        }
        if status.is_empty() {
            return Err(StoreError::EmptyField {
                field: "attendance status",
            });
        }
        if !EMPLOYEE_ID_RE.is_match(employee_id) {
            return Err(StoreError::InvalidIdFormat);
        }
        let status = AttendanceStatus::from_str(status).map_err(|_| StoreError::InvalidStatus)?;

        let record = self
            .records
            .iter_mut()
            .find(|r| r.employee_id == employee_id)
            .ok_or(StoreError::NotFound)?;
        record.status = status;
        Ok(())
    }

    /// Read-only view in insertion order.
    pub fn all(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Display projection: one `(id, name, status-text)` row per record,
    /// in insertion order. No aliasing of store internals.
    pub fn render(&self) -> Vec<(String, String, String)> {
        self.records
            .iter()
            .map(|r| {
                (
                    r.employee_id.clone(),
                    r.employee_name.clone(),
                    r.status.to_string(),
                )
            })
            .collect()
    }

    /// Clear and repopulate wholesale. Used by the load path, which only
    /// hands over records that already passed field validation.
    pub fn replace_all(&mut self, records: Vec<AttendanceRecord>) {
        self.records = records;
    }

    /// Write the current contents to `path`, header first, overwriting any
    /// existing file.
    pub fn save_to(&self, path: &Path) -> Result<(), CsvError> {
        csv::write_records(&self.records, path)
    }

    /// Replace the current contents with the records parsed from `path`.
    /// The file is read and validated in full before anything is installed,
    /// so a failed load leaves the store exactly as it was.
    pub fn load_from(&mut self, path: &Path) -> Result<(), CsvError> {
        let records = csv::read_records(path)?;
        self.replace_all(records);
        Ok(())
    }
}
