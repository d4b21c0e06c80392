use crate::api::attendance::{
    AddAttendance, AttendanceListResponse, AttendanceRow, UpdateAttendance,
};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "1.0.0",
        description = r#"
## Attendance Tracker

Tracks one current attendance status per employee and persists the full
set to a flat CSV file.

### Key Features
- **Record Management**
  - Add attendance records, update status, list all records
- **Persistence**
  - Save and reload the whole record set from the configured CSV file

### Data File
`EmployeeID,EmployeeName,AttendanceStatus` header plus one line per record,
comma-delimited, no quoting. The destination path comes from the `DATA_FILE`
environment variable.

### Response Format
- JSON-based RESTful responses

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::add_record,
        crate::api::attendance::update_status,
        crate::api::attendance::list_records,
        crate::api::attendance::save_records,
        crate::api::attendance::load_records
    ),
    components(
        schemas(
            AddAttendance,
            UpdateAttendance,
            AttendanceRow,
            AttendanceListResponse,
            AttendanceRecord,
            AttendanceStatus
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance record management and persistence")
    )
)]
pub struct ApiDoc;
