use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Attendance state for a single employee. The display form is what the
/// CSV file and the API rows carry; `OnLeave` renders as "On Leave" but
/// parses from either spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[strum(to_string = "On Leave", serialize = "OnLeave")]
    #[serde(rename = "On Leave", alias = "OnLeave")]
    OnLeave,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "101")]
    pub employee_id: String,

    #[schema(example = "Jane Doe")]
    pub employee_name: String,

    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}
