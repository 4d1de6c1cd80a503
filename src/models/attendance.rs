//! Attendance record model.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// One day's check-in/check-out entry as returned by `GET /attendance`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "in", default)]
    pub check_in: Option<String>,
    #[serde(rename = "out", default)]
    pub check_out: Option<String>,
    /// Free-text label such as "On Time"; only used for display
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_status: String,
    /// Free-text label such as "Izin"; only used for display
    #[serde(default, deserialize_with = "null_as_default")]
    pub out_status: String,
}

impl AttendanceRecord {
    /// Whether the record carries an outgoing status.
    pub fn has_out_status(&self) -> bool {
        !self.out_status.is_empty()
    }
}
