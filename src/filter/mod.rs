//! Client-side record filtering and status display mapping.
//!
//! Everything here is pure: records in, records or display attributes out.

pub mod dates;

use std::fmt;

use chrono::{Datelike, FixedOffset, NaiveDate, Offset, Utc};
use serde::Serialize;

use crate::models::{AttendanceRecord, TodoItem};

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month selector value meaning "no month selected".
pub const MONTH_SENTINEL: &str = "Month";

/// The only category filter the screens offer.
pub const FILTER_ALL: &str = "All";

/// Shown wherever a value is missing.
pub const NOT_AVAILABLE: &str = "N/A";

/// 0-based index of a month name in [`MONTHS`].
pub fn month_index(name: &str) -> Option<usize> {
    MONTHS.iter().position(|m| *m == name)
}

/// Records carrying a calendar date.
pub trait Dated {
    fn date(&self) -> &str;
}

impl Dated for AttendanceRecord {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for TodoItem {
    fn date(&self) -> &str {
        &self.date
    }
}

/// Keep records whose date falls in `month_name`, in any year.
///
/// The sentinel [`MONTH_SENTINEL`] returns the input unchanged. A name outside
/// the month table matches nothing, and so does a record with an unparsable date.
pub fn filter_by_month<T: Dated + Clone>(records: &[T], month_name: &str) -> Vec<T> {
    if month_name == MONTH_SENTINEL {
        return records.to_vec();
    }

    let Some(index) = month_index(month_name) else {
        tracing::warn!("Unknown month selection '{}'", month_name);
        return Vec::new();
    };

    records
        .iter()
        .filter(|record| {
            dates::calendar_date(record.date()).map(|d| d.month0() as usize) == Some(index)
        })
        .cloned()
        .collect()
}

/// Which half of an attendance record a status belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    LogIn,
    LogOut,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::LogIn => "log-in",
            Icon::LogOut => "log-out",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon plus colour for a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub icon: Icon,
    pub color: Color,
}

pub const STATUS_ON_TIME: &str = "On Time";
pub const STATUS_IZIN: &str = "Izin";

/// Icon and colour for a status.
///
/// `In` paints "On Time" red and everything else blue. This is the inverse of
/// [`status_text_color`] and is kept as the backend's screens show it.
/// `Out` paints "Izin" red and everything else blue.
pub fn status_to_icon(status: &str, direction: Direction) -> StatusDisplay {
    match direction {
        Direction::In => StatusDisplay {
            icon: Icon::LogIn,
            color: if status == STATUS_ON_TIME {
                Color::Red
            } else {
                Color::Blue
            },
        },
        Direction::Out => StatusDisplay {
            icon: Icon::LogOut,
            color: if status == STATUS_IZIN {
                Color::Red
            } else {
                Color::Blue
            },
        },
    }
}

/// Colour of a status label's text.
pub fn status_text_color(status: &str, direction: Direction) -> Color {
    match direction {
        Direction::In if status == STATUS_ON_TIME => Color::Blue,
        Direction::In => Color::Red,
        Direction::Out if status == STATUS_IZIN => Color::Red,
        Direction::Out => Color::Blue,
    }
}

/// Everything a list row shows for one attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowPresentation {
    pub date_label: String,
    pub label: &'static str,
    pub display: StatusDisplay,
    pub label_color: Color,
}

/// Build the list row for a record.
///
/// The outgoing status decides the icon when present; the label colour always
/// follows the outgoing mapping.
pub fn present_row(record: &AttendanceRecord, offset: &FixedOffset) -> RowPresentation {
    let (label, display) = if record.has_out_status() {
        (
            "Outgoing Presence",
            status_to_icon(&record.out_status, Direction::Out),
        )
    } else {
        (
            "Incoming Presence",
            status_to_icon(&record.in_status, Direction::In),
        )
    };

    let date_label = record
        .check_in
        .as_deref()
        .and_then(|raw| dates::parse_timestamp(raw, offset))
        .map(|stamp| dates::format_long_date(stamp.date_naive()))
        .unwrap_or_else(|| "No date".to_string());

    RowPresentation {
        date_label,
        label,
        display,
        label_color: status_text_color(&record.out_status, Direction::Out),
    }
}

/// Records whose check-in falls on `today` at `offset`.
///
/// Records with a null or unparsable check-in never match.
pub fn todays_records(
    records: &[AttendanceRecord],
    today: NaiveDate,
    offset: &FixedOffset,
) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|record| {
            record
                .check_in
                .as_deref()
                .and_then(|raw| dates::parse_timestamp(raw, offset))
                .map(|stamp| stamp.date_naive() == today)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// The "today" card on the home and profile screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceCard {
    pub in_time: String,
    pub out_time: String,
    pub in_display: StatusDisplay,
    pub out_display: StatusDisplay,
}

impl Default for AttendanceCard {
    fn default() -> Self {
        attendance_card(&[], &Utc.fix())
    }
}

/// Build the card from today's records; only the first one is shown.
pub fn attendance_card(today: &[AttendanceRecord], offset: &FixedOffset) -> AttendanceCard {
    let first = today.first();

    let clock = |raw: Option<&String>| {
        raw.and_then(|r| dates::parse_timestamp(r, offset))
            .map(|stamp| stamp.format(dates::CLOCK_12H_FORMAT).to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    let in_status = first.map(|r| r.in_status.as_str()).unwrap_or(NOT_AVAILABLE);
    let out_status = first.map(|r| r.out_status.as_str()).unwrap_or(NOT_AVAILABLE);

    AttendanceCard {
        in_time: clock(first.and_then(|r| r.check_in.as_ref())),
        out_time: clock(first.and_then(|r| r.check_out.as_ref())),
        in_display: status_to_icon(in_status, Direction::In),
        out_display: status_to_icon(out_status, Direction::Out),
    }
}

/// Number of to-do items whose status is exactly "Completed".
pub fn completed_count(todos: &[TodoItem]) -> usize {
    todos.iter().filter(|t| t.is_completed()).count()
}
