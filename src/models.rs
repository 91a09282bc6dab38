//! Core data types for normalized schedules.
//!
//! `TimeSlotRecord` is the flat shape shared with CRM payloads and stored
//! records; its field names must not change. The richer types serialize
//! through it.

use crate::error::{NormalizeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used when one time range applies to several days
pub const DAY_SEPARATOR: &str = "|";

/// Placeholder for a missing day or location
pub const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    /// Read a meridiem token such as "pm", "P.M." or "a". Only the leading
    /// letter matters.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim_start().chars().next()?.to_ascii_lowercase() {
            'a' => Some(Meridiem::Am),
            'p' => Some(Meridiem::Pm),
            _ => None,
        }
    }

    /// Meridiem of a 24-hour clock hour
    pub fn for_24_hour(hour: u8) -> Self {
        if hour < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 12-hour clock time. The hour is always 1..=12 and the minute 0..=59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    meridiem: Meridiem,
}

impl TimeOfDay {
    /// Build a 12-hour time. An hour of 0 is read as 12.
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self> {
        let hour = if hour == 0 { 12 } else { hour };
        if hour > 12 {
            return Err(NormalizeError::OutOfRange(format!("hour {} on a 12-hour clock", hour)));
        }
        if minute > 59 {
            return Err(NormalizeError::OutOfRange(format!("minute {}", minute)));
        }
        Ok(Self {
            hour,
            minute,
            meridiem,
        })
    }

    /// Convert a 24-hour clock time (0..=23)
    pub fn from_24_hour(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            return Err(NormalizeError::OutOfRange(format!("hour {} on a 24-hour clock", hour)));
        }
        Self::new(hour % 12, minute, Meridiem::for_24_hour(hour))
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Hour without leading zero ("1".."12")
    pub fn hour_string(&self) -> String {
        self.hour.to_string()
    }

    /// Zero-padded minute ("00".."59")
    pub fn minute_string(&self) -> String {
        format!("{:02}", self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}{}", self.hour, self.minute, self.meridiem)
    }
}

/// Start and end of a parsed range. No ordering between the two is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "TimeRangeRecord", try_from = "TimeRangeRecord")]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Flat wire shape of a [`TimeRange`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeRecord {
    pub start_hour: String,
    pub start_minute: String,
    pub start_am_pm: Meridiem,
    pub end_hour: String,
    pub end_minute: String,
    pub end_am_pm: Meridiem,
}

impl From<TimeRange> for TimeRangeRecord {
    fn from(range: TimeRange) -> Self {
        Self {
            start_hour: range.start.hour_string(),
            start_minute: range.start.minute_string(),
            start_am_pm: range.start.meridiem,
            end_hour: range.end.hour_string(),
            end_minute: range.end.minute_string(),
            end_am_pm: range.end.meridiem,
        }
    }
}

impl TryFrom<TimeRangeRecord> for TimeRange {
    type Error = NormalizeError;

    fn try_from(fields: TimeRangeRecord) -> Result<Self> {
        Ok(TimeRange::new(
            crate::validation::validate_time_of_day(
                &fields.start_hour,
                &fields.start_minute,
                fields.start_am_pm,
            )?,
            crate::validation::validate_time_of_day(
                &fields.end_hour,
                &fields.end_minute,
                fields.end_am_pm,
            )?,
        ))
    }
}

/// Outcome of a single parse attempt. A range is present exactly when the
/// parse succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_slot: Option<TimeRange>,
}

impl ParseResult {
    pub fn found(range: TimeRange) -> Self {
        Self {
            success: true,
            time_slot: Some(range),
        }
    }

    pub fn not_found() -> Self {
        Self {
            success: false,
            time_slot: None,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn time_slot(&self) -> Option<&TimeRange> {
        self.time_slot.as_ref()
    }

    pub fn into_time_slot(self) -> Option<TimeRange> {
        self.time_slot
    }
}

impl From<Option<TimeRange>> for ParseResult {
    fn from(range: Option<TimeRange>) -> Self {
        match range {
            Some(range) => ParseResult::found(range),
            None => ParseResult::not_found(),
        }
    }
}

/// One office or teaching hours entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TimeSlotRecord", try_from = "TimeSlotRecord")]
pub struct TimeSlot {
    pub range: TimeRange,
    /// A single day name, or several joined with `|`
    pub day_of_week: String,
    pub location: String,
    pub comments: Option<String>,
}

impl TimeSlot {
    pub fn new(
        range: TimeRange,
        day_of_week: impl Into<String>,
        location: impl Into<String>,
        comments: Option<String>,
    ) -> Self {
        Self {
            range,
            day_of_week: day_of_week.into(),
            location: location.into(),
            comments,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.day_of_week.split(DAY_SEPARATOR)
    }

    /// The day the slot sorts by
    pub fn first_day(&self) -> &str {
        self.days().next().unwrap_or_default()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day_of_week, self.range)
    }
}

/// Flat wire shape of a [`TimeSlot`], as stored and sent to the CRM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotRecord {
    pub start_hour: String,
    pub start_minute: String,
    pub start_am_pm: String,
    pub end_hour: String,
    pub end_minute: String,
    pub end_am_pm: String,
    pub day_of_week: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl From<TimeSlot> for TimeSlotRecord {
    fn from(slot: TimeSlot) -> Self {
        let TimeSlot {
            range,
            day_of_week,
            location,
            comments,
        } = slot;
        Self {
            start_hour: range.start.hour_string(),
            start_minute: range.start.minute_string(),
            start_am_pm: range.start.meridiem.to_string(),
            end_hour: range.end.hour_string(),
            end_minute: range.end.minute_string(),
            end_am_pm: range.end.meridiem.to_string(),
            day_of_week,
            location,
            comments,
        }
    }
}

impl TryFrom<TimeSlotRecord> for TimeSlot {
    type Error = NormalizeError;

    fn try_from(record: TimeSlotRecord) -> Result<Self> {
        crate::validation::validate_slot_record(&record)
    }
}
