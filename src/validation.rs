//! Validation functions for time slot records received from outside.
//
// Stored records and API payloads carry hours and minutes as strings. These
// helpers check the exact string shape before a record is trusted.

use crate::error::{compiled, LazyPattern, NormalizeError, Result};
use crate::models::{Meridiem, TimeOfDay, TimeRange, TimeSlot, TimeSlotRecord};
use once_cell::sync::Lazy;
use regex::Regex;

static HOUR_FORMAT: LazyPattern = Lazy::new(|| Regex::new(r"^(?:[1-9]|1[0-2])$"));
static MINUTE_FORMAT: LazyPattern = Lazy::new(|| Regex::new(r"^[0-5]\d$"));

/// Validate hour has format "1".."12" with no leading zero
pub fn validate_hour_format(hour: &str) -> bool {
    compiled(&HOUR_FORMAT).map(|re| re.is_match(hour)).unwrap_or(false)
}

/// Validate minute has format "00".."59"
pub fn validate_minute_format(minute: &str) -> bool {
    compiled(&MINUTE_FORMAT).map(|re| re.is_match(minute)).unwrap_or(false)
}

/// Accept only the canonical "AM" / "PM" spellings
pub fn validate_meridiem(meridiem: &str) -> Result<Meridiem> {
    match meridiem {
        "AM" => Ok(Meridiem::Am),
        "PM" => Ok(Meridiem::Pm),
        other => Err(NormalizeError::InvalidRecord(format!("meridiem '{}'", other))),
    }
}

pub fn validate_time_of_day(hour: &str, minute: &str, meridiem: Meridiem) -> Result<TimeOfDay> {
    if !validate_hour_format(hour) {
        return Err(NormalizeError::InvalidRecord(format!("hour '{}'", hour)));
    }
    if !validate_minute_format(minute) {
        return Err(NormalizeError::InvalidRecord(format!("minute '{}'", minute)));
    }
    let hour: u8 = hour
        .parse()
        .map_err(|_| NormalizeError::InvalidRecord(format!("hour '{}'", hour)))?;
    let minute: u8 = minute
        .parse()
        .map_err(|_| NormalizeError::InvalidRecord(format!("minute '{}'", minute)))?;
    TimeOfDay::new(hour, minute, meridiem)
}

/// Check a wire record and turn it into a [`TimeSlot`]
pub fn validate_slot_record(record: &TimeSlotRecord) -> Result<TimeSlot> {
    let start = validate_time_of_day(
        &record.start_hour,
        &record.start_minute,
        validate_meridiem(&record.start_am_pm)?,
    )?;
    let end = validate_time_of_day(
        &record.end_hour,
        &record.end_minute,
        validate_meridiem(&record.end_am_pm)?,
    )?;
    if record.day_of_week.trim().is_empty() {
        return Err(NormalizeError::InvalidRecord("empty dayOfWeek".to_string()));
    }

    Ok(TimeSlot::new(
        TimeRange::new(start, end),
        record.day_of_week.clone(),
        record.location.clone(),
        record.comments.clone(),
    ))
}
