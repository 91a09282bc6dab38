//! Day-of-week handling
//!
//! Ordering and filtering of day lists, plus recognition of a leading day
//! name in a schedule segment such as "Tues: 1-3pm".

use crate::error::{compiled, LazyPattern, Result};
use chrono::Weekday;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sort position for anything that is not a day name
pub const UNKNOWN_DAY_INDEX: usize = 999;

const DAY_NAMES: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

// Longer spellings first: the alternation is leftmost-first.
static DAY_PREFIX: LazyPattern = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*(monday|tuesday|wednesday|thursday|friday|saturday|sunday",
        r"|thurs|thur|thu|tues|tue|weds|wed|mon|fri|sat|sun)\b[\s:,.\-–—]*",
    ))
});

/// Look up a full day name, case-insensitively
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    let name = name.trim();
    DAY_NAMES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, weekday)| *weekday)
}

/// Look up a full day name or one of its usual abbreviations
pub fn weekday_from_token(token: &str) -> Option<Weekday> {
    let token = token.trim().to_lowercase();
    match token.as_str() {
        "tues" => Some(Weekday::Tue),
        "weds" => Some(Weekday::Wed),
        "thur" | "thurs" => Some(Weekday::Thu),
        other => other.parse::<Weekday>().ok(),
    }
}

/// Canonical capitalized name, e.g. "Monday"
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Monday = 0 .. Sunday = 6; anything else sorts last
pub fn day_sort_index(day: &str) -> usize {
    weekday_from_name(day)
        .map(|weekday| weekday.num_days_from_monday() as usize)
        .unwrap_or(UNKNOWN_DAY_INDEX)
}

pub fn is_weekend(day: &str) -> bool {
    matches!(weekday_from_name(day), Some(Weekday::Sat | Weekday::Sun))
}

/// Order a list of day names Monday to Friday.
///
/// Saturday and Sunday are dropped. Unrecognized entries are kept, in their
/// input order, after the weekdays. The original spelling of every entry is
/// preserved.
///
/// # Examples
///
/// ```
/// use hours_normalizer::parser::days::order_days_of_week;
///
/// let ordered = order_days_of_week(&["Friday", "Someday", "monday"]);
/// assert_eq!(ordered, vec!["monday", "Friday", "Someday"]);
/// ```
pub fn order_days_of_week<S: AsRef<str>>(days: &[S]) -> Vec<String> {
    let mut kept: Vec<&str> =
        days.iter().map(AsRef::as_ref).filter(|day| !is_weekend(day)).collect();

    // sort_by_key is stable, unknown entries keep their relative order
    kept.sort_by_key(|day| day_sort_index(day));
    kept.into_iter().map(String::from).collect()
}

/// Split a leading day name off a segment.
///
/// Returns the canonical day and the rest of the segment with the separating
/// punctuation removed.
pub fn split_day_prefix(segment: &str) -> Result<Option<(Weekday, &str)>> {
    let re = compiled(&DAY_PREFIX)?;
    let Some(caps) = re.captures(segment) else {
        return Ok(None);
    };
    let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
        return Ok(None);
    };

    match weekday_from_token(token.as_str()) {
        Some(weekday) => {
            let rest = &segment[whole.end()..];
            if re.is_match(rest) {
                // only one day is taken off the front, so "Mon-Fri" keeps Monday alone
                debug!("Day range in '{}' reduced to {:?}", segment, weekday);
            }
            debug!("Segment '{}' starts with day {:?}, remainder '{}'", segment, weekday, rest);
            Ok(Some((weekday, rest)))
        }
        None => Ok(None),
    }
}
