//! Time slot builder
//!
//! Converts a day list and a free-text schedule into [`TimeSlot`] records.
//! A schedule without list separators is one range shared by every given
//! day ("uniform" mode). Otherwise it is split on commas and semicolons and
//! each segment may carry its own leading day ("segmented" mode), e.g.
//! "Monday: 2-4pm; Wednesday: 10am-12pm".

use crate::error::Result;
use crate::models::{TimeSlot, DAY_SEPARATOR, NOT_SPECIFIED};
use crate::parser::days::{day_sort_index, order_days_of_week, split_day_prefix, weekday_name};
use crate::parser::time_parser::try_parse_time_string;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COMMENTS: &str = "Weekly office hours";

const LIST_SEPARATORS: [char; 2] = [',', ';'];

/// Values used when a slot has no location or comment of its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefaults {
    pub location: String,
    pub comments: String,
}

impl Default for SlotDefaults {
    fn default() -> Self {
        Self {
            location: NOT_SPECIFIED.to_string(),
            comments: DEFAULT_COMMENTS.to_string(),
        }
    }
}

/// Build time slots with the standard defaults.
///
/// See [`convert_to_time_slots_with`].
pub fn convert_to_time_slots<S: AsRef<str>>(
    days: &[S],
    time_string: &str,
    location: Option<&str>,
    comments: Option<&str>,
) -> Vec<TimeSlot> {
    convert_to_time_slots_with(&SlotDefaults::default(), days, time_string, location, comments)
}

/// Build time slots from a day list and a free-text schedule.
///
/// Never fails. Blank input gives no slots, segments that cannot be parsed
/// are dropped, and internal errors are logged and give no slots.
///
/// # Examples
///
/// ```
/// use hours_normalizer::slots::convert_to_time_slots;
///
/// let slots = convert_to_time_slots(
///     &["Wednesday", "Monday"],
///     "2:00 PM - 4:00 PM",
///     Some("Room 204"),
///     None,
/// );
/// assert_eq!(slots.len(), 1);
/// assert_eq!(slots[0].day_of_week, "Monday|Wednesday");
/// ```
pub fn convert_to_time_slots_with<S: AsRef<str>>(
    defaults: &SlotDefaults,
    days: &[S],
    time_string: &str,
    location: Option<&str>,
    comments: Option<&str>,
) -> Vec<TimeSlot> {
    match try_convert_to_time_slots(defaults, days, time_string, location, comments) {
        Ok(slots) => slots,
        Err(e) => {
            warn!("Failed to build time slots from '{}': {}", time_string, e);
            Vec::new()
        }
    }
}

fn try_convert_to_time_slots<S: AsRef<str>>(
    defaults: &SlotDefaults,
    days: &[S],
    time_string: &str,
    location: Option<&str>,
    comments: Option<&str>,
) -> Result<Vec<TimeSlot>> {
    if time_string.trim().is_empty() {
        return Ok(Vec::new());
    }

    let location = non_blank(location).unwrap_or(defaults.location.as_str()).to_string();
    let comments = Some(non_blank(comments).unwrap_or(defaults.comments.as_str()).to_string());

    let ordered = order_days_of_week(days);
    let all_days = if ordered.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        ordered.join(DAY_SEPARATOR)
    };

    if !days.is_empty() && !time_string.contains(LIST_SEPARATORS) {
        debug!("Uniform schedule for {}: '{}'", all_days, time_string);
        let slot = try_parse_time_string(time_string)?
            .map(|range| TimeSlot::new(range, all_days, location, comments));
        return Ok(slot.into_iter().collect());
    }

    debug!("Segmented schedule: '{}'", time_string);
    let mut slots = Vec::new();
    for segment in time_string.split(LIST_SEPARATORS).map(str::trim).filter(|s| !s.is_empty()) {
        let (day, text) = match split_day_prefix(segment)? {
            Some((weekday, rest)) => (weekday_name(weekday).to_string(), rest),
            None => (all_days.clone(), segment),
        };

        match try_parse_time_string(text)? {
            Some(range) => {
                slots.push(TimeSlot::new(range, day, location.clone(), comments.clone()))
            }
            None => debug!("Dropping unparseable segment '{}'", segment),
        }
    }

    // stable, so slots for the same day keep their input order
    slots.sort_by_key(|slot| day_sort_index(slot.first_day()));
    Ok(slots)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NO_DAYS: [&str; 0] = [];

    fn summary(slots: &[TimeSlot]) -> Vec<String> {
        slots.iter().map(|slot| slot.to_string()).collect()
    }

    #[test]
    fn test_blank_time_string() {
        assert!(convert_to_time_slots(&NO_DAYS, "", Some("Office"), None).is_empty());
        assert!(convert_to_time_slots(&["Monday"], "   ", Some("Office"), None).is_empty());
    }

    #[test]
    fn test_uniform_mode_single_slot() {
        let slots = convert_to_time_slots(
            &["Monday", "Tuesday", "Wednesday"],
            "2:00 PM - 4:00 PM",
            Some("Office"),
            Some("Office hours"),
        );
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].day_of_week, "Monday|Tuesday|Wednesday");
        assert_eq!(slots[0].location, "Office");
        assert_eq!(slots[0].comments.as_deref(), Some("Office hours"));
        assert_eq!(slots[0].range.to_string(), "2:00PM-4:00PM");
    }

    #[test]
    fn test_uniform_mode_orders_and_filters_days() {
        let slots =
            convert_to_time_slots(&["Friday", "Sunday", "Tuesday"], "9am-11am", None, None);
        assert_eq!(summary(&slots), vec!["Tuesday|Friday 9:00AM-11:00AM"]);
    }

    #[test]
    fn test_uniform_mode_parse_failure() {
        assert!(convert_to_time_slots(&["Monday"], "by appointment", None, None).is_empty());
    }

    #[test]
    fn test_uniform_mode_weekend_only() {
        let slots = convert_to_time_slots(&["Saturday"], "10am-12pm", None, None);
        assert_eq!(summary(&slots), vec!["Not specified 10:00AM-12:00PM"]);
    }

    #[test]
    fn test_defaults() {
        let slots = convert_to_time_slots(&["Monday"], "1-2pm", None, Some("  "));
        assert_eq!(slots[0].location, "Not specified");
        assert_eq!(slots[0].comments.as_deref(), Some("Weekly office hours"));

        let defaults = SlotDefaults {
            location: "TBA".to_string(),
            comments: "Weekly teaching hours".to_string(),
        };
        let slots = convert_to_time_slots_with(&defaults, &["Monday"], "1-2pm", None, None);
        assert_eq!(slots[0].location, "TBA");
        assert_eq!(slots[0].comments.as_deref(), Some("Weekly teaching hours"));
    }

    #[test]
    fn test_segmented_mode_per_day() {
        let slots = convert_to_time_slots(
            &NO_DAYS,
            "Monday: 2:00 PM - 4:00 PM; Tuesday: 2:00 PM - 4:00 PM; \
             Wednesday: 2:00 PM - 4:00 PM; Thursday: 2:00 PM - 4:00 PM; \
             Friday: 1:00 PM - 3:00 PM",
            Some("Office"),
            Some("Office hours"),
        );
        assert_eq!(
            summary(&slots),
            vec![
                "Monday 2:00PM-4:00PM",
                "Tuesday 2:00PM-4:00PM",
                "Wednesday 2:00PM-4:00PM",
                "Thursday 2:00PM-4:00PM",
                "Friday 1:00PM-3:00PM",
            ]
        );
    }

    #[test]
    fn test_segmented_mode_sorts_by_day() {
        let slots =
            convert_to_time_slots(&NO_DAYS, "Fri 9-11am, Wed 1-3pm, Mon 10am-12pm", None, None);
        assert_eq!(
            summary(&slots),
            vec!["Monday 10:00AM-12:00PM", "Wednesday 1:00PM-3:00PM", "Friday 9:00AM-11:00AM"]
        );
    }

    #[test]
    fn test_segmented_mode_without_day_prefix() {
        let slots = convert_to_time_slots(&["Thursday", "Tuesday"], "9-10am, 2-3pm", None, None);
        assert_eq!(
            summary(&slots),
            vec!["Tuesday|Thursday 9:00AM-10:00AM", "Tuesday|Thursday 2:00PM-3:00PM"]
        );

        let slots = convert_to_time_slots(&NO_DAYS, "1-3 PM", None, None);
        assert_eq!(summary(&slots), vec!["Not specified 1:00PM-3:00PM"]);
    }

    #[test]
    fn test_segmented_mode_drops_bad_segments() {
        let slots = convert_to_time_slots(
            &NO_DAYS,
            "Monday: 2-4pm; Tuesday: by appointment; ; Thursday: 10am-11am",
            None,
            None,
        );
        assert_eq!(summary(&slots), vec!["Monday 2:00PM-4:00PM", "Thursday 10:00AM-11:00AM"]);
    }

    #[test]
    fn test_day_range_segment_keeps_first_day() {
        let slots = convert_to_time_slots(&NO_DAYS, "Mon-Fri 9am-5pm", None, None);
        assert_eq!(summary(&slots), vec!["Monday 9:00AM-5:00PM"]);
    }

    #[test]
    fn test_unknown_tags_sort_last_and_stay_stable() {
        let slots = convert_to_time_slots(
            &NO_DAYS,
            "3-4pm; Friday: 1-2pm; 9-10am; Monday: 11am-12pm; Monday: 1-2pm",
            None,
            None,
        );
        assert_eq!(
            summary(&slots),
            vec![
                "Monday 11:00AM-12:00PM",
                "Monday 1:00PM-2:00PM",
                "Friday 1:00PM-2:00PM",
                "Not specified 3:00PM-4:00PM",
                "Not specified 9:00AM-10:00AM",
            ]
        );
    }

    #[test]
    fn test_weekend_segment_sorts_after_weekdays() {
        let slots =
            convert_to_time_slots(&NO_DAYS, "Saturday: 10am-12pm; Monday: 1-2pm", None, None);
        assert_eq!(summary(&slots), vec!["Monday 1:00PM-2:00PM", "Saturday 10:00AM-12:00PM"]);
    }

    #[test]
    fn test_slots_round_trip_through_parser() {
        let slots = convert_to_time_slots(
            &NO_DAYS,
            "Monday: 13:00-15:00; Tuesday: 9am to 5 in the evening; Friday: 1 and 3",
            Some("Office"),
            None,
        );
        assert_eq!(slots.len(), 3);
        for slot in &slots {
            let display = slot.to_string();
            let reparsed = crate::parser::parse_time_string(&display);
            assert_eq!(reparsed.time_slot(), Some(&slot.range), "{}", display);
        }
    }
}
