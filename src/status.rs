//! Completeness status of extracted hours.
//!
//! Two checks live here: a text check over the four raw fields (office time,
//! office location, teaching time, teaching location) and a coarser check
//! over already built slot lists. Both produce a [`ResultStatus`], which is
//! translated into the UI and API vocabularies only at the edges.

use crate::models::TimeSlot;
use crate::parser::time_parser::is_filler_only;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Answers that count as "nothing found" only when they are the whole field
const EXACT_NON_ANSWERS: &[&str] =
    &["n/a", "na", "none", "null", "nil", "-", "--", "?", "no", "unknown"];

/// Phrases that void a field wherever they appear as whole words
const PARTIAL_NON_ANSWERS: &[&str] = &[
    "not specified",
    "not found",
    "not available",
    "not provided",
    "not listed",
    "not mentioned",
    "not stated",
    "not given",
    "no information",
    "no info",
    "no details",
    "unknown",
    "unclear",
    "tbd",
    "tba",
    "to be determined",
    "to be announced",
    "contact for details",
    "contact instructor",
    "information unavailable",
];

/// A vague aside rather than an answer, e.g. "none listed but it states ..."
const HEDGING_MARKERS: &[&str] = &["but it states", "but states", "but mentioned"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    NotFound,
    PartialSuccess,
    Success,
    /// Set by callers after external validation
    Validated,
    /// Set by callers when extraction itself failed
    Error,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultStatus::NotFound => "NOT_FOUND",
            ResultStatus::PartialSuccess => "PARTIAL_SUCCESS",
            ResultStatus::Success => "SUCCESS",
            ResultStatus::Validated => "VALIDATED",
            ResultStatus::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Status names shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UiStatus {
    Validated,
    Found,
    PartialInfoFound,
    NotFound,
    Error,
}

impl From<ResultStatus> for UiStatus {
    fn from(status: ResultStatus) -> Self {
        match status {
            ResultStatus::Validated => UiStatus::Validated,
            ResultStatus::Success => UiStatus::Found,
            ResultStatus::PartialSuccess => UiStatus::PartialInfoFound,
            ResultStatus::NotFound => UiStatus::NotFound,
            ResultStatus::Error => UiStatus::Error,
        }
    }
}

/// Status names used by the batch API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiStatus {
    Success,
    PartialSuccess,
    NotFound,
    Error,
}

impl From<ResultStatus> for ApiStatus {
    fn from(status: ResultStatus) -> Self {
        match status {
            ResultStatus::Validated | ResultStatus::Success => ApiStatus::Success,
            ResultStatus::PartialSuccess => ApiStatus::PartialSuccess,
            ResultStatus::NotFound => ApiStatus::NotFound,
            ResultStatus::Error => ApiStatus::Error,
        }
    }
}

/// Access to the four free-text fields the classifier looks at
pub trait HoursText {
    fn office_time(&self) -> Option<&str>;
    fn office_location(&self) -> Option<&str>;
    fn teaching_time(&self) -> Option<&str>;
    fn teaching_location(&self) -> Option<&str>;
}

/// Borrowed field set, for callers without their own record type
#[derive(Debug, Clone, Copy, Default)]
pub struct HoursFields<'a> {
    pub office_time: Option<&'a str>,
    pub office_location: Option<&'a str>,
    pub teaching_time: Option<&'a str>,
    pub teaching_location: Option<&'a str>,
}

impl HoursText for HoursFields<'_> {
    fn office_time(&self) -> Option<&str> {
        self.office_time
    }

    fn office_location(&self) -> Option<&str> {
        self.office_location
    }

    fn teaching_time(&self) -> Option<&str> {
        self.teaching_time
    }

    fn teaching_location(&self) -> Option<&str> {
        self.teaching_location
    }
}

/// Text classifier with an optional extension of the non-answer list
#[derive(Debug, Clone, Default)]
pub struct StatusClassifier {
    extra_non_answers: Vec<String>,
}

impl StatusClassifier {
    /// Extra phrases are matched like the built-in whole-word ones
    pub fn new<I, S>(extra_non_answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra_non_answers = extra_non_answers
            .into_iter()
            .map(|phrase| phrase.as_ref().trim().to_lowercase())
            .filter(|phrase| !phrase.is_empty())
            .collect();
        Self { extra_non_answers }
    }

    /// A field is valid when it holds an actual answer
    pub fn is_valid_field(&self, value: Option<&str>) -> bool {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return false;
        };
        let lower = value.to_lowercase();

        if EXACT_NON_ANSWERS.contains(&lower.as_str()) {
            return false;
        }
        if PARTIAL_NON_ANSWERS.iter().any(|phrase| contains_phrase(&lower, phrase)) {
            return false;
        }
        if self.extra_non_answers.iter().any(|phrase| contains_phrase(&lower, phrase)) {
            return false;
        }
        if HEDGING_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return false;
        }

        // nothing but filler, e.g. "by appointment"
        match is_filler_only(&lower) {
            Ok(filler) => !filler,
            Err(e) => {
                warn!("Could not check '{}' for filler: {}", value, e);
                true
            }
        }
    }

    /// Decide completeness from the four text fields.
    ///
    /// Complete office information is enough for success. Complete teaching
    /// information alone is only partial.
    pub fn classify<R: HoursText + ?Sized>(&self, record: &R) -> ResultStatus {
        let office_time = self.is_valid_field(record.office_time());
        let office_location = self.is_valid_field(record.office_location());
        let teaching_time = self.is_valid_field(record.teaching_time());
        let teaching_location = self.is_valid_field(record.teaching_location());

        let office_complete = office_time && office_location;
        let teaching_complete = teaching_time && teaching_location;
        let any_valid = office_time || office_location || teaching_time || teaching_location;

        let status = if office_complete {
            ResultStatus::Success
        } else if teaching_complete || any_valid {
            ResultStatus::PartialSuccess
        } else {
            ResultStatus::NotFound
        };
        debug!(
            "Status {} (office complete: {}, teaching complete: {}, any field: {})",
            status, office_complete, teaching_complete, any_valid
        );
        status
    }
}

/// Whole-word containment: "tba" matches "Room TBA" but not "Football"
fn contains_phrase(text: &str, phrase: &str) -> bool {
    text.match_indices(phrase).any(|(start, _)| {
        let end = start + phrase.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Classify with the built-in non-answer list
pub fn determine_result_status<R: HoursText + ?Sized>(record: &R) -> ResultStatus {
    StatusClassifier::default().classify(record)
}

/// Check a single field with the built-in non-answer list
pub fn is_valid_field(value: Option<&str>) -> bool {
    StatusClassifier::default().is_valid_field(value)
}

/// Status from built slot lists: both present is success, one is partial,
/// none is not found.
pub fn status_from_slots(office_hours: &[TimeSlot], teaching_hours: &[TimeSlot]) -> ResultStatus {
    match (office_hours.is_empty(), teaching_hours.is_empty()) {
        (false, false) => ResultStatus::Success,
        (true, true) => ResultStatus::NotFound,
        _ => ResultStatus::PartialSuccess,
    }
}
