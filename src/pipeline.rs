//! Per-instructor normalization
//!
//! Takes the raw strings an upstream extractor produced for one instructor
//! and turns them into slot lists plus a completeness status.

use crate::config::Config;
use crate::models::TimeSlot;
use crate::slots::convert_to_time_slots_with;
use crate::status::{status_from_slots, ApiStatus, HoursText, ResultStatus, UiStatus};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Raw extraction output for one instructor. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawExtraction {
    pub name: Option<String>,
    pub office_days: Option<Vec<String>>,
    pub office_time: Option<String>,
    pub office_location: Option<String>,
    pub office_comments: Option<String>,
    pub teaching_days: Option<Vec<String>>,
    pub teaching_time: Option<String>,
    pub teaching_location: Option<String>,
    pub teaching_comments: Option<String>,
}

impl HoursText for RawExtraction {
    fn office_time(&self) -> Option<&str> {
        self.office_time.as_deref()
    }

    fn office_location(&self) -> Option<&str> {
        self.office_location.as_deref()
    }

    fn teaching_time(&self) -> Option<&str> {
        self.teaching_time.as_deref()
    }

    fn teaching_location(&self) -> Option<&str> {
        self.teaching_location.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub office_hours: Vec<TimeSlot>,
    pub teaching_hours: Vec<TimeSlot>,
    pub status: ResultStatus,
}

impl InstructorRecord {
    pub fn ui_status(&self) -> UiStatus {
        self.status.into()
    }

    pub fn api_status(&self) -> ApiStatus {
        self.status.into()
    }
}

/// Build both slot lists and classify the raw text
pub fn normalize_extraction(raw: &RawExtraction, config: &Config) -> InstructorRecord {
    let office_hours = convert_to_time_slots_with(
        &config.slots.office_defaults(),
        raw.office_days.as_deref().unwrap_or_default(),
        raw.office_time.as_deref().unwrap_or_default(),
        raw.office_location.as_deref(),
        raw.office_comments.as_deref(),
    );
    let teaching_hours = convert_to_time_slots_with(
        &config.slots.teaching_defaults(),
        raw.teaching_days.as_deref().unwrap_or_default(),
        raw.teaching_time.as_deref().unwrap_or_default(),
        raw.teaching_location.as_deref(),
        raw.teaching_comments.as_deref(),
    );
    let status = config.status.classifier().classify(raw);

    debug!(
        "Normalized {}: {} office slots, {} teaching slots, status {}",
        raw.name.as_deref().unwrap_or("<unnamed>"),
        office_hours.len(),
        teaching_hours.len(),
        status
    );
    InstructorRecord {
        name: raw.name.clone(),
        office_hours,
        teaching_hours,
        status,
    }
}

pub fn normalize_batch(raws: &[RawExtraction], config: &Config) -> Vec<InstructorRecord> {
    info!("Normalizing {} extraction(s)", raws.len());
    raws.iter().map(|raw| normalize_extraction(raw, config)).collect()
}

/// Recompute every status from whether its slot lists are empty
pub fn revalidate_statuses(records: &mut [InstructorRecord]) {
    for record in records.iter_mut() {
        let status = status_from_slots(&record.office_hours, &record.teaching_hours);
        if status != record.status {
            debug!(
                "Revalidated {}: {} -> {}",
                record.name.as_deref().unwrap_or("<unnamed>"),
                record.status,
                status
            );
        }
        record.status = status;
    }
}
