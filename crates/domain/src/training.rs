//! Training samples handed to the external gesture recommender.

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use crate::event::EventRecord;
use crate::status::fields;

/// Placeholder for a feature the record does not carry.
pub const UNKNOWN: &str = "unknown";

/// One labelled row of the training dataset.
///
/// Features describe the context a gesture was used in; `gesture` is the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub hour: u32,
    /// Day of the week, Monday = 0.
    pub weekday: u32,
    pub device: String,
    pub power: String,
    pub fan_mode: String,
    pub wind_power: String,
    pub color: String,
    pub gesture: String,
}

impl From<&EventRecord> for TrainingSample {
    fn from(record: &EventRecord) -> Self {
        let status = record.status.as_ref();
        let log_field = |name: &str| {
            status
                .and_then(|s| s.field(name))
                .unwrap_or(UNKNOWN)
                .to_string()
        };
        Self {
            hour: record.timestamp.hour(),
            weekday: record.timestamp.weekday().num_days_from_monday(),
            device: record.device.to_string(),
            power: status.map_or_else(|| UNKNOWN.to_string(), |s| s.power.to_string()),
            fan_mode: log_field(fields::FAN_MODE),
            wind_power: log_field(fields::WIND_POWER),
            color: log_field(fields::COLOR),
            gesture: record.gesture.to_string(),
        }
    }
}

/// Build the dataset from the event history, skipping unlabelled records.
#[must_use]
pub fn dataset<'a>(events: impl IntoIterator<Item = &'a EventRecord>) -> Vec<TrainingSample> {
    events
        .into_iter()
        .filter(|e| !e.gesture.is_blank())
        .map(TrainingSample::from)
        .collect()
}
