//! Usage statistics aggregated from the event history.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{HubError, ValidationError};
use crate::event::EventRecord;
use crate::time::Timestamp;

/// Gesture usage of one device over a time range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceUsage {
    pub count: u64,
    /// Share of all events in the range, in percent, rounded to one decimal.
    pub ratio: f64,
    pub gestures: BTreeMap<String, u64>,
}

/// Per-device gesture counts and percentage ratios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureStatistics {
    pub from: Timestamp,
    pub to: Timestamp,
    pub total: u64,
    pub devices: BTreeMap<String, DeviceUsage>,
}

impl GestureStatistics {
    /// Aggregate the events whose timestamp lies in `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRange`] when `from` is after `to`.
    pub fn from_events<'a>(
        events: impl IntoIterator<Item = &'a EventRecord>,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Self, HubError> {
        if from > to {
            return Err(ValidationError::InvalidRange.into());
        }

        let mut total = 0_u64;
        let mut devices: BTreeMap<String, DeviceUsage> = BTreeMap::new();
        for event in events
            .into_iter()
            .filter(|e| e.timestamp >= from && e.timestamp <= to)
        {
            total += 1;
            let usage = devices
                .entry(event.device.to_string())
                .or_insert_with(|| DeviceUsage {
                    count: 0,
                    ratio: 0.0,
                    gestures: BTreeMap::new(),
                });
            usage.count += 1;
            *usage.gestures.entry(event.gesture.to_string()).or_default() += 1;
        }

        for usage in devices.values_mut() {
            usage.ratio = percentage(usage.count, total);
        }

        Ok(Self {
            from,
            to,
            total,
            devices,
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / total as f64).round() / 10.0
}
