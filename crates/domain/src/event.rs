//! Event records — one immutable entry per dispatched control gesture.

use serde::{Deserialize, Serialize};

use crate::id::{Control, EventId, Gesture, Mode};
use crate::status::DeviceStatus;
use crate::time::{Timestamp, now};

/// The payload published to the message bus for one actuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuationPayload {
    pub gesture: Gesture,
    pub mode: Mode,
    pub control: Control,
    pub code: String,
}

/// Outcome of the publish step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchResult {
    Success,
    Failed { reason: String },
}

impl DispatchResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// An immutable record of a handled control gesture.
///
/// `status` is the device status the gesture produced; it is `None` when the
/// publish failed and the device was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub device: Mode,
    pub gesture: Gesture,
    pub control: Control,
    pub label: String,
    pub result: DispatchResult,
    pub status: Option<DeviceStatus>,
}

impl EventRecord {
    /// Record a successful actuation that moved the device to `status`.
    #[must_use]
    pub fn succeeded(payload: &ActuationPayload, label: &str, status: DeviceStatus) -> Self {
        Self::from_payload(payload, label, DispatchResult::Success, Some(status))
    }

    /// Record an actuation whose publish failed with `reason`.
    #[must_use]
    pub fn failed(payload: &ActuationPayload, label: &str, reason: impl Into<String>) -> Self {
        Self::from_payload(
            payload,
            label,
            DispatchResult::Failed {
                reason: reason.into(),
            },
            None,
        )
    }

    fn from_payload(
        payload: &ActuationPayload,
        label: &str,
        result: DispatchResult,
        status: Option<DeviceStatus>,
    ) -> Self {
        Self {
            id: EventId::new(),
            timestamp: now(),
            device: payload.mode.clone(),
            gesture: payload.gesture.clone(),
            control: payload.control.clone(),
            label: label.to_string(),
            result,
            status,
        }
    }
}
