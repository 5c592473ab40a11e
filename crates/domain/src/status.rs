//! Device status — `{power, log}` per device and how a control advances it.
//!
//! [`next_status`] is the single entry point used by the application layer:
//! it runs control inference, then the device kind's merge policy, then
//! applies the merged delta on top of the previous log.

pub mod merge;

pub use merge::{FanMerge, LightMerge, LogMergePolicy, PassThrough, merge_policy};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::control::{Inference, infer};
use crate::device::DeviceKind;
use crate::id::{Control, Mode};

/// Field → value mapping describing a device's detailed state.
pub type StatusLog = BTreeMap<String, String>;

/// Well-known status log field names.
pub mod fields {
    pub const COLOR: &str = "color";
    pub const FAN_MODE: &str = "fan_mode";
    pub const WIND_POWER: &str = "wind_power";
    pub const TIMER: &str = "timer";
}

/// On/off power of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    #[default]
    Off,
}

impl PowerState {
    /// The opposite power state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    /// Lowercase wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown power value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown power state `{0}`")]
pub struct UnknownPowerState(pub String);

impl FromStr for PowerState {
    type Err = UnknownPowerState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(UnknownPowerState(other.to_string())),
        }
    }
}

/// The full status of one device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub power: PowerState,
    #[serde(default)]
    pub log: StatusLog,
}

impl DeviceStatus {
    /// Build a status from its parts.
    #[must_use]
    pub fn new(power: PowerState, log: StatusLog) -> Self {
        Self { power, log }
    }

    /// Read a log field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.log.get(name).map(String::as_str)
    }

    /// Replace power and field-merge `delta` into the log.
    ///
    /// Fields absent from `delta` keep their previous value.
    #[must_use]
    pub fn apply(&self, power: PowerState, delta: StatusLog) -> Self {
        let mut log = self.log.clone();
        log.extend(delta);
        Self { power, log }
    }
}

/// Compute the status a device moves to when `control` is triggered.
#[must_use]
pub fn next_status(mode: &Mode, control: &Control, current: &DeviceStatus) -> DeviceStatus {
    let kind = DeviceKind::of(mode);
    let inference = infer(kind, control, current);
    let Inference { power, delta } = merge_policy(kind).merge(control, current, inference);
    current.apply(power, delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(power: PowerState, entries: &[(&str, &str)]) -> DeviceStatus {
        DeviceStatus::new(
            power,
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn should_default_to_off_with_empty_log() {
        let s = DeviceStatus::default();
        assert_eq!(s.power, PowerState::Off);
        assert!(s.log.is_empty());
    }

    #[test]
    fn should_roundtrip_power_through_serde_json() {
        assert_eq!(serde_json::to_string(&PowerState::On).unwrap(), "\"on\"");
        let parsed: PowerState = serde_json::from_str("\"off\"").unwrap();
        assert_eq!(parsed, PowerState::Off);
    }

    #[test]
    fn should_parse_power_from_str() {
        assert_eq!("on".parse::<PowerState>().unwrap(), PowerState::On);
        assert!("maybe".parse::<PowerState>().is_err());
    }

    #[test]
    fn should_keep_untouched_fields_when_applying_delta() {
        let current = status(PowerState::On, &[("color", "Warm"), ("brighter", "밝게")]);
        let mut delta = StatusLog::new();
        delta.insert("color".to_string(), "Cool".to_string());

        let next = current.apply(PowerState::On, delta);

        assert_eq!(next.field("color"), Some("Cool"));
        assert_eq!(next.field("brighter"), Some("밝게"));
    }

    #[test]
    fn should_toggle_power_and_keep_color_when_light_power_pressed() {
        let current = status(PowerState::Off, &[("color", "Natural")]);
        let next = next_status(&Mode::new("light"), &Control::new("power"), &current);
        assert_eq!(next.power, PowerState::On);
        assert_eq!(next.field("color"), Some("Natural"));
    }

    #[test]
    fn should_preserve_light_color_across_non_color_controls() {
        let mode = Mode::new("light");
        let mut s = status(PowerState::On, &[("color", "Cool")]);
        for control in ["brighter", "power", "darker", "power", "unknown"] {
            s = next_status(&mode, &Control::new(control), &s);
            assert_eq!(s.field("color"), Some("Cool"), "after {control}");
        }
    }

    #[test]
    fn should_return_color_to_start_after_full_cycle() {
        let mode = Mode::new("light");
        let color = Control::new("color");
        let start = status(PowerState::On, &[("color", "Cool")]);
        let mut s = start.clone();
        for _ in 0..3 {
            s = next_status(&mode, &color, &s);
        }
        assert_eq!(s, start);
    }

    #[test]
    fn should_step_wind_power_through_full_pipeline() {
        let mode = Mode::new("fan");
        let current = status(
            PowerState::On,
            &[("fan_mode", "normal"), ("wind_power", "5"), ("timer", "1.0")],
        );
        let next = next_status(&mode, &Control::new("stronger"), &current);
        assert_eq!(next.field("wind_power"), Some("6"));
        assert_eq!(next.field("fan_mode"), Some("normal"));
        assert_eq!(next.field("timer"), Some("1.0"));
    }

    #[test]
    fn should_reset_timer_when_fan_powers_off() {
        let current = status(
            PowerState::On,
            &[("fan_mode", "sleep"), ("wind_power", "3"), ("timer", "2.5")],
        );
        let next = next_status(&Mode::new("fan"), &Control::new("power"), &current);
        assert_eq!(next.power, PowerState::Off);
        assert_eq!(next.field("timer"), Some("0.0"));
        assert_eq!(next.field("fan_mode"), Some("sleep"));
        assert_eq!(next.field("wind_power"), Some("3"));
    }

    #[test]
    fn should_leave_status_unchanged_for_unknown_control() {
        let current = status(PowerState::On, &[("mute", "muted")]);
        let next = next_status(&Mode::new("projector"), &Control::new("zoom"), &current);
        assert_eq!(next, current);
    }
}
