//! Control categories and status inference.
//!
//! Every `(device kind, control)` pair resolves to exactly one
//! [`ControlCategory`]. Inference is a pure function of the category and the
//! device's current status; device-type specific bookkeeping (sticky fields,
//! numeric stepping) happens afterwards in the merge policies.

use crate::device::DeviceKind;
use crate::id::Control;
use crate::status::{DeviceStatus, PowerState, StatusLog, fields};

/// The control that toggles power on every device kind.
pub const POWER: &str = "power";

const LIGHT_COLORS: &[&str] = &["Warm", "Cool", "Natural"];
const FAN_MODES: &[&str] = &["normal", "natural", "sleep", "eco"];
const PROJECTOR_MUTE: &[&str] = &["muted", "unmuted"];
const PROJECTOR_SOURCES: &[&str] = &["HDMI1", "HDMI2"];

/// How a control changes a device's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCategory {
    /// Toggles `on ↔ off`.
    Power,
    /// Advances the field named after the control through a fixed cycle.
    Cyclic(&'static [&'static str]),
    /// Writes a fixed label into the field named after the control.
    Static(&'static str),
    /// Leaves inference empty.
    NoOp,
}

impl ControlCategory {
    /// Look up the category of `control` on a device of `kind`.
    #[must_use]
    pub fn lookup(kind: DeviceKind, control: &str) -> Self {
        if control == POWER {
            return Self::Power;
        }
        match (kind, control) {
            (DeviceKind::Light, "color") => Self::Cyclic(LIGHT_COLORS),
            (DeviceKind::Light, "brighter") => Self::Static("밝게"),
            (DeviceKind::Light, "darker") => Self::Static("어둡게"),
            (DeviceKind::Fan, "fan_mode") => Self::Cyclic(FAN_MODES),
            (DeviceKind::Projector, "mute") => Self::Cyclic(PROJECTOR_MUTE),
            (DeviceKind::Projector, "source") => Self::Cyclic(PROJECTOR_SOURCES),
            (DeviceKind::Projector, "volume_up") => Self::Static("볼륨 크게"),
            (DeviceKind::Projector, "volume_down") => Self::Static("볼륨 작게"),
            (DeviceKind::Curtain, "open") => Self::Static("열기"),
            (DeviceKind::Curtain, "close") => Self::Static("닫기"),
            (DeviceKind::Curtain, "stop") => Self::Static("정지"),
            _ => Self::NoOp,
        }
    }
}

/// Result of inference: the next power state and the log fields to write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inference {
    pub power: PowerState,
    pub delta: StatusLog,
}

impl Inference {
    /// An inference that changes nothing.
    #[must_use]
    pub fn unchanged(current: &DeviceStatus) -> Self {
        Self {
            power: current.power,
            delta: StatusLog::new(),
        }
    }

    /// Set a delta field, builder style.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.delta.insert(field.to_string(), value.into());
        self
    }
}

/// Successor of `current` in `values`, wrapping to the first value when
/// `current` is the last one, missing, or not in the cycle.
#[must_use]
pub fn next_in_cycle(values: &'static [&'static str], current: Option<&str>) -> &'static str {
    let next = current
        .and_then(|value| values.iter().position(|v| *v == value))
        .map_or(0, |idx| (idx + 1) % values.len());
    values[next]
}

/// Infer the next `(power, delta)` for `control` on a device of `kind`.
#[must_use]
pub fn infer(kind: DeviceKind, control: &Control, current: &DeviceStatus) -> Inference {
    match ControlCategory::lookup(kind, control.as_str()) {
        ControlCategory::Power => {
            let power = current.power.toggled();
            let inference = Inference {
                power,
                delta: StatusLog::new(),
            };
            if kind == DeviceKind::Fan && power == PowerState::Off {
                inference.with(fields::TIMER, "0")
            } else {
                inference
            }
        }
        ControlCategory::Cyclic(values) => {
            let next = next_in_cycle(values, current.field(control.as_str()));
            Inference::unchanged(current).with(control.as_str(), next)
        }
        ControlCategory::Static(label) => {
            Inference::unchanged(current).with(control.as_str(), label)
        }
        ControlCategory::NoOp => Inference::unchanged(current),
    }
}
