//! Log merge policies — device-type specific rules applied after inference.
//!
//! A policy receives the inference result and the previous status and returns
//! the delta that is actually written. Fields it does not mention keep their
//! previous value when the delta is applied.

use crate::control::Inference;
use crate::device::DeviceKind;
use crate::id::Control;
use crate::status::{DeviceStatus, PowerState, fields};

/// Wind power bounds (inclusive).
pub const WIND_POWER_MIN: u8 = 1;
pub const WIND_POWER_MAX: u8 = 12;
/// Wind power forced while the fan runs in eco mode.
pub const ECO_WIND_POWER: &str = "2";
/// Timer values wrap to zero once they reach this many hours.
pub const TIMER_WRAP_HOURS: f64 = 7.5;

const ECO: &str = "eco";

/// Combines an inference delta with the previous status of one device type.
pub trait LogMergePolicy: Send + Sync {
    /// Produce the delta to persist for `control`.
    fn merge(&self, control: &Control, previous: &DeviceStatus, inference: Inference) -> Inference;
}

/// Delta applied as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl LogMergePolicy for PassThrough {
    fn merge(&self, _control: &Control, _previous: &DeviceStatus, inference: Inference) -> Inference {
        inference
    }
}

/// Light: `color` is sticky across every other control.
#[derive(Debug, Default, Clone, Copy)]
pub struct LightMerge;

impl LogMergePolicy for LightMerge {
    fn merge(&self, control: &Control, previous: &DeviceStatus, mut inference: Inference) -> Inference {
        if control.as_str() != fields::COLOR
            && let Some(color) = previous.field(fields::COLOR)
        {
            inference
                .delta
                .insert(fields::COLOR.to_string(), color.to_string());
        }
        inference
    }
}

/// Fan: carries `fan_mode`, `wind_power` and `timer` forward, steps wind power
/// within bounds, pins it in eco mode, and advances the half-hour timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FanMerge;

impl LogMergePolicy for FanMerge {
    fn merge(&self, control: &Control, previous: &DeviceStatus, inference: Inference) -> Inference {
        let Inference { power, delta } = inference;
        let mut merged = Inference {
            power,
            delta: carried_fan_fields(previous),
        };
        merged.delta.extend(delta);

        let fan_mode = previous.field(fields::FAN_MODE).map(str::to_string);
        match control.as_str() {
            fields::FAN_MODE => {
                let is_eco = merged.delta.get(fields::FAN_MODE).map(String::as_str) == Some(ECO);
                if is_eco && previous.field(fields::WIND_POWER).is_some() {
                    merged = merged.with(fields::WIND_POWER, ECO_WIND_POWER);
                }
            }
            "stronger" | "weaker" => {
                let wind = if fan_mode.as_deref() == Some(ECO) {
                    ECO_WIND_POWER.to_string()
                } else {
                    let step = if control.as_str() == "stronger" { 1 } else { -1 };
                    step_wind_power(previous.field(fields::WIND_POWER), step).to_string()
                };
                merged = merged.with(fields::WIND_POWER, wind);
                merged = reassert_fan_mode(merged, fan_mode);
            }
            fields::TIMER => {
                let timer = advance_timer(previous.field(fields::TIMER));
                merged = merged.with(fields::TIMER, timer);
                merged = reassert_fan_mode(merged, fan_mode);
            }
            _ => {
                merged = reassert_fan_mode(merged, fan_mode);
                if merged.power == PowerState::Off {
                    merged = merged.with(fields::TIMER, "0.0");
                }
            }
        }
        merged
    }
}

/// Select the merge policy for a device kind.
#[must_use]
pub fn merge_policy(kind: DeviceKind) -> &'static dyn LogMergePolicy {
    match kind {
        DeviceKind::Light => &LightMerge,
        DeviceKind::Fan => &FanMerge,
        DeviceKind::Projector | DeviceKind::Curtain | DeviceKind::Generic => &PassThrough,
    }
}

fn carried_fan_fields(previous: &DeviceStatus) -> crate::status::StatusLog {
    [fields::FAN_MODE, fields::WIND_POWER, fields::TIMER]
        .into_iter()
        .filter_map(|name| {
            previous
                .field(name)
                .map(|value| (name.to_string(), value.to_string()))
        })
        .collect()
}

fn reassert_fan_mode(inference: Inference, fan_mode: Option<String>) -> Inference {
    match fan_mode {
        Some(mode) => inference.with(fields::FAN_MODE, mode),
        None => inference,
    }
}

/// Step wind power by `step`, clamped to `[WIND_POWER_MIN, WIND_POWER_MAX]`.
///
/// A missing or unparseable value counts as [`WIND_POWER_MIN`].
#[must_use]
pub fn step_wind_power(current: Option<&str>, step: i8) -> u8 {
    let base = current
        .and_then(|v| v.trim().parse::<i16>().ok())
        .unwrap_or(i16::from(WIND_POWER_MIN))
        .clamp(i16::from(WIND_POWER_MIN), i16::from(WIND_POWER_MAX));
    let next = (base + i16::from(step)).clamp(i16::from(WIND_POWER_MIN), i16::from(WIND_POWER_MAX));
    u8::try_from(next).unwrap_or(WIND_POWER_MIN)
}

/// Advance the timer by half an hour, wrapping to `0.0` at [`TIMER_WRAP_HOURS`].
///
/// A missing or unparseable value counts as `0.0`.
#[must_use]
pub fn advance_timer(current: Option<&str>) -> String {
    let hours = current
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|h| h.is_finite() && *h >= 0.0)
        .unwrap_or(0.0);
    let next = if hours >= TIMER_WRAP_HOURS {
        0.0
    } else {
        // off-grid values step to the next half hour, never past the wrap
        (((hours * 2.0).floor() + 1.0) / 2.0).min(TIMER_WRAP_HOURS)
    };
    format!("{next:.1}")
}
