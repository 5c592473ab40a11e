//! Device kind — the device type a mode drives.
//!
//! Status inference and log merging are keyed by the kind, not by the raw
//! mode string, so unknown modes fall back to generic behaviour.

use serde::{Deserialize, Serialize};

use crate::id::Mode;

/// The type of device behind a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Light,
    Fan,
    Projector,
    Curtain,
    /// Any mode without device-specific rules.
    Generic,
}

impl DeviceKind {
    /// Resolve the kind of device a mode drives.
    #[must_use]
    pub fn of(mode: &Mode) -> Self {
        match mode.as_str() {
            "light" => Self::Light,
            "fan" => Self::Fan,
            "projector" => Self::Projector,
            "curtain" => Self::Curtain,
            _ => Self::Generic,
        }
    }
}
