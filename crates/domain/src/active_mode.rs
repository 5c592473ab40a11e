//! Active mode — the single, process-wide currently selected mode.
//!
//! Observable states are *unset* and *set(mode)*. A mode-trigger gesture
//! selects its mode from *unset*, deselects it when it is already active,
//! and switches to it from any other mode.

use std::fmt;

use serde::Serialize;

use crate::id::Mode;

/// Transition reported after a mode-trigger gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum ModeChange {
    /// No mode was active; `mode` is now active.
    Selected { mode: Mode },
    /// `mode` was active and is now cleared.
    Deselected { mode: Mode },
    /// The active mode moved from `from` to `to`.
    Switched { from: Mode, to: Mode },
}

impl ModeChange {
    /// The mode active after the transition, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Mode> {
        match self {
            Self::Selected { mode } => Some(mode),
            Self::Deselected { .. } => None,
            Self::Switched { to, .. } => Some(to),
        }
    }
}

impl fmt::Display for ModeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selected { mode } => write!(f, "mode {mode} selected"),
            Self::Deselected { mode } => write!(f, "mode {mode} deselected"),
            Self::Switched { from, to } => write!(f, "mode switched from {from} to {to}"),
        }
    }
}

/// Register holding the active mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveMode(Option<Mode>);

impl ActiveMode {
    /// The active mode, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Mode> {
        self.0.as_ref()
    }

    /// Apply a mode-trigger for `mode`.
    pub fn toggle(&mut self, mode: Mode) -> ModeChange {
        match self.0.take() {
            None => {
                self.0 = Some(mode.clone());
                ModeChange::Selected { mode }
            }
            Some(active) if active == mode => ModeChange::Deselected { mode },
            Some(from) => {
                self.0 = Some(mode.clone());
                ModeChange::Switched { from, to: mode }
            }
        }
    }

    /// Make `mode` active without toggling.
    pub fn select(&mut self, mode: Mode) -> ModeChange {
        match self.0.replace(mode.clone()) {
            Some(from) if from != mode => ModeChange::Switched { from, to: mode },
            _ => ModeChange::Selected { mode },
        }
    }
}
