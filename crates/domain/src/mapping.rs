//! Mappings — how gestures reach modes and controls.
//!
//! - A [`ModeTrigger`] binds a gesture to exactly one mode.
//! - A [`ControlMapping`] binds, within a mode, a gesture to exactly one control.
//! - A [`Capability`] is an entry of the device capability table: a control
//!   available in a mode together with its IR code.

use serde::{Deserialize, Serialize};

use crate::error::{HubError, ValidationError};
use crate::id::{Control, Gesture, Mode};

/// A gesture that selects a mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTrigger {
    pub gesture: Gesture,
    pub mode: Mode,
    pub label: String,
}

/// A control available in a mode, with its actuation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub mode: Mode,
    pub control: Control,
    pub code: String,
    pub label: String,
}

impl Capability {
    /// The actuation code, or `None` when it is empty.
    #[must_use]
    pub fn actuation_code(&self) -> Option<&str> {
        let code = self.code.trim();
        (!code.is_empty()).then_some(code)
    }
}

/// `(mode, gesture) → control` binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlMapping {
    pub mode: Mode,
    pub gesture: Gesture,
    pub control: Control,
    pub label: String,
}

impl ControlMapping {
    /// Create a builder for constructing a [`ControlMapping`].
    #[must_use]
    pub fn builder() -> ControlMappingBuilder {
        ControlMappingBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when mode, gesture or control is blank.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.mode.is_blank() {
            return Err(ValidationError::MissingField("mode").into());
        }
        if self.gesture.is_blank() {
            return Err(ValidationError::MissingField("gesture").into());
        }
        if self.control.is_blank() {
            return Err(ValidationError::MissingField("control").into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`ControlMapping`].
#[derive(Debug, Default)]
pub struct ControlMappingBuilder {
    mode: Option<Mode>,
    gesture: Option<Gesture>,
    control: Option<Control>,
    label: Option<String>,
}

impl ControlMappingBuilder {
    #[must_use]
    pub fn mode(mut self, mode: impl Into<Mode>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    #[must_use]
    pub fn gesture(mut self, gesture: impl Into<Gesture>) -> Self {
        self.gesture = Some(gesture.into());
        self
    }

    #[must_use]
    pub fn control(mut self, control: impl Into<Control>) -> Self {
        self.control = Some(control.into());
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Consume the builder, validate, and return a [`ControlMapping`].
    ///
    /// A missing label defaults to the control name.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if mode, gesture or control is missing.
    pub fn build(self) -> Result<ControlMapping, HubError> {
        let control = self.control.unwrap_or_else(|| Control::new(""));
        let mapping = ControlMapping {
            mode: self.mode.unwrap_or_else(|| Mode::new("")),
            gesture: self.gesture.unwrap_or_else(|| Gesture::new("")),
            label: self.label.unwrap_or_else(|| control.to_string()),
            control,
        };
        mapping.validate()?;
        Ok(mapping)
    }
}
