//! Mapping service — mode listing and gesture↔control registration.

use std::collections::BTreeSet;

use gesturehub_domain::error::{ConflictError, HubError, NotFoundError, ValidationError};
use gesturehub_domain::id::{Control, Gesture, Mode};
use gesturehub_domain::mapping::{Capability, ControlMapping};

use crate::ports::{CapabilityStore, MappingRepository};

/// Application service for managing gesture bindings.
pub struct MappingService<C, M> {
    capabilities: C,
    mappings: M,
    vocabulary: Vec<Gesture>,
}

impl<C: CapabilityStore, M: MappingRepository> MappingService<C, M> {
    /// Create a new service.
    ///
    /// `vocabulary` lists the gestures the recognizer can produce.
    pub fn new(capabilities: C, mappings: M, vocabulary: Vec<Gesture>) -> Self {
        Self {
            capabilities,
            mappings,
            vocabulary,
        }
    }

    /// All modes known to the capability table.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the capability store.
    pub async fn list_modes(&self) -> Result<Vec<Mode>, HubError> {
        self.capabilities.list_modes().await
    }

    /// Control mappings registered in `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when `mode` has no capabilities, or a
    /// storage error.
    pub async fn list_mappings(&self, mode: &Mode) -> Result<Vec<ControlMapping>, HubError> {
        self.capabilities_of(mode).await?;
        self.mappings.list_controls(mode).await
    }

    /// Controls of `mode` that no gesture is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when `mode` has no capabilities, or a
    /// storage error.
    pub async fn unmapped_controls(&self, mode: &Mode) -> Result<Vec<Control>, HubError> {
        let capabilities = self.capabilities_of(mode).await?;
        let used: BTreeSet<Control> = self
            .mappings
            .list_controls(mode)
            .await?
            .into_iter()
            .map(|m| m.control)
            .collect();
        Ok(capabilities
            .into_iter()
            .map(|c| c.control)
            .filter(|c| !used.contains(c))
            .collect())
    }

    /// Vocabulary gestures still free in `mode`.
    ///
    /// Mode-trigger gestures are never free since they are interpreted first.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when `mode` has no capabilities, or a
    /// storage error.
    pub async fn unmapped_gestures(&self, mode: &Mode) -> Result<Vec<Gesture>, HubError> {
        self.capabilities_of(mode).await?;
        let mut taken: BTreeSet<Gesture> = self
            .mappings
            .list_mode_triggers()
            .await?
            .into_iter()
            .map(|t| t.gesture)
            .collect();
        taken.extend(
            self.mappings
                .list_controls(mode)
                .await?
                .into_iter()
                .map(|m| m.gesture),
        );
        Ok(self
            .vocabulary
            .iter()
            .filter(|g| !taken.contains(*g))
            .cloned()
            .collect())
    }

    /// Register a new gesture→control binding.
    ///
    /// # Errors
    ///
    /// - [`HubError::Validation`] when a field is blank
    /// - [`HubError::Conflict`] when the gesture is already mapped in the mode
    /// - [`HubError::NotFound`] when the control is not a capability of the mode
    /// - [`HubError::Conflict`] when the control is already bound to a gesture
    #[tracing::instrument(skip(self))]
    pub async fn register(&self, mapping: ControlMapping) -> Result<ControlMapping, HubError> {
        mapping.validate()?;

        if self
            .mappings
            .find_control(&mapping.mode, &mapping.gesture)
            .await?
            .is_some()
        {
            return Err(ConflictError::GestureAlreadyMapped {
                mode: mapping.mode.to_string(),
                gesture: mapping.gesture.to_string(),
            }
            .into());
        }

        if self
            .capabilities
            .get(&mapping.mode, &mapping.control)
            .await?
            .is_none()
        {
            return Err(NotFoundError {
                entity: "Capability",
                id: format!("{}/{}", mapping.mode, mapping.control),
            }
            .into());
        }

        if let Some(bound) = self
            .mappings
            .list_controls(&mapping.mode)
            .await?
            .into_iter()
            .find(|m| m.control == mapping.control)
        {
            return Err(ConflictError::ControlAlreadyBound {
                mode: mapping.mode.to_string(),
                control: mapping.control.to_string(),
                gesture: bound.gesture.to_string(),
            }
            .into());
        }

        let created = self.mappings.create(mapping).await?;
        tracing::info!(
            mode = %created.mode,
            gesture = %created.gesture,
            control = %created.control,
            "mapping registered"
        );
        Ok(created)
    }

    /// Rebind the control mapped to `(mode, from)` to gesture `to`.
    ///
    /// # Errors
    ///
    /// - [`HubError::Validation`] when `to` is blank
    /// - [`HubError::NotFound`] when nothing is mapped to `(mode, from)`
    /// - [`HubError::Conflict`] when `to` is already mapped in `mode`
    #[tracing::instrument(skip(self))]
    pub async fn update_gesture(
        &self,
        mode: &Mode,
        from: &Gesture,
        to: &Gesture,
    ) -> Result<ControlMapping, HubError> {
        if to.is_blank() {
            return Err(ValidationError::MissingField("gesture").into());
        }
        let existing = self
            .mappings
            .find_control(mode, from)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "ControlMapping",
                id: format!("{mode}/{from}"),
            })?;
        if from == to {
            return Ok(existing);
        }
        if self.mappings.find_control(mode, to).await?.is_some() {
            return Err(ConflictError::GestureAlreadyMapped {
                mode: mode.to_string(),
                gesture: to.to_string(),
            }
            .into());
        }
        let updated = self.mappings.update_gesture(mode, from, to).await?;
        tracing::info!(control = %updated.control, "mapping gesture updated");
        Ok(updated)
    }

    /// Rename the display label `from` to `to` everywhere it is used.
    ///
    /// Returns the number of bindings changed.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when either label is blank, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn rename_label(&self, from: &str, to: &str) -> Result<u64, HubError> {
        if from.trim().is_empty() {
            return Err(ValidationError::MissingField("from").into());
        }
        if to.trim().is_empty() {
            return Err(ValidationError::MissingField("to").into());
        }
        let changed = self.mappings.rename_label(from, to).await?;
        tracing::info!(changed, "label renamed");
        Ok(changed)
    }

    async fn capabilities_of(&self, mode: &Mode) -> Result<Vec<Capability>, HubError> {
        let capabilities = self.capabilities.controls(mode).await?;
        if capabilities.is_empty() {
            return Err(NotFoundError {
                entity: "Mode",
                id: mode.to_string(),
            }
            .into());
        }
        Ok(capabilities)
    }
}
