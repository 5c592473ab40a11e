//! Mapping repository port — mode triggers and control mappings.

use std::future::Future;

use gesturehub_domain::error::HubError;
use gesturehub_domain::id::{Gesture, Mode};
use gesturehub_domain::mapping::{ControlMapping, ModeTrigger};

/// Repository for persisting and querying gesture bindings.
pub trait MappingRepository {
    /// The mode trigger bound to `gesture`, if any.
    fn find_mode_trigger(
        &self,
        gesture: &Gesture,
    ) -> impl Future<Output = Result<Option<ModeTrigger>, HubError>> + Send;

    /// All mode triggers.
    fn list_mode_triggers(&self) -> impl Future<Output = Result<Vec<ModeTrigger>, HubError>> + Send;

    /// The control mapping for `(mode, gesture)`, if any.
    fn find_control(
        &self,
        mode: &Mode,
        gesture: &Gesture,
    ) -> impl Future<Output = Result<Option<ControlMapping>, HubError>> + Send;

    /// All control mappings of `mode`.
    fn list_controls(
        &self,
        mode: &Mode,
    ) -> impl Future<Output = Result<Vec<ControlMapping>, HubError>> + Send;

    /// Store a new control mapping.
    ///
    /// Implementations reject a duplicate `(mode, gesture)` or `(mode, control)`
    /// with [`HubError::Conflict`].
    fn create(
        &self,
        mapping: ControlMapping,
    ) -> impl Future<Output = Result<ControlMapping, HubError>> + Send;

    /// Move the mapping of `(mode, from)` to gesture `to`.
    ///
    /// Returns [`HubError::NotFound`] when no mapping exists for `(mode, from)`.
    fn update_gesture(
        &self,
        mode: &Mode,
        from: &Gesture,
        to: &Gesture,
    ) -> impl Future<Output = Result<ControlMapping, HubError>> + Send;

    /// Replace the display label `from` with `to` on every mode trigger and
    /// control mapping. Returns the number of rows changed.
    fn rename_label(
        &self,
        from: &str,
        to: &str,
    ) -> impl Future<Output = Result<u64, HubError>> + Send;
}

impl<T: MappingRepository + Send + Sync> MappingRepository for std::sync::Arc<T> {
    fn find_mode_trigger(
        &self,
        gesture: &Gesture,
    ) -> impl Future<Output = Result<Option<ModeTrigger>, HubError>> + Send {
        (**self).find_mode_trigger(gesture)
    }

    fn list_mode_triggers(&self) -> impl Future<Output = Result<Vec<ModeTrigger>, HubError>> + Send {
        (**self).list_mode_triggers()
    }

    fn find_control(
        &self,
        mode: &Mode,
        gesture: &Gesture,
    ) -> impl Future<Output = Result<Option<ControlMapping>, HubError>> + Send {
        (**self).find_control(mode, gesture)
    }

    fn list_controls(
        &self,
        mode: &Mode,
    ) -> impl Future<Output = Result<Vec<ControlMapping>, HubError>> + Send {
        (**self).list_controls(mode)
    }

    fn create(
        &self,
        mapping: ControlMapping,
    ) -> impl Future<Output = Result<ControlMapping, HubError>> + Send {
        (**self).create(mapping)
    }

    fn update_gesture(
        &self,
        mode: &Mode,
        from: &Gesture,
        to: &Gesture,
    ) -> impl Future<Output = Result<ControlMapping, HubError>> + Send {
        (**self).update_gesture(mode, from, to)
    }

    fn rename_label(
        &self,
        from: &str,
        to: &str,
    ) -> impl Future<Output = Result<u64, HubError>> + Send {
        (**self).rename_label(from, to)
    }
}
