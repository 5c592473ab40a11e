//! Device capability port — which controls each mode offers, with IR codes.

use std::future::Future;

use gesturehub_domain::error::HubError;
use gesturehub_domain::id::{Control, Mode};
use gesturehub_domain::mapping::Capability;

/// Read-only view of the device capability table.
pub trait CapabilityStore {
    /// All modes that have at least one control.
    fn list_modes(&self) -> impl Future<Output = Result<Vec<Mode>, HubError>> + Send;

    /// Controls available in `mode`, ordered by control name.
    fn controls(&self, mode: &Mode)
    -> impl Future<Output = Result<Vec<Capability>, HubError>> + Send;

    /// A single control of `mode`.
    fn get(
        &self,
        mode: &Mode,
        control: &Control,
    ) -> impl Future<Output = Result<Option<Capability>, HubError>> + Send;
}

impl<T: CapabilityStore + Send + Sync> CapabilityStore for std::sync::Arc<T> {
    fn list_modes(&self) -> impl Future<Output = Result<Vec<Mode>, HubError>> + Send {
        (**self).list_modes()
    }

    fn controls(
        &self,
        mode: &Mode,
    ) -> impl Future<Output = Result<Vec<Capability>, HubError>> + Send {
        (**self).controls(mode)
    }

    fn get(
        &self,
        mode: &Mode,
        control: &Control,
    ) -> impl Future<Output = Result<Option<Capability>, HubError>> + Send {
        (**self).get(mode, control)
    }
}
