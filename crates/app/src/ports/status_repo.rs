//! Status repository port — per-device `{power, log}` state.

use std::future::Future;

use gesturehub_domain::error::HubError;
use gesturehub_domain::id::Mode;
use gesturehub_domain::status::DeviceStatus;

/// Repository for device status.
///
/// Read-modify-write sequencing is the caller's job; see
/// [`StatusService`](crate::services::status_service::StatusService).
pub trait StatusRepository {
    /// The stored status of `device`, if any.
    fn get(
        &self,
        device: &Mode,
    ) -> impl Future<Output = Result<Option<DeviceStatus>, HubError>> + Send;

    /// Every stored status, ordered by device.
    fn get_all(&self) -> impl Future<Output = Result<Vec<(Mode, DeviceStatus)>, HubError>> + Send;

    /// Insert or replace the status of `device`.
    fn save(
        &self,
        device: &Mode,
        status: &DeviceStatus,
    ) -> impl Future<Output = Result<(), HubError>> + Send;
}

impl<T: StatusRepository + Send + Sync> StatusRepository for std::sync::Arc<T> {
    fn get(
        &self,
        device: &Mode,
    ) -> impl Future<Output = Result<Option<DeviceStatus>, HubError>> + Send {
        (**self).get(device)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<(Mode, DeviceStatus)>, HubError>> + Send {
        (**self).get_all()
    }

    fn save(
        &self,
        device: &Mode,
        status: &DeviceStatus,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).save(device, status)
    }
}
