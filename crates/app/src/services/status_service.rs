//! Status service — per-device status with serialized read-modify-write.
//!
//! Every write to a device's status goes through a [`DeviceGuard`], which
//! holds that device's lock. Two updates of the same device never interleave;
//! different devices proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use gesturehub_domain::error::{HubError, NotFoundError, ValidationError};
use gesturehub_domain::id::Mode;
use gesturehub_domain::status::{DeviceStatus, PowerState, StatusLog};

use crate::ports::StatusRepository;

/// One async lock per device, created on first use.
///
/// Locks nobody holds or waits for are dropped on the next lookup, so the map
/// only ever tracks devices in use.
#[derive(Default)]
struct DeviceLocks {
    locks: std::sync::Mutex<HashMap<Mode, Arc<Mutex<()>>>>,
}

impl DeviceLocks {
    fn get(&self, device: &Mode) -> Arc<Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(device.clone()).or_default())
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

/// Exclusive access to one device's status.
///
/// Dropping the guard releases the device.
pub struct DeviceGuard<'a, S> {
    repo: &'a S,
    device: Mode,
    _lock: OwnedMutexGuard<()>,
}

impl<S: StatusRepository> DeviceGuard<'_, S> {
    /// The device this guard locks.
    #[must_use]
    pub fn device(&self) -> &Mode {
        &self.device
    }

    /// Current status; a device never written reads as off with an empty log.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn load(&self) -> Result<DeviceStatus, HubError> {
        Ok(self.repo.get(&self.device).await?.unwrap_or_default())
    }

    /// Persist `status` for the locked device.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn store(&self, status: &DeviceStatus) -> Result<(), HubError> {
        self.repo.save(&self.device, status).await
    }
}

/// Application service for device status.
pub struct StatusService<S> {
    repo: S,
    locks: DeviceLocks,
}

impl<S: StatusRepository> StatusService<S> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: S) -> Self {
        Self {
            repo,
            locks: DeviceLocks::default(),
        }
    }

    /// Wait for exclusive access to `device`.
    pub async fn lock(&self, device: &Mode) -> DeviceGuard<'_, S> {
        let lock = self.locks.get(device).lock_owned().await;
        DeviceGuard {
            repo: &self.repo,
            device: device.clone(),
            _lock: lock,
        }
    }

    /// Look up the status of `device`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when no status is stored for `device`,
    /// or a storage error from the repository.
    pub async fn get(&self, device: &Mode) -> Result<DeviceStatus, HubError> {
        self.repo.get(device).await?.ok_or_else(|| {
            NotFoundError {
                entity: "DeviceStatus",
                id: device.to_string(),
            }
            .into()
        })
    }

    /// Status of every known device.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn list(&self) -> Result<Vec<(Mode, DeviceStatus)>, HubError> {
        self.repo.get_all().await
    }

    /// Replace `device`'s power and field-merge `log` into its stored log.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when `device` is blank, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, log))]
    pub async fn update(
        &self,
        device: &Mode,
        power: PowerState,
        log: StatusLog,
    ) -> Result<DeviceStatus, HubError> {
        if device.is_blank() {
            return Err(ValidationError::MissingField("device").into());
        }
        let guard = self.lock(device).await;
        let next = guard.load().await?.apply(power, log);
        guard.store(&next).await?;
        tracing::info!(power = %next.power, "device status updated");
        Ok(next)
    }
}
