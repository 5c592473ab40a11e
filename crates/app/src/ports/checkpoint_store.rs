//! Checkpoint port — the retrain scheduler's persisted progress.

use std::future::Future;

use gesturehub_domain::error::HubError;
use gesturehub_domain::retrain::RetrainCheckpoint;

/// Single-record store for the [`RetrainCheckpoint`].
pub trait CheckpointStore {
    /// Load the checkpoint; a store that was never written yields the default.
    ///
    /// Returns [`HubError::Data`] when the stored record cannot be parsed.
    fn load(&self) -> impl Future<Output = Result<RetrainCheckpoint, HubError>> + Send;

    /// Overwrite the checkpoint.
    fn save(
        &self,
        checkpoint: RetrainCheckpoint,
    ) -> impl Future<Output = Result<(), HubError>> + Send;
}

impl<T: CheckpointStore + Send + Sync> CheckpointStore for std::sync::Arc<T> {
    fn load(&self) -> impl Future<Output = Result<RetrainCheckpoint, HubError>> + Send {
        (**self).load()
    }

    fn save(
        &self,
        checkpoint: RetrainCheckpoint,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).save(checkpoint)
    }
}
