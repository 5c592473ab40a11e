//! Model trainer port — the opaque gesture recommender.

use std::future::Future;

use gesturehub_domain::error::HubError;
use gesturehub_domain::training::TrainingSample;

/// Fits the recommendation model on a dataset.
pub trait ModelTrainer {
    /// Train on `samples`, replacing the previous model.
    fn train(
        &self,
        samples: Vec<TrainingSample>,
    ) -> impl Future<Output = Result<(), HubError>> + Send;
}

impl<T: ModelTrainer + Send + Sync> ModelTrainer for std::sync::Arc<T> {
    fn train(
        &self,
        samples: Vec<TrainingSample>,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).train(samples)
    }
}
