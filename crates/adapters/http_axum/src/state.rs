//! Shared application state for axum handlers.

use std::sync::Arc;

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};
use gesturehub_app::services::gesture_service::GestureService;
use gesturehub_app::services::mapping_service::MappingService;
use gesturehub_app::services::mode_service::ModeService;
use gesturehub_app::services::statistics_service::StatisticsService;
use gesturehub_app::services::status_service::StatusService;

/// Application state shared across all axum handlers.
///
/// Generic over the capability store, mapping repository, status repository,
/// event log and actuation publisher to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<C, M, S, L, P> {
    /// The gesture pipeline.
    pub gesture_service: Arc<GestureService<C, M, S, L, P>>,
    /// The active mode register, shared with the gesture pipeline.
    pub mode_service: Arc<ModeService<M>>,
    /// Device status, shared with the gesture pipeline.
    pub status_service: Arc<StatusService<S>>,
    /// Mapping management.
    pub mapping_service: Arc<MappingService<C, M>>,
    /// Event history queries.
    pub statistics_service: Arc<StatisticsService<L>>,
}

impl<C, M, S, L, P> Clone for AppState<C, M, S, L, P> {
    fn clone(&self) -> Self {
        Self {
            gesture_service: Arc::clone(&self.gesture_service),
            mode_service: Arc::clone(&self.mode_service),
            status_service: Arc::clone(&self.status_service),
            mapping_service: Arc::clone(&self.mapping_service),
            statistics_service: Arc::clone(&self.statistics_service),
        }
    }
}

impl<C, M, S, L, P> AppState<C, M, S, L, P>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    /// Create a new application state.
    ///
    /// `mode_service` and `status_service` must be the instances the gesture
    /// service was built with, so handlers observe the same active mode and
    /// device locks.
    pub fn new(
        gesture_service: GestureService<C, M, S, L, P>,
        mode_service: Arc<ModeService<M>>,
        status_service: Arc<StatusService<S>>,
        mapping_service: MappingService<C, M>,
        statistics_service: StatisticsService<L>,
    ) -> Self {
        Self {
            gesture_service: Arc::new(gesture_service),
            mode_service,
            status_service,
            mapping_service: Arc::new(mapping_service),
            statistics_service: Arc::new(statistics_service),
        }
    }
}
