//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod gestures;
#[allow(clippy::missing_errors_doc)]
pub mod labels;
#[allow(clippy::missing_errors_doc)]
pub mod mappings;
#[allow(clippy::missing_errors_doc)]
pub mod mode;
#[allow(clippy::missing_errors_doc)]
pub mod modes;
#[allow(clippy::missing_errors_doc)]
pub mod statistics;
#[allow(clippy::missing_errors_doc)]
pub mod status;

use axum::Router;
use axum::routing::{get, post, put};

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<C, M, S, L, P>() -> Router<AppState<C, M, S, L, P>>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    Router::new()
        // Gesture pipeline
        .route("/gestures", post(gestures::submit::<C, M, S, L, P>))
        // Active mode
        .route(
            "/mode",
            get(mode::current::<C, M, S, L, P>).put(mode::select::<C, M, S, L, P>),
        )
        .route("/mode/triggers", get(mode::triggers::<C, M, S, L, P>))
        // Device status
        .route("/status", get(status::list::<C, M, S, L, P>))
        .route(
            "/status/{device}",
            get(status::get::<C, M, S, L, P>).put(status::update::<C, M, S, L, P>),
        )
        // Modes and their bindings
        .route("/modes", get(modes::list::<C, M, S, L, P>))
        .route(
            "/modes/{mode}/mappings",
            get(modes::mappings::<C, M, S, L, P>),
        )
        .route(
            "/modes/{mode}/unmapped-controls",
            get(modes::unmapped_controls::<C, M, S, L, P>),
        )
        .route(
            "/modes/{mode}/unmapped-gestures",
            get(modes::unmapped_gestures::<C, M, S, L, P>),
        )
        // Mapping management
        .route("/mappings", post(mappings::register::<C, M, S, L, P>))
        .route(
            "/mappings/{mode}/{gesture}",
            put(mappings::update_gesture::<C, M, S, L, P>),
        )
        .route("/labels", put(labels::rename::<C, M, S, L, P>))
        // History
        .route("/statistics", get(statistics::get::<C, M, S, L, P>))
        .route("/events", get(events::list::<C, M, S, L, P>))
}
