//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// JSON routes live under `/api`; `/health` answers liveness probes.
/// Requests are traced with [`TraceLayer`].
pub fn build<C, M, S, L, P>(state: AppState<C, M, S, L, P>) -> Router
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
