//! JSON REST handler for the event history.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};
use gesturehub_domain::event::EventRecord;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 100;

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<EventRecord>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/events`: most recent events, newest first.
pub async fn list<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let events = state
        .statistics_service
        .recent(query.limit.unwrap_or(DEFAULT_LIMIT))
        .await?;
    Ok(ListResponse::Ok(Json(events)))
}
