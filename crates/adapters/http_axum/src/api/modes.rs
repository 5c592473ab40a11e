//! JSON REST handlers for modes and their bindings.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};
use gesturehub_domain::id::{Control, Gesture, Mode};
use gesturehub_domain::mapping::ControlMapping;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoints of this module.
pub enum ListResponse<T> {
    Ok(Json<Vec<T>>),
}

impl<T: serde::Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/modes`
pub async fn list<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
) -> Result<ListResponse<Mode>, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let modes = state.mapping_service.list_modes().await?;
    Ok(ListResponse::Ok(Json(modes)))
}

/// `GET /api/modes/:mode/mappings`
pub async fn mappings<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Path(mode): Path<String>,
) -> Result<ListResponse<ControlMapping>, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let mappings = state
        .mapping_service
        .list_mappings(&Mode::new(mode))
        .await?;
    Ok(ListResponse::Ok(Json(mappings)))
}

/// `GET /api/modes/:mode/unmapped-controls`
pub async fn unmapped_controls<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Path(mode): Path<String>,
) -> Result<ListResponse<Control>, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let controls = state
        .mapping_service
        .unmapped_controls(&Mode::new(mode))
        .await?;
    Ok(ListResponse::Ok(Json(controls)))
}

/// `GET /api/modes/:mode/unmapped-gestures`
pub async fn unmapped_gestures<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Path(mode): Path<String>,
) -> Result<ListResponse<Gesture>, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let gestures = state
        .mapping_service
        .unmapped_gestures(&Mode::new(mode))
        .await?;
    Ok(ListResponse::Ok(Json(gestures)))
}
