//! JSON REST handlers for the active mode.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};
use gesturehub_domain::active_mode::ModeChange;
use gesturehub_domain::error::{HubError, ValidationError};
use gesturehub_domain::id::{Gesture, Mode};
use gesturehub_domain::mapping::ModeTrigger;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for selecting a mode explicitly.
#[derive(Deserialize)]
pub struct SelectModeRequest {
    #[serde(default)]
    pub gesture: String,
}

/// The active mode, `null` when none is selected.
#[derive(Serialize)]
pub struct CurrentModeBody {
    pub mode: Option<Mode>,
}

/// Result of an explicit selection.
#[derive(Serialize)]
pub struct SelectModeBody {
    pub message: String,
    pub mode: Option<Mode>,
    pub change: ModeChange,
}

/// Possible responses from the current-mode endpoint.
pub enum CurrentResponse {
    Ok(Json<CurrentModeBody>),
}

impl IntoResponse for CurrentResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the select endpoint.
pub enum SelectResponse {
    Ok(Json<SelectModeBody>),
}

impl IntoResponse for SelectResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the triggers endpoint.
pub enum TriggersResponse {
    Ok(Json<Vec<ModeTrigger>>),
}

impl IntoResponse for TriggersResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/mode`
pub async fn current<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
) -> CurrentResponse
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let mode = state.mode_service.current().await;
    CurrentResponse::Ok(Json(CurrentModeBody { mode }))
}

/// `PUT /api/mode`: select the mode owned by a mode-trigger gesture.
pub async fn select<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Json(req): Json<SelectModeRequest>,
) -> Result<SelectResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let gesture = Gesture::new(req.gesture);
    if gesture.is_blank() {
        return Err(HubError::from(ValidationError::MissingField("gesture")).into());
    }
    let change = state.mode_service.select(&gesture).await?;
    Ok(SelectResponse::Ok(Json(SelectModeBody {
        message: change.to_string(),
        mode: change.active().cloned(),
        change,
    })))
}

/// `GET /api/mode/triggers`
pub async fn triggers<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
) -> Result<TriggersResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let triggers = state.mode_service.triggers().await?;
    Ok(TriggersResponse::Ok(Json(triggers)))
}
