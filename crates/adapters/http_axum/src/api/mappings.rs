//! JSON REST handlers for control mappings.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};
use gesturehub_domain::id::{Gesture, Mode};
use gesturehub_domain::mapping::ControlMapping;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a mapping.
#[derive(Deserialize)]
pub struct RegisterMappingRequest {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub gesture: String,
    #[serde(default)]
    pub control: String,
    pub label: Option<String>,
}

/// Request body for moving a mapping to another gesture.
#[derive(Deserialize)]
pub struct UpdateGestureRequest {
    #[serde(default)]
    pub gesture: String,
}

/// Possible responses from the register endpoint.
pub enum RegisterResponse {
    Created(Json<ControlMapping>),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<ControlMapping>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/mappings`
pub async fn register<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Json(req): Json<RegisterMappingRequest>,
) -> Result<RegisterResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let mut builder = ControlMapping::builder()
        .mode(req.mode)
        .gesture(req.gesture)
        .control(req.control);
    if let Some(label) = req.label {
        builder = builder.label(label);
    }

    let mapping = builder.build()?;
    let created = state.mapping_service.register(mapping).await?;
    Ok(RegisterResponse::Created(Json(created)))
}

/// `PUT /api/mappings/:mode/:gesture`
pub async fn update_gesture<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Path((mode, gesture)): Path<(String, String)>,
    Json(req): Json<UpdateGestureRequest>,
) -> Result<UpdateResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let updated = state
        .mapping_service
        .update_gesture(
            &Mode::new(mode),
            &Gesture::new(gesture),
            &Gesture::new(req.gesture),
        )
        .await?;
    Ok(UpdateResponse::Ok(Json(updated)))
}
