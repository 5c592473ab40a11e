//! JSON REST handlers for device status.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};
use gesturehub_domain::error::{HubError, ValidationError};
use gesturehub_domain::id::Mode;
use gesturehub_domain::status::{DeviceStatus, PowerState, StatusLog};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for updating a device's status.
///
/// `power` replaces the stored value; `log` fields are merged into the
/// stored log.
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub power: Option<PowerState>,
    #[serde(default)]
    pub log: StatusLog,
}

/// One device and its status.
#[derive(Serialize)]
pub struct DeviceStatusBody {
    pub device: Mode,
    #[serde(flatten)]
    pub status: DeviceStatus,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<DeviceStatusBody>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<DeviceStatusBody>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/status`
pub async fn list<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
) -> Result<ListResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let statuses = state
        .status_service
        .list()
        .await?
        .into_iter()
        .map(|(device, status)| DeviceStatusBody { device, status })
        .collect();
    Ok(ListResponse::Ok(Json(statuses)))
}

/// `GET /api/status/:device`
pub async fn get<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Path(device): Path<String>,
) -> Result<GetResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let device = Mode::new(device);
    let status = state.status_service.get(&device).await?;
    Ok(GetResponse::Ok(Json(DeviceStatusBody { device, status })))
}

/// `PUT /api/status/:device`
pub async fn update<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Path(device): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<GetResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let power = req
        .power
        .ok_or(HubError::from(ValidationError::MissingField("power")))?;
    let device = Mode::new(device);
    let status = state
        .status_service
        .update(&device, power, req.log)
        .await?;
    Ok(GetResponse::Ok(Json(DeviceStatusBody { device, status })))
}
