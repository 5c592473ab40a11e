//! JSON REST handler for display label renames.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for renaming a label.
#[derive(Deserialize)]
pub struct RenameLabelRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

#[derive(Serialize)]
pub struct RenameLabelBody {
    pub updated: u64,
}

/// Possible responses from the rename endpoint.
pub enum RenameResponse {
    Ok(Json<RenameLabelBody>),
}

impl IntoResponse for RenameResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `PUT /api/labels`
pub async fn rename<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Json(req): Json<RenameLabelRequest>,
) -> Result<RenameResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let updated = state
        .mapping_service
        .rename_label(&req.from, &req.to)
        .await?;
    Ok(RenameResponse::Ok(Json(RenameLabelBody { updated })))
}
