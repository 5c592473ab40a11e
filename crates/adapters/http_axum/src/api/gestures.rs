//! JSON REST handler for gesture submission.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};
use gesturehub_app::services::gesture_service::GestureOutcome;
use gesturehub_domain::active_mode::ModeChange;
use gesturehub_domain::event::ActuationPayload;
use gesturehub_domain::id::{Gesture, Mode};
use gesturehub_domain::status::DeviceStatus;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for submitting a recognized gesture.
#[derive(Deserialize)]
pub struct SubmitGestureRequest {
    #[serde(default)]
    pub gesture: String,
}

/// Response body describing what the gesture did.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureResponseBody {
    ModeChanged {
        message: String,
        active_mode: Option<Mode>,
        change: ModeChange,
    },
    Actuated {
        message: String,
        payload: ActuationPayload,
        label: String,
        status: DeviceStatus,
    },
}

impl From<GestureOutcome> for GestureResponseBody {
    fn from(outcome: GestureOutcome) -> Self {
        match outcome {
            GestureOutcome::ModeChanged(change) => Self::ModeChanged {
                message: change.to_string(),
                active_mode: change.active().cloned(),
                change,
            },
            GestureOutcome::Actuated {
                payload,
                label,
                status,
            } => Self::Actuated {
                message: "actuation sent".to_string(),
                payload,
                label,
                status,
            },
        }
    }
}

/// Possible responses from the submit endpoint.
pub enum SubmitResponse {
    Ok(Json<GestureResponseBody>),
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/gestures`: run one gesture through the pipeline.
pub async fn submit<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Json(req): Json<SubmitGestureRequest>,
) -> Result<SubmitResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let outcome = state
        .gesture_service
        .handle(&Gesture::new(req.gesture))
        .await?;
    Ok(SubmitResponse::Ok(Json(outcome.into())))
}
