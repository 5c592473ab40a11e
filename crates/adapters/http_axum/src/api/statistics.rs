//! JSON REST handler for usage statistics.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use chrono::TimeDelta;
use serde::Deserialize;

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};
use gesturehub_domain::statistics::GestureStatistics;
use gesturehub_domain::time::{Timestamp, now};

use crate::error::ApiError;
use crate::state::AppState;

/// Range used when the query omits `from`.
const DEFAULT_RANGE_DAYS: i64 = 7;

/// Query parameters, RFC 3339 timestamps.
///
/// `to` defaults to now and `from` to seven days before `to`.
#[derive(Deserialize)]
pub struct StatisticsQuery {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

/// Possible responses from the statistics endpoint.
pub enum GetResponse {
    Ok(Json<GestureStatistics>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/statistics?from=&to=`
pub async fn get<C, M, S, L, P>(
    State(state): State<AppState<C, M, S, L, P>>,
    Query(query): Query<StatisticsQuery>,
) -> Result<GetResponse, ApiError>
where
    C: CapabilityStore + Send + Sync + 'static,
    M: MappingRepository + Send + Sync + 'static,
    S: StatusRepository + Send + Sync + 'static,
    L: EventLog + Send + Sync + 'static,
    P: ActuationPublisher + Send + Sync + 'static,
{
    let to = query.to.unwrap_or_else(now);
    let from = query
        .from
        .unwrap_or_else(|| to - TimeDelta::days(DEFAULT_RANGE_DAYS));
    let statistics = state.statistics_service.statistics(from, to).await?;
    Ok(GetResponse::Ok(Json(statistics)))
}
