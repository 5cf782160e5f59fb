use axum::{
    extract::{Path, Query, State},
    routing::put,
    Json, Router,
};
use tracing::instrument;
use zonesync_application::use_cases::FLUSHED_MESSAGE;

use crate::{
    dto::{FleetFlushResponse, FlushCacheQuery},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/servers/{server_id}/cache/flush", put(flush_fleet_cache))
}

#[instrument(skip(state), name = "api_flush_fleet_cache")]
async fn flush_fleet_cache(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(params): Query<FlushCacheQuery>,
) -> Result<Json<FleetFlushResponse>, ApiError> {
    state
        .fleet
        .flush_cache
        .execute(&server_id, &params.domain)
        .await?;

    Ok(Json(FleetFlushResponse {
        domain: params.domain,
        result: FLUSHED_MESSAGE.to_string(),
    }))
}
