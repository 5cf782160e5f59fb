use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::patch,
    Router,
};
use tracing::instrument;

use crate::{dto::parse_zone_patch, errors::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/servers/{server_id}/zones/{zone_id}", patch(patch_zone))
}

#[instrument(skip(state, body), name = "api_patch_zone")]
async fn patch_zone(
    State(state): State<AppState>,
    Path((server_id, zone_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let patch = parse_zone_patch(&body)?;
    state
        .fleet
        .patch_zone
        .execute(&server_id, &zone_id, &patch)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
