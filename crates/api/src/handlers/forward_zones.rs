use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use tracing::{debug, instrument};
use zonesync_domain::{ForwardZone, ForwardZoneSet};

use crate::{
    dto::{parse_zone, parse_zone_set},
    errors::ApiError,
    state::AppState,
};

/// Reads served from this node's own forward-zones file.
pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/servers/{server_id}/forward-zones", get(get_forward_zones))
        .route(
            "/servers/{server_id}/forward-zones/{zone_id}",
            get(get_forward_zone),
        )
}

/// Fleet-wide mutations; every route here is authorized by client UID.
pub fn mutation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/servers/{server_id}/forward-zones",
            post(create_forward_zones).delete(delete_forward_zones),
        )
        .route(
            "/servers/{server_id}/forward-zones/{zone_id}",
            patch(update_forward_zone).delete(delete_forward_zone),
        )
}

async fn get_forward_zones(
    State(state): State<AppState>,
    Path(_server_id): Path<String>,
) -> Result<Json<ForwardZoneSet>, ApiError> {
    let zones = state.local.get_forward_zones.get_all().await?;
    debug!(count = zones.len(), "Forward zones retrieved");
    Ok(Json(zones))
}

async fn get_forward_zone(
    State(state): State<AppState>,
    Path((_server_id, zone_id)): Path<(String, String)>,
) -> Result<Json<ForwardZone>, ApiError> {
    let zone = state.local.get_forward_zones.get_by_name(&zone_id).await?;
    Ok(Json(zone))
}

#[instrument(skip(state, body), name = "api_create_forward_zones")]
async fn create_forward_zones(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<ForwardZoneSet>), ApiError> {
    let zones = parse_zone_set(&body)?;
    let created = state
        .fleet
        .create_forward_zones
        .execute(&server_id, zones)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, body), name = "api_delete_forward_zones")]
async fn delete_forward_zones(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let zones = parse_zone_set(&body)?;
    state
        .fleet
        .delete_forward_zones
        .execute(&server_id, zones)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body), name = "api_update_forward_zone")]
async fn update_forward_zone(
    State(state): State<AppState>,
    Path((server_id, zone_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let zone = parse_zone(&body)?;
    state
        .fleet
        .update_forward_zone
        .execute(&server_id, &zone_id, zone)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state), name = "api_delete_forward_zone")]
async fn delete_forward_zone(
    State(state): State<AppState>,
    Path((server_id, zone_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .fleet
        .delete_forward_zones
        .execute_one(&server_id, &zone_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
