//! Peer-facing handlers. Each one applies a propagated mutation to this
//! node only and never fans out again.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{patch, post, put},
    Json, Router,
};
use tracing::{debug, instrument};
use zonesync_domain::{FlushResult, ForwardZoneSet};

use crate::{
    dto::{parse_zone, parse_zone_set, FlushCacheQuery},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{server_id}/forward-zones",
            post(store_forward_zones).delete(remove_forward_zones),
        )
        .route(
            "/{server_id}/forward-zones/{zone_id}",
            patch(replace_forward_zone).delete(remove_forward_zone),
        )
        .route("/{server_id}/cache/flush", put(flush_cache))
}

#[instrument(skip(state, body), name = "internal_store_forward_zones")]
async fn store_forward_zones(
    State(state): State<AppState>,
    Path(_server_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<ForwardZoneSet>), ApiError> {
    let zones = parse_zone_set(&body)?;
    let updated = state.local.store_forward_zones.execute(zones).await?;
    Ok((StatusCode::CREATED, Json(updated)))
}

#[instrument(skip(state, body), name = "internal_remove_forward_zones")]
async fn remove_forward_zones(
    State(state): State<AppState>,
    Path(_server_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let zones = parse_zone_set(&body)?;
    state.local.remove_forward_zones.execute(zones).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body), name = "internal_replace_forward_zone")]
async fn replace_forward_zone(
    State(state): State<AppState>,
    Path((_server_id, zone_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let zone = parse_zone(&body)?;
    state
        .local
        .replace_forward_zone
        .execute(&zone_id, zone)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state), name = "internal_remove_forward_zone")]
async fn remove_forward_zone(
    State(state): State<AppState>,
    Path((_server_id, zone_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.local.remove_forward_zones.execute_one(&zone_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state), name = "internal_flush_cache")]
async fn flush_cache(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(params): Query<FlushCacheQuery>,
) -> Result<Json<FlushResult>, ApiError> {
    let result = state
        .local
        .flush_cache
        .execute(&server_id, &params.domain)
        .await?;
    debug!(domain = %params.domain, count = result.count, "Local caches flushed");
    Ok(Json(result))
}
