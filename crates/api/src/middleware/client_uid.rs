use axum::{
    extract::{RawPathParams, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::warn;
use zonesync_application::ports::AccessAction;
use zonesync_domain::DomainError;

use crate::{errors::ApiError, state::AppState};

pub const CLIENT_UID_HEADER: &str = "X-PDNS-Client-UID";

/// Mutating requests must name their caller, and the caller must be allowed
/// to act on the zone in the path (empty for bulk requests).
pub async fn require_client_uid(
    State(state): State<AppState>,
    params: RawPathParams,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_read_only_method(request.method()) {
        return Ok(next.run(request).await);
    }

    let uid = extract_client_uid(&request).ok_or_else(|| {
        ApiError(DomainError::Unauthorized(format!(
            "missing {} header",
            CLIENT_UID_HEADER
        )))
    })?;

    let action = action_for(request.method());
    let zone = params
        .iter()
        .find(|(key, _)| *key == "zone_id")
        .map(|(_, value)| value.to_string())
        .unwrap_or_default();

    if !state.access.authorize(&uid, action, &zone).await? {
        warn!(uid = %uid, action = %action, zone = %zone, "Request denied by access policy");
        return Err(ApiError(DomainError::Forbidden(format!(
            "{} may not {} {}",
            uid, action, zone
        ))));
    }

    Ok(next.run(request).await)
}

pub fn is_read_only_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn action_for(method: &Method) -> AccessAction {
    if *method == Method::DELETE {
        AccessAction::Delete
    } else {
        AccessAction::Replace
    }
}

fn extract_client_uid(request: &Request) -> Option<String> {
    request
        .headers()
        .get(CLIENT_UID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
