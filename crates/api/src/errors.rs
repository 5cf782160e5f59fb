use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use zonesync_domain::DomainError;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::ForwardZoneNotFound(_) => StatusCode::NOT_FOUND,

            DomainError::ForwardZoneAlreadyExists(_) => StatusCode::CONFLICT,

            DomainError::InvalidForwardZone(_)
            | DomainError::InvalidInput(_)
            | DomainError::InvalidIpAddress(_) => StatusCode::BAD_REQUEST,

            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,

            DomainError::PropagationIncomplete { .. }
            | DomainError::Transport { .. }
            | DomainError::IdentityMismatch { .. }
            | DomainError::RemoteApply { .. }
            | DomainError::Timeout(_)
            | DomainError::UpstreamDns(_)
            | DomainError::DirectoryUnavailable(_) => StatusCode::BAD_GATEWAY,

            DomainError::BackendWrite(_) | DomainError::IoError(_) | DomainError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self.0, "Request failed");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
