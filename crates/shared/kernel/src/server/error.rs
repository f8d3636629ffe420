use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_derive::api_model;
use std::borrow::Cow;
use tracing::error;

#[api_model]
/// Error payload returned by every failing endpoint
pub struct ErrorBody {
    /// Human-readable reason
    pub detail: String,
}

/// An HTTP failure: a status code plus the `detail` shown to the client.
///
/// Slices convert their own error enums into this type; it is the only place
/// where domain failures meet status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: Cow<'static, str>,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<Cow<'static, str>>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn not_found(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn bad_request(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn conflict(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::CONFLICT, detail)
    }

    pub fn unprocessable(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    /// Hides `detail` from the client; it is logged instead.
    pub fn internal(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.detail)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = if self.status.is_server_error() {
            error!(status = %self.status, detail = %self.detail, "Request failed");
            "Internal server error".to_owned()
        } else {
            self.detail.into_owned()
        };

        (self.status, Json(ErrorBody { detail })).into_response()
    }
}
