//! Unified error types for the spending proxy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::QueryRejection;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Unified error type for process startup and configuration.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure talking to the upstream spending API.
///
/// Every way an upstream call can go wrong collapses into this type. The HTTP
/// boundary does not distinguish between the variants.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Upstream answered with a status other than 200.
    #[error("upstream returned HTTP {status}: {body}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered 200 but the body was not JSON.
    #[error("upstream returned an invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The target URL could not be built from the base URL.
    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),

    /// A path segment would be read as `.` or `..` by upstream.
    #[error("{0:?} is not a usable path segment")]
    DotSegment(String),
}

impl UpstreamError {
    /// Status code reported by upstream, if the failure was a status failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body returned to API callers.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable failure description.
    pub detail: String,
}

/// Errors surfaced by the HTTP endpoint layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Query or path parameter failed validation.
    #[error("{0}")]
    Validation(String),

    /// Upstream call failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
