//! HTTP API handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::{Query, QueryRejection};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorBody};
use crate::metrics;
use crate::spending::request::build_detail_request;
use crate::spending::types::AgencyType;
use crate::spending::SpendingApi;

use super::params::{self, ContractsParams, ContractsQuery, SummaryParams, SummaryQuery};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream spending API.
    pub api: Arc<dyn SpendingApi>,
    /// Prometheus handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state without metrics.
    pub fn new(api: Arc<dyn SpendingApi>) -> Self {
        Self { api, metrics: None }
    }

    /// Attach a Prometheus handle for the /metrics endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Liveness message response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human readable message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
}

/// Liveness message.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses((status = 200, description = "Service is live", body = MessageResponse))
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "DefenseSpend API is live".to_string(),
    })
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Prometheus metrics, 404 when metrics are disabled.
pub async fn metrics_text(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn rejected(endpoint: &'static str, err: ApiError) -> ApiError {
    metrics::inc_validation_rejections(endpoint);
    debug!(endpoint, error = %err, "Rejected request parameters");
    err
}

/// Award summary for one agency and fiscal year.
#[utoipa::path(
    get,
    path = "/api/summary",
    tag = "Spending",
    params(
        ("toptier_code" = Option<String>, Query, description = "Toptier agency code, 3-4 characters", example = "020"),
        ("fiscal_year" = Option<i64>, Query, description = "Fiscal year, 2000-2100", example = 2023),
        ("agency_type" = Option<AgencyType>, Query, description = "awarding or funding"),
        ("award_type_codes" = Option<Vec<String>>, Query, description = "Award type codes, repeatable; defaults to A, B, C, D")
    ),
    responses(
        (status = 200, description = "Upstream summary, passed through", body = serde_json::Value),
        (status = 422, description = "Invalid parameters", body = ErrorBody),
        (status = 500, description = "Upstream failure", body = ErrorBody)
    )
)]
pub async fn get_summary(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = query
        .map_err(ApiError::from)
        .and_then(|Query(query)| SummaryParams::try_from(query))
        .map_err(|e| rejected("summary", e))?;
    let request = params.into_request();
    let body = state.api.award_summary(&request).await?;
    Ok(Json(body))
}

/// Department of Defense contracts for a fiscal year.
#[utoipa::path(
    get,
    path = "/api/contracts",
    tag = "Spending",
    params(
        ("fiscal_year" = Option<i64>, Query, description = "Fiscal year, 2000-2100", example = 2023),
        ("limit" = Option<i64>, Query, description = "Page size, 1-500", example = 50),
        ("page" = Option<i64>, Query, description = "Page number, starting at 1", example = 1),
        ("award_type_codes" = Option<Vec<String>>, Query, description = "Award type codes, repeatable; defaults to A, B, C, D")
    ),
    responses(
        (status = 200, description = "Upstream search results, passed through", body = serde_json::Value),
        (status = 422, description = "Invalid parameters", body = ErrorBody),
        (status = 500, description = "Upstream failure", body = ErrorBody)
    )
)]
pub async fn get_contracts(
    State(state): State<AppState>,
    query: Result<Query<ContractsQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let params = query
        .map_err(ApiError::from)
        .and_then(|Query(query)| ContractsParams::try_from(query))
        .map_err(|e| rejected("contracts", e))?;
    let request = params.into_request();
    let body = state.api.search_awards(&request).await?;
    Ok(Json(body))
}

/// A single award by identifier.
#[utoipa::path(
    get,
    path = "/api/contracts/{award_id}",
    tag = "Spending",
    params(("award_id" = String, Path, description = "Opaque upstream award identifier; `.` and `..` are rejected")),
    responses(
        (status = 200, description = "Upstream award, passed through", body = serde_json::Value),
        (status = 422, description = "Invalid award identifier", body = ErrorBody),
        (status = 500, description = "Upstream failure", body = ErrorBody)
    )
)]
pub async fn get_contract(
    State(state): State<AppState>,
    Path(award_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let award_id = params::award_id(award_id).map_err(|e| rejected("contract_detail", e))?;
    let request = build_detail_request(award_id);
    let body = state.api.award_detail(&request).await?;
    Ok(Json(body))
}
