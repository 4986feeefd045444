//! USAspending API client.
//!
//! [`SpendingApi`] is the seam between the HTTP endpoints and the upstream
//! service. [`UsaSpendingClient`] talks to the real API; tests use
//! [`super::mock::MockSpendingApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use strum::{Display, IntoStaticStr};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::error::{AppError, UpstreamError};
use crate::metrics::{self, LatencyTimer};

use super::types::{DetailRequest, SearchRequest, SummaryRequest};

/// Upstream operations, used as log fields and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    /// `POST /awards/summary/`
    AwardSummary,
    /// `POST /search/spending_by_award/`
    SpendingByAward,
    /// `GET /awards/{id}/`
    AwardDetail,
}

impl Operation {
    /// Metric label for this operation.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Operations offered by the upstream spending API.
///
/// Every method makes a single attempt. A 200 response yields the parsed JSON
/// body untouched; anything else is an [`UpstreamError`].
#[async_trait]
pub trait SpendingApi: Send + Sync {
    /// Fetch an award summary for one agency.
    async fn award_summary(&self, request: &SummaryRequest) -> Result<Value, UpstreamError>;

    /// Search awards by filters.
    async fn search_awards(&self, request: &SearchRequest) -> Result<Value, UpstreamError>;

    /// Fetch a single award.
    async fn award_detail(&self, request: &DetailRequest) -> Result<Value, UpstreamError>;
}

/// HTTP implementation of [`SpendingApi`].
#[derive(Debug, Clone)]
pub struct UsaSpendingClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// API base URL, e.g. `https://api.usaspending.gov/api/v2`.
    base_url: Url,
}

impl UsaSpendingClient {
    /// Create a client from config.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.http_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let http = builder.build()?;

        Self::with_client(http, &config.usaspending_base_url)
            .map_err(|e| AppError::InvalidConfig(format!("USASPENDING_BASE_URL: {}", e)))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve path segments below the base URL. Each segment is
    /// percent-encoded, so a `/` inside an identifier stays in its segment.
    /// `.` and `..` are refused: the URL parser would resolve them against
    /// the path instead of encoding them.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(UpstreamError::DotSegment(dot.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[instrument(skip(self, request), fields(operation = %operation))]
    async fn send(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, UpstreamError> {
        metrics::inc_upstream_requests(operation.label());
        let timer = LatencyTimer::upstream(operation.label());

        let result = execute(request).await;

        match &result {
            Ok(_) => debug!(elapsed_ms = timer.elapsed_ms(), "Upstream call succeeded"),
            Err(e) => {
                metrics::inc_upstream_failures(operation.label());
                warn!(status = ?e.status(), error = %e, "Upstream call failed");
            }
        }

        result
    }
}

async fn execute(request: reqwest::RequestBuilder) -> Result<Value, UpstreamError> {
    let response = request.send().await?;
    let status = response.status();

    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl SpendingApi for UsaSpendingClient {
    async fn award_summary(&self, request: &SummaryRequest) -> Result<Value, UpstreamError> {
        let url = self.endpoint(&["awards", "summary", ""])?;
        debug!(url = %url, "Requesting award summary");
        self.send(Operation::AwardSummary, self.http.post(url).json(request))
            .await
    }

    async fn search_awards(&self, request: &SearchRequest) -> Result<Value, UpstreamError> {
        let url = self.endpoint(&["search", "spending_by_award", ""])?;
        debug!(url = %url, "Searching spending by award");
        self.send(Operation::SpendingByAward, self.http.post(url).json(request))
            .await
    }

    async fn award_detail(&self, request: &DetailRequest) -> Result<Value, UpstreamError> {
        let url = self.endpoint(&request.path_segments())?;
        debug!(url = %url, "Requesting award detail");
        self.send(Operation::AwardDetail, self.http.get(url)).await
    }
}
