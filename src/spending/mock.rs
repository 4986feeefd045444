//! Mock spending API for unit testing.
//!
//! This module provides a [`SpendingApi`] implementation that answers from
//! canned data and records every request it receives, without making real
//! network requests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::UpstreamError;

use super::client::SpendingApi;
use super::types::{DetailRequest, SearchRequest, SummaryRequest};

/// A request received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// Award summary request.
    Summary(SummaryRequest),
    /// Spending-by-award search.
    Search(SearchRequest),
    /// Award detail lookup.
    Detail(DetailRequest),
}

/// Canned upstream answer.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with this JSON body.
    Json(Value),
    /// Non-200 status with this raw body.
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw body.
        body: String,
    },
}

impl Default for MockResponse {
    fn default() -> Self {
        MockResponse::Json(Value::Object(Default::default()))
    }
}

impl MockResponse {
    fn to_result(&self) -> Result<Value, UpstreamError> {
        match self {
            MockResponse::Json(value) => Ok(value.clone()),
            MockResponse::Status { status, body } => Err(UpstreamError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

/// Mock spending API for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSpendingApi {
    /// Answer returned for every call.
    response: Arc<Mutex<MockResponse>>,
    /// Requests received, in order.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockSpendingApi {
    /// Create a mock that answers every call with an empty JSON object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers every call with `body`.
    pub fn with_json(body: Value) -> Self {
        let mock = Self::new();
        mock.set_response(MockResponse::Json(body));
        mock
    }

    /// Create a mock that fails every call with `status`.
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.set_response(MockResponse::Status {
            status,
            body: body.into(),
        });
        mock
    }

    /// Replace the canned answer.
    pub fn set_response(&self, response: MockResponse) {
        *lock(&self.response) = response;
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Clear recorded requests.
    pub fn clear(&self) {
        lock(&self.calls).clear();
    }

    fn answer(&self, call: RecordedCall) -> Result<Value, UpstreamError> {
        lock(&self.calls).push(call);
        lock(&self.response).to_result()
    }
}

#[async_trait]
impl SpendingApi for MockSpendingApi {
    async fn award_summary(&self, request: &SummaryRequest) -> Result<Value, UpstreamError> {
        self.answer(RecordedCall::Summary(request.clone()))
    }

    async fn search_awards(&self, request: &SearchRequest) -> Result<Value, UpstreamError> {
        self.answer(RecordedCall::Search(request.clone()))
    }

    async fn award_detail(&self, request: &DetailRequest) -> Result<Value, UpstreamError> {
        self.answer(RecordedCall::Detail(request.clone()))
    }
}
