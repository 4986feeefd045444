//! USAspending upstream integration.
//!
//! This module handles:
//! - Request body types for the upstream API
//! - Builders from validated parameters to request bodies
//! - The upstream HTTP client
//! - Mock client for testing

pub mod client;
pub mod mock;
pub mod request;
pub mod types;

pub use client::{Operation, SpendingApi, UsaSpendingClient};
pub use mock::{MockResponse, MockSpendingApi, RecordedCall};
pub use request::{build_detail_request, build_search_request, build_summary_request};
pub use types::{AgencyType, DetailRequest, SearchRequest, SummaryRequest, TimePeriod};
