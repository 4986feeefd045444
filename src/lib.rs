//! DefenseSpend: a read-only HTTP proxy over the USAspending API.
//!
//! Callers hit a few simple GET endpoints; the service reshapes their query
//! parameters into the JSON bodies the USAspending v2 API expects, forwards
//! the call, and hands the upstream JSON back untouched.
//!
//! ```text
//! GET /api/contracts?fiscal_year=2023&limit=10
//!   -> POST {base}/search/spending_by_award/
//!      {"filters": {"time_period": [{"start_date": "2023-01-01", ...}], ...}, "limit": 10, ...}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`spending`]: Upstream request bodies, builders and client
//! - [`api`]: HTTP endpoints, parameter validation, OpenAPI document
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod spending;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, AppError, UpstreamError};
