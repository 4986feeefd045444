//! OpenAPI document for the HTTP API.

use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::spending::types::AgencyType;

use super::handlers::{self, HealthResponse, MessageResponse};

/// OpenAPI documentation for the HTTP API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DefenseSpend API",
        version = "0.1.0",
        description = "Read-only proxy over the USAspending API for Department of Defense contracts",
        license(name = "MIT")
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::get_summary,
        handlers::get_contracts,
        handlers::get_contract
    ),
    components(schemas(MessageResponse, HealthResponse, ErrorBody, AgencyType)),
    tags(
        (name = "System", description = "Liveness and health"),
        (name = "Spending", description = "USAspending pass-through")
    )
)]
pub struct ApiDoc;
