//! HTTP API module for the spending proxy endpoints.

pub mod docs;
pub mod handlers;
pub mod params;
pub mod routes;

pub use docs::ApiDoc;
pub use handlers::AppState;
pub use routes::create_router;
