//! Documentation server
//!
//! Serves the API description document of one microservice together with the
//! Swagger UI viewer, plus the catalog of every document published under the
//! shared gateway root.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use error::{ApiError, ApiErrorResponse};
pub use server::DocsServer;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(server: DocsServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(server)
}
