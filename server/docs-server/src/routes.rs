use axum::{routing::get, Router};

use crate::{
    handlers::{catalog, fallback, health, swagger},
    server::DocsServer,
};

/// Create monitoring routes
pub fn health_routes() -> Router<DocsServer> {
    Router::new()
        .route("/readyz", get(health::readyz))
        .route("/livez", get(health::livez))
}

/// Create documentation routes
pub fn docs_routes() -> Router<DocsServer> {
    Router::new()
        .route("/catalog", get(catalog::list_documents))
        .route("/swagger", get(swagger::redirect_root))
        .route("/swagger/", get(swagger::redirect_index))
        .route("/swagger/*file", get(swagger::swagger_file))
}

/// Create all application routes
pub fn create_routes() -> Router<DocsServer> {
    Router::new()
        .merge(health_routes())
        .merge(docs_routes())
        .fallback(fallback::not_found)
}
