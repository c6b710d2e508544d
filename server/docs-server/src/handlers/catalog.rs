use axum::{extract::State, Json};
use tracing::debug;
use utoipa::openapi::OpenApi;

use crate::error::ApiError;
use crate::server::DocsServer;

/// Every description document published under the gateway root
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Published OpenAPI documents, ordered by service id"),
        (status = 500, description = "A published folder could not be read")
    )
)]
pub async fn list_documents(
    State(server): State<DocsServer>,
) -> Result<Json<Vec<OpenApi>>, ApiError> {
    let store = server.store.clone();
    let documents = tokio::task::spawn_blocking(move || store.documents()).await??;
    debug!(count = documents.len(), "Listed published documents");
    Ok(Json(documents))
}
