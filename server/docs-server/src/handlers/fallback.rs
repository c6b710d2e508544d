use axum::{
    http::{Method, StatusCode, Uri},
    Json,
};

use crate::types::{DefaultResponse, Gravity, Message};

/// Unmatched routes answer with the default envelope and a fatal message
pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<DefaultResponse>) {
    let request_uri = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |path_and_query| path_and_query.as_str());

    let response = DefaultResponse::default().with_message(Message::new(
        Gravity::Fatal,
        format!("404 page not found (uri: {request_uri}, method: {method})"),
    ));

    (StatusCode::NOT_FOUND, Json(response))
}
