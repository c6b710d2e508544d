//! Swagger UI viewer, its bootstrap script and the description document.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Redirect, Response},
};
use docs_engine::store::INITIALIZER_FILE_NAME;
use docs_engine::{PageLocation, SwaggerUiConfig, DOCUMENT_FILE_NAME};
use error_common::DocsError;
use tracing::{debug, warn};
use utoipa::OpenApi;

use crate::error::ApiError;
use crate::openapi::ServerApiDoc;
use crate::server::DocsServer;

/// Description of the server's own endpoints
pub const SERVER_DOCUMENT_FILE_NAME: &str = "server.json";

const JAVASCRIPT: &str = "application/javascript; charset=utf-8";
const JSON: &str = "application/json";

pub async fn redirect_root() -> Redirect {
    Redirect::to("swagger/index.html")
}

pub async fn redirect_index() -> Redirect {
    Redirect::to("index.html")
}

pub async fn swagger_file(
    State(server): State<DocsServer>,
    Path(file): Path<String>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, ApiError> {
    match file.as_str() {
        DOCUMENT_FILE_NAME => {
            Ok(([(header::CONTENT_TYPE, JSON)], server.document_json.as_str().to_owned()).into_response())
        }
        INITIALIZER_FILE_NAME => {
            let script = initializer_config(&headers, &uri).render_initializer();
            Ok(([(header::CONTENT_TYPE, JAVASCRIPT)], script).into_response())
        }
        SERVER_DOCUMENT_FILE_NAME => {
            let document = ServerApiDoc::openapi().to_json().map_err(DocsError::from)?;
            Ok(([(header::CONTENT_TYPE, JSON)], document).into_response())
        }
        asset => serve_asset(&server, asset),
    }
}

/// Let the browser derive the document URL from `window.location`, unless a
/// proxy announced the public host with `X-Forwarded-Host`. `Host` alone may
/// name an internal upstream and is never used.
pub fn initializer_config(headers: &HeaderMap, uri: &Uri) -> SwaggerUiConfig {
    let Some(host) = header_value(headers, "x-forwarded-host") else {
        debug!("No forwarded host, serving page-relative initializer");
        return SwaggerUiConfig::default();
    };

    let resolved = PageLocation::from_request_parts(
        host,
        header_value(headers, "x-forwarded-proto"),
        header_value(headers, "x-forwarded-prefix"),
        uri.path(),
    )
    .and_then(|location| SwaggerUiConfig::for_location(&location));

    match resolved {
        Ok(config) => config,
        Err(e) => {
            warn!(host = host, error = %e, "Falling back to page-relative initializer");
            SwaggerUiConfig::default()
        }
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn serve_asset(server: &DocsServer, asset: &str) -> Result<Response, ApiError> {
    match utoipa_swagger_ui::serve(asset, Arc::clone(&server.swagger_config)) {
        Ok(Some(file)) => Ok((
            [(header::CONTENT_TYPE, file.content_type)],
            file.bytes.into_owned(),
        )
            .into_response()),
        Ok(None) => Err(ApiError::not_found(format!("swagger asset '{asset}'"))),
        Err(e) => Err(ApiError::internal(format!(
            "failed to serve swagger asset '{asset}': {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn uri() -> Uri {
        Uri::from_static("/swagger/swagger-initializer.js")
    }

    #[test]
    fn bare_host_keeps_browser_derivation() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("inventory:8080"));

        let config = initializer_config(&headers, &uri());
        assert!(config.fixed_url().is_none());
        assert!(config.render_initializer().contains("window.location"));
    }

    #[test]
    fn forwarded_host_resolves_fixed_url() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-host", HeaderValue::from_static("localhost:8080"));

        let config = initializer_config(&headers, &uri());
        assert_eq!(
            config.fixed_url().map(|url| url.as_str()),
            Some("http://localhost:8080/swagger/openapi.json")
        );
    }

    #[test]
    fn forwarded_headers_take_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("inventory:8080"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("api.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        headers.insert("x-forwarded-prefix", HeaderValue::from_static("/inventory"));

        let config = initializer_config(&headers, &uri());
        assert_eq!(
            config.fixed_url().map(|url| url.as_str()),
            Some("https://api.example.com/inventory/openapi.json")
        );
    }

    #[test]
    fn missing_host_keeps_browser_derivation() {
        let config = initializer_config(&HeaderMap::new(), &uri());
        assert!(config.fixed_url().is_none());
    }

    #[test]
    fn invalid_host_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-host", HeaderValue::from_static("bad/host"));
        assert!(initializer_config(&headers, &uri()).fixed_url().is_none());
    }
}
