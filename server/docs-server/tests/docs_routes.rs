#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use docs_engine::{DocsStore, DocumentBuilder, MethodDescriptor, ServiceDescriptor};
use docs_server::{create_app, DocsServer};

/// Test configuration backed by a temporary gateway root
struct TestConfig {
    _root: TempDir,
    store: DocsStore,
    app: Router,
}

impl TestConfig {
    fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create gateway root");
        let store = DocsStore::new(root.path());

        let services = vec![ServiceDescriptor::new("item", "Items in stock")
            .method("list", MethodDescriptor::new("List items").public())
            .method("create", MethodDescriptor::new("Create an item"))];
        let document = DocumentBuilder::new("inventory")
            .build(&services)
            .expect("Failed to build document");
        store
            .publish("inventory", &document)
            .expect("Failed to publish document");

        let server = DocsServer::new("inventory", &document, store.clone())
            .expect("Failed to create test server");

        Self {
            _root: root,
            store,
            app: create_app(server),
        }
    }

    async fn get(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body.to_vec())
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_probes() {
    let config = TestConfig::new();

    for uri in ["/readyz", "/livez"] {
        let (status, _, body) = config.get(get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "ok");
    }
}

#[tokio::test]
async fn test_document_is_served() {
    let config = TestConfig::new();

    let (status, headers, body) = config.get(get("/swagger/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");

    let document: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(document["openapi"], "3.1.0");
    assert_eq!(document["info"]["title"], "inventory");
    assert!(document["paths"]["/api/v1/item/create"]["post"].is_object());
}

#[tokio::test]
async fn test_initializer_resolves_url_from_forwarded_host() {
    let config = TestConfig::new();

    let request = Request::builder()
        .uri("/swagger/swagger-initializer.js")
        .header(header::HOST, "inventory:8080")
        .header("x-forwarded-host", "docs.example.com")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = config.get(request).await;
    assert_eq!(status, StatusCode::OK);

    let script = String::from_utf8(body).unwrap();
    assert!(script.contains("url: \"https://docs.example.com/swagger/openapi.json\","));
    assert!(script.contains("SwaggerUIBundle({"));
}

#[tokio::test]
async fn test_initializer_ignores_bare_host() {
    let config = TestConfig::new();

    let request = Request::builder()
        .uri("/swagger/swagger-initializer.js")
        .header(header::HOST, "inventory:8080")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = config.get(request).await;
    assert_eq!(status, StatusCode::OK);

    let script = String::from_utf8(body).unwrap();
    assert!(!script.contains("inventory:8080"));
    assert!(script.contains("window.location.origin + \"/\" + pathArray[1] + \"/openapi.json\""));
}

#[tokio::test]
async fn test_initializer_without_headers_derives_in_browser() {
    let config = TestConfig::new();

    let (status, _, body) = config.get(get("/swagger/swagger-initializer.js")).await;
    assert_eq!(status, StatusCode::OK);

    let script = String::from_utf8(body).unwrap();
    assert!(script.contains("window.location.origin + \"/\" + pathArray[1] + \"/openapi.json\""));
}

#[tokio::test]
async fn test_swagger_root_redirects_to_index() {
    let config = TestConfig::new();

    let (status, headers, _) = config.get(get("/swagger")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "swagger/index.html");

    let (status, headers, _) = config.get(get("/swagger/")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "index.html");
}

#[tokio::test]
async fn test_viewer_assets() {
    let config = TestConfig::new();

    let (status, headers, _) = config.get(get("/swagger/index.html")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let (status, _, body) = config.get(get("/swagger/no-such-asset.txt")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn test_server_document() {
    let config = TestConfig::new();

    let (status, _, body) = config.get(get("/swagger/server.json")).await;
    assert_eq!(status, StatusCode::OK);
    let document: Value = serde_json::from_slice(&body).unwrap();
    assert!(document["paths"]["/readyz"]["get"].is_object());
    assert!(document["paths"]["/catalog"]["get"].is_object());
}

#[tokio::test]
async fn test_catalog_lists_published_documents() {
    let config = TestConfig::new();

    let other = DocumentBuilder::new("billing").build(&[]).unwrap();
    config.store.publish("billing", &other).unwrap();

    let (status, _, body) = config.get(get("/catalog")).await;
    assert_eq!(status, StatusCode::OK);

    let documents: Vec<Value> = serde_json::from_slice(&body).unwrap();
    let titles: Vec<&str> = documents
        .iter()
        .map(|doc| doc["info"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["billing", "inventory"]);
}

#[tokio::test]
async fn test_unknown_route_returns_default_envelope() {
    let config = TestConfig::new();

    let request = Request::builder()
        .uri("/api/v1/item/list?page=2")
        .method("POST")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = config.get(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["messages"][0]["gravity"], "Fatal");
    assert_eq!(
        body["messages"][0]["value"],
        "404 page not found (uri: /api/v1/item/list?page=2, method: POST)"
    );
    assert!(body["data"].is_null());
}
