use std::sync::Arc;

use docs_engine::DocsStore;
use error_common::Result;
use utoipa::openapi::OpenApi;
use utoipa_swagger_ui::Config;

/// Path the viewer assets are mounted under
pub const SWAGGER_MOUNT: &str = "/swagger";

/// Shared state of the documentation server
#[derive(Clone)]
pub struct DocsServer {
    /// Id of the microservice being documented
    pub service_id: String,
    /// Description document, pre-serialized
    pub document_json: Arc<String>,
    /// Published documents of every microservice
    pub store: DocsStore,
    /// Configuration for the bundled Swagger UI assets
    pub swagger_config: Arc<Config<'static>>,
}

impl DocsServer {
    /// # Errors
    ///
    /// Fails when the document cannot be serialized.
    pub fn new(service_id: impl Into<String>, document: &OpenApi, store: DocsStore) -> Result<Self> {
        let document_json = serde_json::to_string(document)?;
        let swagger_config = Config::from("/swagger/openapi.json");

        Ok(Self {
            service_id: service_id.into(),
            document_json: Arc::new(document_json),
            store,
            swagger_config: Arc::new(swagger_config),
        })
    }
}
