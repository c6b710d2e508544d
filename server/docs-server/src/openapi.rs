use utoipa::OpenApi;

use crate::types::{DefaultResponse, Gravity, Message, ProbeResponse};

/// Description of the server's operational endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        // Monitoring endpoints
        crate::handlers::health::readyz,
        crate::handlers::health::livez,

        // Catalog endpoints
        crate::handlers::catalog::list_documents,
    ),
    components(
        schemas(
            ProbeResponse,
            DefaultResponse,
            Message,
            Gravity,
        )
    ),
    tags(
        (name = "monitoring", description = "Liveness and readiness probes"),
        (name = "catalog", description = "Published API description documents"),
    ),
    info(
        title = "apidocs server",
        description = "Publishes OpenAPI documents of resource microservices and serves the Swagger UI viewer.",
    ),
)]
pub struct ServerApiDoc;
