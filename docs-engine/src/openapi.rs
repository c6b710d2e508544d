//! OpenAPI 3.1 description documents for resource services.

use std::collections::BTreeMap;

use error_common::{DocsError, Result};
use tracing::debug;
use utoipa::openapi::path::{HttpMethod, Operation, OperationBuilder, PathItem, PathsBuilder};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{Array, ObjectBuilder, Type};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityRequirement, SecurityScheme};
use utoipa::openapi::server::Server;
use utoipa::openapi::tag::{Tag, TagBuilder};
use utoipa::openapi::{
    ComponentsBuilder, ContentBuilder, InfoBuilder, OpenApi, OpenApiBuilder, Ref, RefOr,
    Required, ResponseBuilder, Schema,
};

use crate::registry::{validate_segment, MethodDescriptor, ServiceDescriptor};

/// Name of the cookie based security scheme
pub const COOKIE_AUTH: &str = "cookieAuth";
/// Session cookie checked by `cookieAuth`
pub const SESSION_COOKIE: &str = "sessionId";
/// Envelope every method responds with
pub const DEFAULT_RESPONSE_SCHEMA: &str = "DefaultResponse";
/// Resource whose routes are scoped by service id
pub const RESOURCE_RESOURCE: &str = "resource";
pub const DEFAULT_BASE_PATH: &str = "/api";

const JSON: &str = "application/json";

/// Message severities carried in the response envelope
pub const GRAVITIES: [&str; 4] = ["Info", "Warning", "Error", "Fatal"];

/// Builds the description document of one microservice
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    service_id: String,
    base_path: String,
    version: String,
}

impl DocumentBuilder {
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Prefix of every operation path, `/api` by default
    #[must_use]
    pub fn base_path(mut self, base_path: impl AsRef<str>) -> Self {
        self.base_path = normalize_base_path(base_path.as_ref());
        self
    }

    /// Version reported in `info.version`
    #[must_use]
    pub fn document_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Path of `method` on `service`
    pub fn operation_path(&self, service: &ServiceDescriptor, method: &str) -> String {
        format!(
            "{}/{method}",
            resource_prefix(&self.base_path, &self.service_id, service)
        )
    }

    /// Build the document for `services`
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Validation`] for invalid identifiers or when two
    /// methods map onto the same path.
    pub fn build(&self, services: &[ServiceDescriptor]) -> Result<OpenApi> {
        validate_segment("service id", &self.service_id)?;

        let mut schemas: BTreeMap<String, RefOr<Schema>> = BTreeMap::new();
        schemas.insert(DEFAULT_RESPONSE_SCHEMA.to_string(), default_response_schema());

        let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();
        let mut tags: Vec<Tag> = Vec::with_capacity(services.len());

        for service in services {
            service.validate()?;
            if tags.iter().any(|tag| tag.name == service.resource) {
                return Err(DocsError::validation(format!(
                    "resource '{}' is declared more than once",
                    service.resource
                )));
            }

            for (name, method) in &service.methods {
                let path = self.operation_path(service, name);
                if paths.contains_key(&path) {
                    return Err(DocsError::validation(format!(
                        "path '{path}' is declared more than once"
                    )));
                }

                if let Some(payload) = &method.payload {
                    for (component, schema) in &payload.components {
                        schemas
                            .entry(component.clone())
                            .or_insert_with(|| schema.clone());
                    }
                    if let RefOr::T(_) = payload.schema {
                        schemas
                            .entry(payload.name.clone())
                            .or_insert_with(|| payload.schema.clone());
                    }
                }

                let operation = operation(service, name, method);
                debug!(path = %path, resource = %service.resource, method = %name, "Documented method");
                paths.insert(path, PathItem::new(HttpMethod::Post, operation));
            }

            tags.push(
                TagBuilder::new()
                    .name(service.resource.clone())
                    .description(Some(service.description.clone()))
                    .build(),
            );
        }

        let paths = paths
            .into_iter()
            .fold(PathsBuilder::new(), |builder, (path, item)| builder.path(path, item))
            .build();

        let components = schemas
            .into_iter()
            .fold(ComponentsBuilder::new(), |builder, (name, schema)| {
                builder.schema(name, schema)
            })
            .security_scheme(
                COOKIE_AUTH,
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            )
            .build();

        Ok(OpenApiBuilder::new()
            .info(
                InfoBuilder::new()
                    .title(self.service_id.clone())
                    .version(self.version.clone())
                    .description(Some(format!("{} docs", self.service_id)))
                    .build(),
            )
            .servers(Some(vec![Server::new("/")]))
            .paths(paths)
            .components(Some(components))
            .tags(Some(tags))
            .build())
    }
}

/// Strip surrounding whitespace and trailing slashes and make the prefix
/// absolute. An empty prefix stays empty.
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Path shared by every method of `service` under a normalised `base_path`
pub fn resource_prefix(base_path: &str, service_id: &str, service: &ServiceDescriptor) -> String {
    let version = service.effective_version();
    if service.resource == RESOURCE_RESOURCE {
        format!("{base_path}/{service_id}/{version}/{}", service.resource)
    } else {
        format!("{base_path}/{version}/{}", service.resource)
    }
}

fn operation(service: &ServiceDescriptor, name: &str, method: &MethodDescriptor) -> Operation {
    let response = ResponseBuilder::new()
        .description("Default response")
        .content(
            JSON,
            ContentBuilder::new()
                .schema(Some(Ref::from_schema_name(DEFAULT_RESPONSE_SCHEMA)))
                .build(),
        )
        .build();

    let mut builder = OperationBuilder::new()
        .operation_id(Some(format!("{} - {}", service.resource, name)))
        .tag(service.resource.clone())
        .response("default", response);

    if !method.description.is_empty() {
        builder = builder.description(Some(method.description.clone()));
    }

    if let Some(payload) = &method.payload {
        let schema = match &payload.schema {
            RefOr::Ref(reference) => RefOr::Ref(reference.clone()),
            RefOr::T(_) => RefOr::Ref(Ref::from_schema_name(payload.name.clone())),
        };
        builder = builder.request_body(Some(
            RequestBodyBuilder::new()
                .content(JSON, ContentBuilder::new().schema(Some(schema)).build())
                .required(Some(Required::True))
                .build(),
        ));
    }

    if !method.public {
        builder = builder.security(SecurityRequirement::new(COOKIE_AUTH, Vec::<String>::new()));
    }

    builder.build()
}

fn string_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new().schema_type(Type::String).build(),
    ))
}

fn object_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new().schema_type(Type::Object).build(),
    ))
}

/// `{ messages: [{ gravity, value }], data, schema }`
fn default_response_schema() -> RefOr<Schema> {
    let message = ObjectBuilder::new()
        .schema_type(Type::Object)
        .property(
            "gravity",
            RefOr::T(Schema::Object(
                ObjectBuilder::new()
                    .schema_type(Type::String)
                    .enum_values(Some(GRAVITIES))
                    .build(),
            )),
        )
        .property("value", string_schema())
        .build();

    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(Type::Object)
            .property(
                "messages",
                RefOr::T(Schema::Array(Array::new(RefOr::T(Schema::Object(message))))),
            )
            .property("data", object_schema())
            .property("schema", object_schema())
            .build(),
    ))
}
