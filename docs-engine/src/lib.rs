//! API documentation publishing for resource microservices
//!
//! This crate turns a set of resource service descriptors into an OpenAPI 3.1
//! description document and bootstraps the Swagger UI viewer against it.
//!
//! # Key Features
//!
//! - **Document URL derivation**: the viewer fetches `openapi.json` next to the
//!   first path segment of the page it is loaded from
//! - **Viewer bootstrap**: renders `swagger-initializer.js` for the pre-built
//!   Swagger UI bundle
//! - **Document generation**: one `POST` operation per resource method, payload
//!   schemas taken from `utoipa::ToSchema` types or manifests
//! - **Publishing**: per-service documentation folders and reverse-proxy routing
//!   files under a shared gateway root
//!
//! # Example
//!
//! ```rust
//! use docs_engine::{PageLocation, SwaggerUiConfig};
//!
//! let location = PageLocation::parse("https://host/app/docs")?;
//! let config = SwaggerUiConfig::for_location(&location)?;
//! assert!(config.render_initializer().contains("\"https://host/app/openapi.json\""));
//! # Ok::<(), error_common::DocsError>(())
//! ```

pub mod config;
pub mod gateway;
pub mod initializer;
pub mod location;
pub mod openapi;
pub mod registry;
pub mod store;

pub use config::DocsConfig;
pub use gateway::GatewayConfiguration;
pub use initializer::{DocumentSource, Layout, Plugin, Preset, SwaggerUiConfig};
pub use location::{PageLocation, DOCUMENT_FILE_NAME};
pub use openapi::DocumentBuilder;
pub use registry::{MethodDescriptor, PayloadSchema, ServiceDescriptor, ServiceManifest};
pub use store::DocsStore;
