//! Resource service descriptors.
//!
//! A microservice exposes resources; each resource exposes named methods that
//! are invoked with `POST /<base>/<version>/<resource>/<method>`. Descriptors
//! are either built in code, with payload schemas taken from
//! [`utoipa::ToSchema`] types, or loaded from a YAML/JSON manifest.

use std::collections::BTreeMap;
use std::path::Path;

use error_common::{DocsError, Result};
use serde::{Deserialize, Serialize};
use utoipa::openapi::{RefOr, Schema};
use utoipa::ToSchema;

/// Version used when a service does not declare one
pub const DEFAULT_VERSION: &str = "v1";

/// Schema of a method payload plus the component schemas it references
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadSchema {
    /// Component name the request body refers to
    pub name: String,
    pub schema: RefOr<Schema>,
    #[serde(default)]
    pub components: BTreeMap<String, RefOr<Schema>>,
}

impl PayloadSchema {
    /// Capture the schema of a payload type
    pub fn of<T: ToSchema>() -> Self {
        let mut nested = Vec::new();
        T::schemas(&mut nested);
        Self {
            name: T::name().into_owned(),
            schema: T::schema(),
            components: nested.into_iter().collect(),
        }
    }

    pub fn from_parts(
        name: impl Into<String>,
        schema: RefOr<Schema>,
        components: BTreeMap<String, RefOr<Schema>>,
    ) -> Self {
        Self {
            name: name.into(),
            schema,
            components,
        }
    }
}

/// A single action exposed by a resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodDescriptor {
    #[serde(default)]
    pub description: String,
    /// Public methods are documented without the session cookie requirement
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub payload: Option<PayloadSchema>,
}

impl MethodDescriptor {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }

    #[must_use]
    pub fn payload<T: ToSchema>(mut self) -> Self {
        self.payload = Some(PayloadSchema::of::<T>());
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: PayloadSchema) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// A resource and its methods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub resource: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Routing priority forwarded to the gateway
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub methods: BTreeMap<String, MethodDescriptor>,
}

impl ServiceDescriptor {
    pub fn new(resource: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            description: description.into(),
            version: None,
            priority: None,
            methods: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn method(mut self, name: impl Into<String>, method: MethodDescriptor) -> Self {
        self.methods.insert(name.into(), method);
        self
    }

    /// Declared version, `v1` when absent or blank
    pub fn effective_version(&self) -> &str {
        self.version
            .as_deref()
            .filter(|version| !version.trim().is_empty())
            .unwrap_or(DEFAULT_VERSION)
    }

    /// # Errors
    ///
    /// Returns [`DocsError::Validation`] when the resource, version or a method
    /// name is not a single URL path segment.
    pub fn validate(&self) -> Result<()> {
        validate_segment("resource", &self.resource)?;
        validate_segment("version", self.effective_version())?;
        for name in self.methods.keys() {
            validate_segment("method", name)?;
        }
        Ok(())
    }
}

/// Services published by one microservice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceManifest {
    pub service_id: String,
    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
}

impl ServiceManifest {
    /// Load a YAML or JSON manifest
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, does not parse, or carries invalid
    /// identifiers.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| DocsError::io(path, e))?;
        let manifest = Self::from_yaml(&raw)?;
        tracing::debug!(
            path = %path.display(),
            service_id = %manifest.service_id,
            services = manifest.services.len(),
            "Loaded service manifest"
        );
        Ok(manifest)
    }

    /// Parse a manifest; JSON is accepted as a YAML subset
    ///
    /// # Errors
    ///
    /// See [`ServiceManifest::load`].
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(raw)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// # Errors
    ///
    /// Returns [`DocsError::Validation`] for an invalid service id, an invalid
    /// descriptor or a resource declared twice.
    pub fn validate(&self) -> Result<()> {
        validate_segment("service id", &self.service_id)?;
        let mut seen = std::collections::BTreeSet::new();
        for service in &self.services {
            service.validate()?;
            if !seen.insert(service.resource.as_str()) {
                return Err(DocsError::validation(format!(
                    "resource '{}' is declared more than once",
                    service.resource
                )));
            }
        }
        Ok(())
    }
}

/// Check that `value` can be used as a single URL path segment / folder name
///
/// # Errors
///
/// Returns [`DocsError::Validation`] naming `kind` on failure.
pub fn validate_segment(kind: &str, value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && value != "."
        && value != ".."
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(DocsError::validation(format!(
            "{kind} '{value}' must be a non-empty path segment of [A-Za-z0-9._-]"
        )))
    }
}
