//! Published documentation folders under the gateway root.
//!
//! ```text
//! <root>/swagger/<service_id>/openapi.json
//! <root>/swagger/<service_id>/swagger-initializer.js
//! <root>/dynamic/<service_id>.yaml
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use error_common::{DocsError, Result};
use tracing::{debug, info};
use utoipa::openapi::OpenApi;

use crate::gateway::GatewayConfiguration;
use crate::initializer::SwaggerUiConfig;
use crate::location::DOCUMENT_FILE_NAME;
use crate::registry::validate_segment;

pub const SWAGGER_DIR: &str = "swagger";
pub const DYNAMIC_DIR: &str = "dynamic";
pub const INITIALIZER_FILE_NAME: &str = "swagger-initializer.js";

#[derive(Debug, Clone)]
pub struct DocsStore {
    root: PathBuf,
}

impl DocsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn swagger_dir(&self) -> PathBuf {
        self.root.join(SWAGGER_DIR)
    }

    pub fn service_dir(&self, service_id: &str) -> PathBuf {
        self.swagger_dir().join(service_id)
    }

    /// Replace the documentation folder of `service_id`
    ///
    /// # Errors
    ///
    /// Fails on an invalid service id or any filesystem error.
    pub fn publish(&self, service_id: &str, document: &OpenApi) -> Result<PathBuf> {
        validate_segment("service id", service_id)?;
        let dir = self.service_dir(service_id);

        match fs::remove_dir_all(&dir) {
            Ok(()) => debug!(dir = %dir.display(), "Removed previous documentation"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(DocsError::io(&dir, e)),
        }
        fs::create_dir_all(&dir).map_err(|e| DocsError::io(&dir, e))?;

        let document_path = dir.join(DOCUMENT_FILE_NAME);
        write_file(&document_path, &serde_json::to_string_pretty(document)?)?;
        write_file(
            &dir.join(INITIALIZER_FILE_NAME),
            &SwaggerUiConfig::default().render_initializer(),
        )?;

        info!(
            service_id = service_id,
            path = %document_path.display(),
            "Published API description document"
        );
        Ok(dir)
    }

    /// Write the reverse-proxy routing file of `service_id`
    ///
    /// # Errors
    ///
    /// Fails on an invalid service id, serialization or filesystem errors.
    pub fn publish_gateway(
        &self,
        service_id: &str,
        configuration: &GatewayConfiguration,
    ) -> Result<PathBuf> {
        validate_segment("service id", service_id)?;
        let dir = self.root.join(DYNAMIC_DIR);
        fs::create_dir_all(&dir).map_err(|e| DocsError::io(&dir, e))?;

        let path = dir.join(format!("{service_id}.yaml"));
        write_file(&path, &configuration.to_yaml()?)?;
        info!(service_id = service_id, path = %path.display(), "Published gateway routes");
        Ok(path)
    }

    /// Ids of every published service, sorted
    ///
    /// # Errors
    ///
    /// Fails when the swagger folder exists but cannot be listed.
    pub fn service_ids(&self) -> Result<Vec<String>> {
        let dir = self.swagger_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DocsError::io(&dir, e)),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DocsError::io(&dir, e))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| DocsError::io(entry.path(), e))?
                .is_dir();
            if is_dir {
                ids.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Published document of `service_id`
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::NotFound`] when nothing is published for the id.
    pub fn document(&self, service_id: &str) -> Result<OpenApi> {
        validate_segment("service id", service_id)?;
        let path = self.service_dir(service_id).join(DOCUMENT_FILE_NAME);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DocsError::not_found(format!(
                    "no document published for '{service_id}'"
                )))
            }
            Err(e) => return Err(DocsError::io(&path, e)),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Every published document, ordered by service id
    ///
    /// # Errors
    ///
    /// Fails when any published folder lacks a readable document.
    pub fn documents(&self) -> Result<Vec<OpenApi>> {
        self.service_ids()?
            .iter()
            .map(|id| self.document(id))
            .collect()
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| DocsError::io(path, e))
}
