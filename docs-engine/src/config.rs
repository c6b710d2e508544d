//! Environment configuration.
//!
//! Values come from the process environment, seeded from a `.env` file by
//! [`load_dotenv`] before anything else reads it. Command line flags of the
//! server override them.

use std::path::PathBuf;

use directories::BaseDirs;
use error_common::{DocsError, Result};

use crate::openapi::DEFAULT_BASE_PATH;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Gateway root relative to the user's home directory
pub const DEFAULT_GATEWAY_DIR: &str = "etc/apidocs/gateway";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    pub host: String,
    pub port: u16,
    /// Folder holding published documents and gateway routes
    pub gateway_root: PathBuf,
    /// Prefix of every documented operation
    pub base_path: String,
    /// Write documents and routes to `gateway_root` at startup
    pub publish: bool,
    /// Address the gateway forwards to, `http://localhost:<port>` when unset
    pub service_address: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            gateway_root: default_gateway_root(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            publish: true,
            service_address: None,
        }
    }
}

impl DocsConfig {
    /// Read the process environment. Call [`load_dotenv`] first.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Config`] for an unparsable `PORT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Upstream address published in the gateway routes
    pub fn service_address(&self) -> String {
        self.service_address
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }

    /// Read configuration through `lookup`
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Config`] for an unparsable `PORT`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(host) = get("APIDOCS_HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| DocsError::config(format!("PORT '{port}' is not a valid port: {e}")))?;
        }
        if let Some(root) = get("APIDOCS_GATEWAY_ROOT") {
            config.gateway_root = PathBuf::from(root);
        }
        if let Some(base_path) = get("APIDOCS_BASE_PATH") {
            config.base_path = base_path;
        }
        if let Some(address) = get("APIDOCS_SERVICE_ADDRESS") {
            config.service_address = Some(address);
        }
        if let Some(publish) = lookup("APIDOCS_PUBLISH") {
            config.publish = parse_flag(&publish);
        }

        Ok(config)
    }
}

/// Seed the process environment from `.env` in the working directory or one
/// of its parents. Existing variables win. Returns whether a file was loaded.
pub fn load_dotenv() -> bool {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            true
        }
        Err(e) => {
            tracing::debug!("No .env file loaded: {e}. Ignore this in production.");
            false
        }
    }
}

/// `true` and `1` enable a flag; anything else disables it
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}

fn default_gateway_root() -> PathBuf {
    BaseDirs::new().map_or_else(
        || PathBuf::from(DEFAULT_GATEWAY_DIR),
        |dirs| dirs.home_dir().join(DEFAULT_GATEWAY_DIR),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = DocsConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.base_path, "/api");
        assert!(config.publish);
        assert!(config.gateway_root.ends_with(DEFAULT_GATEWAY_DIR));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = DocsConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("APIDOCS_GATEWAY_ROOT", "/srv/gateway"),
            ("APIDOCS_BASE_PATH", "/internal"),
            ("APIDOCS_PUBLISH", "false"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.gateway_root, PathBuf::from("/srv/gateway"));
        assert_eq!(config.base_path, "/internal");
        assert!(!config.publish);
    }

    #[test]
    fn empty_port_falls_back_and_bad_port_fails() {
        assert_eq!(DocsConfig::from_lookup(lookup(&[("PORT", "")])).unwrap().port, 8080);
        assert!(matches!(
            DocsConfig::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(DocsError::Config(_))
        ));
    }

    #[test]
    fn service_address_defaults_to_localhost() {
        let config = DocsConfig::from_lookup(lookup(&[("PORT", "9000")])).unwrap();
        assert_eq!(config.service_address(), "http://localhost:9000");

        let config = DocsConfig::from_lookup(lookup(&[(
            "APIDOCS_SERVICE_ADDRESS",
            "http://inventory:8080",
        )]))
        .unwrap();
        assert_eq!(config.service_address(), "http://inventory:8080");
    }

    #[test]
    fn flags_accept_true_and_one() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag(""));
    }
}
