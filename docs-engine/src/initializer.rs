//! Swagger UI bootstrap configuration.
//!
//! The viewer itself is the pre-built Swagger UI bundle; this module only
//! assembles the configuration record handed to `SwaggerUIBundle(...)` and
//! renders it as `swagger-initializer.js`.

use error_common::Result;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::location::{PageLocation, DOCUMENT_FILE_NAME};

/// DOM element the viewer mounts into
pub const DEFAULT_DOM_ID: &str = "#swagger-ui";

/// Where the viewer fetches the description document from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSource {
    /// Derived in the browser: `origin + "/" + pathArray[1] + "/" + file_name`
    PageRelative { file_name: String },
    /// Resolved ahead of time, embedded verbatim
    Fixed(Url),
}

impl Default for DocumentSource {
    fn default() -> Self {
        Self::PageRelative {
            file_name: DOCUMENT_FILE_NAME.to_string(),
        }
    }
}

/// Presets exported by the Swagger UI bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Apis,
    Standalone,
}

impl Preset {
    pub fn js_expression(self) -> &'static str {
        match self {
            Preset::Apis => "SwaggerUIBundle.presets.apis",
            Preset::Standalone => "SwaggerUIStandalonePreset",
        }
    }
}

/// Plugins exported by the Swagger UI bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plugin {
    DownloadUrl,
}

impl Plugin {
    pub fn js_expression(self) -> &'static str {
        match self {
            Plugin::DownloadUrl => "SwaggerUIBundle.plugins.DownloadUrl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Top bar with the URL box; needs [`Preset::Standalone`]
    Standalone,
    Base,
}

impl Layout {
    pub fn name(self) -> &'static str {
        match self {
            Layout::Standalone => "StandaloneLayout",
            Layout::Base => "BaseLayout",
        }
    }
}

/// Configuration record passed to `SwaggerUIBundle`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwaggerUiConfig {
    pub source: DocumentSource,
    pub dom_id: String,
    pub deep_linking: bool,
    pub presets: Vec<Preset>,
    pub plugins: Vec<Plugin>,
    pub layout: Layout,
}

impl Default for SwaggerUiConfig {
    fn default() -> Self {
        Self {
            source: DocumentSource::default(),
            dom_id: DEFAULT_DOM_ID.to_string(),
            deep_linking: true,
            presets: vec![Preset::Apis, Preset::Standalone],
            plugins: vec![Plugin::DownloadUrl],
            layout: Layout::Standalone,
        }
    }
}

impl SwaggerUiConfig {
    /// Default configuration with the document URL resolved for `location`
    ///
    /// # Errors
    ///
    /// Propagates [`PageLocation::openapi_url`] failures.
    pub fn for_location(location: &PageLocation) -> Result<Self> {
        Ok(Self {
            source: DocumentSource::Fixed(location.openapi_url()?),
            ..Self::default()
        })
    }

    /// The document URL this configuration points at, when known ahead of time
    pub fn fixed_url(&self) -> Option<&Url> {
        match &self.source {
            DocumentSource::Fixed(url) => Some(url),
            DocumentSource::PageRelative { .. } => None,
        }
    }

    /// Render `swagger-initializer.js`
    pub fn render_initializer(&self) -> String {
        let mut lines = vec!["window.onload = function() {".to_string()];

        let url_expression = match &self.source {
            DocumentSource::PageRelative { file_name } => {
                lines.push("  var pathArray = window.location.pathname.split('/');".to_string());
                format!(
                    "window.location.origin + \"/\" + pathArray[1] + {}",
                    js_string(&format!("/{file_name}"))
                )
            }
            DocumentSource::Fixed(url) => js_string(url.as_str()),
        };

        lines.push("  window.ui = SwaggerUIBundle({".to_string());
        lines.push(format!("    url: {url_expression},"));
        lines.push(format!("    dom_id: {},", js_string(&self.dom_id)));
        lines.push(format!("    deepLinking: {},", self.deep_linking));
        lines.push(format!(
            "    presets: {},",
            js_array(self.presets.iter().map(|preset| preset.js_expression()))
        ));
        lines.push(format!(
            "    plugins: {},",
            js_array(self.plugins.iter().map(|plugin| plugin.js_expression()))
        ));
        lines.push(format!("    layout: {}", js_string(self.layout.name())));
        lines.push("  });".to_string());
        lines.push("};".to_string());

        let mut script = lines.join("\n");
        script.push('\n');
        script
    }
}

fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn js_array<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        return "[]".to_string();
    }
    format!("[\n      {}\n    ]", items.join(",\n      "))
}
