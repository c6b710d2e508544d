//! Page locations and the document URL derived from them.
//!
//! The viewer page lives somewhere below a service prefix, e.g.
//! `https://host/inventory/swagger/index.html`. The description document is
//! expected at `<origin>/<first path segment>/openapi.json`.

use error_common::{DocsError, Result};
use url::Url;

/// File name of the API description document
pub const DOCUMENT_FILE_NAME: &str = "openapi.json";

/// An absolute, hierarchical browser location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    /// Parse an absolute location such as `https://host/app/docs`
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::InvalidLocation`] for relative URLs, URLs without a
    /// hierarchical path (`data:`, `mailto:`) and URLs with an opaque origin.
    pub fn parse(location: &str) -> Result<Self> {
        let url = Url::parse(location)
            .map_err(|e| DocsError::InvalidLocation(format!("{location}: {e}")))?;
        Self::from_url(url)
    }

    /// Wrap an already parsed URL
    ///
    /// # Errors
    ///
    /// Same conditions as [`PageLocation::parse`].
    pub fn from_url(url: Url) -> Result<Self> {
        if url.cannot_be_a_base() {
            return Err(DocsError::InvalidLocation(format!(
                "{url}: location has no hierarchical path"
            )));
        }
        if !url.origin().is_tuple() {
            return Err(DocsError::InvalidLocation(format!(
                "{url}: location has an opaque origin"
            )));
        }
        Ok(Self { url })
    }

    /// Rebuild the browser-visible location from the parts of an HTTP request.
    ///
    /// `forwarded_proto` and `forwarded_prefix` come from the
    /// `X-Forwarded-Proto` / `X-Forwarded-Prefix` headers set by a reverse
    /// proxy; the scheme defaults to `http`.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::InvalidLocation`] when the host is empty or carries
    /// URL delimiters, or when the resulting URL does not parse.
    pub fn from_request_parts(
        host: &str,
        forwarded_proto: Option<&str>,
        forwarded_prefix: Option<&str>,
        path: &str,
    ) -> Result<Self> {
        let host = host.trim();
        if host.is_empty() || host.contains(['/', '?', '#', '@', '\\']) {
            return Err(DocsError::InvalidLocation(format!(
                "'{host}' is not a valid host"
            )));
        }

        let scheme = forwarded_proto
            .and_then(|proto| proto.split(',').next())
            .map(str::trim)
            .filter(|proto| !proto.is_empty())
            .unwrap_or("http");

        let prefix = forwarded_prefix
            .map(|prefix| prefix.trim().trim_end_matches('/'))
            .filter(|prefix| !prefix.is_empty())
            .map(|prefix| {
                if prefix.starts_with('/') {
                    prefix.to_string()
                } else {
                    format!("/{prefix}")
                }
            })
            .unwrap_or_default();

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Self::parse(&format!("{scheme}://{host}{prefix}{path}"))
    }

    /// `scheme://host[:port]`, default ports omitted
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// The path split on `/`, leading empty segment included
    pub fn path_segments(&self) -> Vec<&str> {
        self.url.path().split('/').collect()
    }

    /// First path segment, empty when the page sits at the root
    pub fn base_segment(&self) -> &str {
        self.url.path().split('/').nth(1).unwrap_or_default()
    }

    /// URL of `file_name` under the first path segment of this location
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::InvalidLocation`] if the concatenated URL does not
    /// parse, which only happens for file names carrying URL delimiters.
    pub fn document_url(&self, file_name: &str) -> Result<Url> {
        let raw = format!("{}/{}/{}", self.origin(), self.base_segment(), file_name);
        Url::parse(&raw).map_err(|e| DocsError::InvalidLocation(format!("{raw}: {e}")))
    }

    /// URL of the default description document, `openapi.json`
    ///
    /// # Errors
    ///
    /// See [`PageLocation::document_url`].
    pub fn openapi_url(&self) -> Result<Url> {
        self.document_url(DOCUMENT_FILE_NAME)
    }
}

impl std::str::FromStr for PageLocation {
    type Err = DocsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
