//! Common error handling for the apidocs workspace
//!
//! Every library crate in the workspace reports failures through
//! [`DocsError`]. The server maps it onto HTTP responses and the binary adds
//! context with `anyhow`.
//!
//! # Error Categories
//!
//! - **InvalidLocation**: a page location that cannot carry a document URL
//! - **Validation**: malformed service descriptors or identifiers
//! - **NotFound**: a published document or service that does not exist
//! - **Config**: environment or manifest configuration problems
//! - **Io / Json / Yaml**: filesystem and serialization failures
//!
//! # Example
//!
//! ```rust
//! use error_common::{DocsError, Result};
//!
//! fn require_segment(segment: &str) -> Result<&str> {
//!     if segment.contains('/') {
//!         return Err(DocsError::validation(format!("'{segment}' is not a single path segment")));
//!     }
//!     Ok(segment)
//! }
//!
//! assert!(require_segment("inventory").is_ok());
//! assert!(require_segment("a/b").is_err());
//! ```

pub mod types;

pub use types::*;
