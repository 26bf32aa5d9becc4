//! Error types and handling for refbundle
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructors are grouped by domain:
//! - [`fs`]: File system errors
//! - [`document`]: Parse and pointer errors
//! - [`fetch`]: Remote and relative document loading errors
//! - [`resolve`]: Resolution and aggregation errors

pub mod document;
pub mod fetch;
pub mod fs;
pub mod resolve;

use miette::Diagnostic;
use thiserror::Error;

/// One reference that could not be resolved, keyed by its location in the bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFailure {
    pub location: String,
    pub detail: String,
}

impl std::fmt::Display for ReferenceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.detail)
    }
}

/// Main error type for refbundle operations
#[derive(Error, Diagnostic, Debug)]
pub enum BundleError {
    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(refbundle::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(
        code(refbundle::fs::write_failed),
        help("Check that the output directory is writable")
    )]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to resolve path to '{path}': {reason}")]
    #[diagnostic(code(refbundle::fs::path_resolution_failed))]
    PathResolutionFailed { path: String, reason: String },

    // Document errors
    #[error("Failed to parse document {location}: {reason}")]
    #[diagnostic(
        code(refbundle::document::parse_failed),
        help("Referenced documents must be valid YAML or JSON")
    )]
    ParseFailed { location: String, reason: String },

    #[error("JSON pointer '{pointer}' not found in {document}")]
    #[diagnostic(code(refbundle::document::pointer_not_found))]
    PointerNotFound { pointer: String, document: String },

    #[error("Invalid JSON pointer '{pointer}': {reason}")]
    #[diagnostic(code(refbundle::document::invalid_pointer))]
    InvalidPointer { pointer: String, reason: String },

    #[error("Failed to serialize bundle: {reason}")]
    #[diagnostic(code(refbundle::document::serialize_failed))]
    SerializeFailed { reason: String },

    // Fetch errors
    #[error("Failed to fetch {url}: {reason}")]
    #[diagnostic(code(refbundle::fetch::failed))]
    FetchFailed { url: String, reason: String },

    #[error("Unsupported URL scheme: {url}")]
    #[diagnostic(
        code(refbundle::fetch::unsupported_scheme),
        help("Supported schemes: file, http, https")
    )]
    UnsupportedScheme { url: String },

    // Resolution errors
    #[error("Invalid base location '{location}': {reason}")]
    #[diagnostic(code(refbundle::resolve::invalid_location))]
    InvalidLocation { location: String, reason: String },

    #[error("{count} unresolved reference(s):\n{message}")]
    #[diagnostic(
        code(refbundle::resolve::unresolved),
        help("Fix the listed $ref targets; no bundle was written")
    )]
    UnresolvedReferences { count: usize, message: String },

    #[error("{location}: {reason}")]
    #[diagnostic(code(refbundle::resolve::failed))]
    ResolutionFailed { location: String, reason: String },

    // Configuration errors
    #[error("Invalid option: {message}")]
    #[diagnostic(code(refbundle::config::invalid))]
    InvalidOption { message: String },
}

impl From<serde_json::Error> for BundleError {
    fn from(err: serde_json::Error) -> Self {
        BundleError::SerializeFailed {
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for BundleError {
    fn from(err: reqwest::Error) -> Self {
        BundleError::FetchFailed {
            url: err
                .url()
                .map(ToString::to_string)
                .unwrap_or_else(|| "unknown".to_string()),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BundleError>;

#[cfg(test)]
mod tests;
