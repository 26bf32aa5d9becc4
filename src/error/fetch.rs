//! Document loading errors

use super::BundleError;

/// Creates a fetch failed error
pub fn failed(url: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::FetchFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates an unsupported scheme error
pub fn unsupported_scheme(url: impl Into<String>) -> BundleError {
    BundleError::UnsupportedScheme { url: url.into() }
}
