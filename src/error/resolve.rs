//! Resolution and aggregation errors

use super::{BundleError, ReferenceFailure};

/// Creates an invalid base location error
pub fn invalid_location(location: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::InvalidLocation {
        location: location.into(),
        reason: reason.into(),
    }
}

/// Combines every failing reference into one error, one `location: detail` line each
pub fn unresolved(failures: &[ReferenceFailure]) -> BundleError {
    let message = failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    BundleError::UnresolvedReferences {
        count: failures.len(),
        message,
    }
}

/// Creates a run-level resolution failure
pub fn failed(location: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::ResolutionFailed {
        location: location.into(),
        reason: reason.into(),
    }
}
