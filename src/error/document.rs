//! Document parse and pointer errors

use super::BundleError;

/// Creates a parse failed error for the document at `location`
pub fn parse_failed(location: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::ParseFailed {
        location: location.into(),
        reason: reason.into(),
    }
}

/// Creates a pointer not found error
pub fn pointer_not_found(pointer: impl Into<String>, document: impl Into<String>) -> BundleError {
    BundleError::PointerNotFound {
        pointer: pointer.into(),
        document: document.into(),
    }
}

/// Creates an invalid pointer error
pub fn invalid_pointer(pointer: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::InvalidPointer {
        pointer: pointer.into(),
        reason: reason.into(),
    }
}
