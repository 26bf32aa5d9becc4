//! File system errors

use super::BundleError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a path resolution error
pub fn path_resolution_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::PathResolutionFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
