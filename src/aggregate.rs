//! Error aggregation
//!
//! Turns a resolution run into either the resolved tree or a single error
//! listing every reference that should have resolved but did not.

use tracing::debug;

use crate::document::Node;
use crate::error::resolve::{failed, unresolved};
use crate::error::{BundleError, ReferenceFailure, Result};
use crate::resolver::{RefStatus, ReferenceDescriptor, Resolution};

/// Collect the failures of required reference kinds, in walk order
pub fn failures(refs: &[ReferenceDescriptor]) -> Vec<ReferenceFailure> {
    refs.iter()
        .filter(|r| r.kind.is_required() && r.is_missing())
        .map(|r| ReferenceFailure {
            location: r.location.clone(),
            detail: r
                .error
                .clone()
                .unwrap_or_else(|| "reference could not be resolved".to_string()),
        })
        .collect()
}

/// Accept a resolution only when no required reference is missing
///
/// # Errors
///
/// Returns [`BundleError::UnresolvedReferences`] when any local, relative or
/// remote reference is missing, and [`BundleError::ResolutionFailed`] when the
/// run itself was rejected.
pub fn aggregate(outcome: Result<Resolution>) -> Result<Node> {
    let resolution = outcome.map_err(into_resolution_failure)?;

    for skipped in resolution.refs.iter().filter(|r| r.status == RefStatus::Skipped) {
        debug!(
            location = %skipped.location,
            target = ?skipped.target,
            kind = %skipped.kind,
            "reference left as written"
        );
    }

    let failures = failures(&resolution.refs);
    if !failures.is_empty() {
        return Err(unresolved(&failures));
    }

    debug!(references = resolution.refs.len(), "all references resolved");
    Ok(resolution.resolved)
}

/// Present a run-level rejection in the same `location: detail` shape
fn into_resolution_failure(err: BundleError) -> BundleError {
    match err {
        BundleError::InvalidLocation { location, reason } => failed(location, reason),
        BundleError::ResolutionFailed { .. } | BundleError::UnresolvedReferences { .. } => err,
        other => failed("resolver", other.to_string()),
    }
}
