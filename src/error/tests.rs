//! Error type tests
//!
//! Tests for BundleError enum and its conversions.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crate::error::document::{parse_failed, pointer_not_found};
use crate::error::fetch::{failed as fetch_failed, unsupported_scheme};
use crate::error::fs::{path_resolution_failed, read_failed, write_failed};
use crate::error::resolve::{failed as resolution_failed, invalid_location, unresolved};
use crate::error::{BundleError, ReferenceFailure};
use miette::Diagnostic;

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

#[test]
fn test_error_display() {
    let err = read_failed("/tmp/openapi.yaml", "No such file or directory");
    assert_eq!(
        err.to_string(),
        "Failed to read file: /tmp/openapi.yaml: No such file or directory"
    );
}

#[test]
fn test_error_code() {
    let err = unsupported_scheme("ftp://example.com/spec.yaml");
    assert_eq!(
        err.code().map(|c| c.to_string()),
        Some("refbundle::fetch::unsupported_scheme".to_string())
    );
}

#[test]
fn test_json_error_conversion() {
    let parse_result: std::result::Result<serde_json::Value, _> =
        serde_json::from_str("invalid json content");
    let err: BundleError = parse_result.unwrap_err().into();
    assert!(matches!(err, BundleError::SerializeFailed { .. }));
}

#[test]
fn test_unresolved_lists_every_failure() {
    let failures = vec![
        ReferenceFailure {
            location: "#/paths/~1pets".to_string(),
            detail: "Failed to read file: pets.yaml".to_string(),
        },
        ReferenceFailure {
            location: "#/components/schemas/Owner".to_string(),
            detail: "Failed to fetch http://example.com/owner.yaml".to_string(),
        },
    ];

    let err = unresolved(&failures);
    let message = err.to_string();

    assert!(message.starts_with("2 unresolved reference(s):"));
    assert!(message.contains("#/paths/~1pets: Failed to read file: pets.yaml"));
    assert!(
        message.contains("#/components/schemas/Owner: Failed to fetch http://example.com/owner.yaml")
    );
    assert_eq!(message.lines().count(), 3);
}

test_error_contains!(
    test_write_failed_error,
    write_failed("out/bundle.json", "permission denied"),
    "Failed to write file",
    "out/bundle.json",
    "permission denied"
);

test_error_contains!(
    test_parse_failed_error,
    parse_failed("file:///tmp/pets.yaml", "mapping values are not allowed"),
    "file:///tmp/pets.yaml",
    "mapping values are not allowed"
);

test_error_contains!(
    test_pointer_not_found_error,
    pointer_not_found("/definitions/Missing", "file:///tmp/openapi.yaml"),
    "/definitions/Missing",
    "file:///tmp/openapi.yaml"
);

test_error_contains!(
    test_fetch_failed_error,
    fetch_failed("https://example.com/a.yaml", "404 Not Found"),
    "https://example.com/a.yaml",
    "404 Not Found"
);

test_error_contains!(
    test_invalid_location_error,
    invalid_location("relative/openapi.yaml", "base location must be absolute"),
    "relative/openapi.yaml",
    "must be absolute"
);

test_error_contains!(
    test_path_resolution_failed_error,
    path_resolution_failed("openapi.yaml", "current directory is unavailable"),
    "Failed to resolve path",
    "openapi.yaml"
);

#[test]
fn test_resolution_failed_uses_location_detail_shape() {
    let err = resolution_failed("file:///tmp/openapi.yaml", "boom");
    assert_eq!(err.to_string(), "file:///tmp/openapi.yaml: boom");
}
