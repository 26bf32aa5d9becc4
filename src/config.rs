//! Run configuration
//!
//! [`BundleOptions`] is the validated form of the command line: the spec path
//! is absolute and the resolver options are ready to use.

use std::path::{Path, PathBuf};
use std::time::Duration;

use normpath::BasePathBuf;

use crate::cli::Cli;
use crate::error::fs::path_resolution_failed;
use crate::error::{BundleError, Result};
use crate::resolver::ResolveOptions;

#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Absolute path of the root specification
    pub spec_path: PathBuf,
    pub output_path: PathBuf,
    pub resolve: ResolveOptions,
    /// Remote fetch timeout
    pub timeout: Duration,
}

impl BundleOptions {
    /// Validate parsed arguments
    ///
    /// # Errors
    ///
    /// Fails when the spec path cannot be made absolute or an option is out of range.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.timeout == 0 {
            return Err(BundleError::InvalidOption {
                message: "--timeout must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            spec_path: absolute_spec_path(&cli.spec_file)?,
            output_path: cli.output_file.clone(),
            resolve: ResolveOptions {
                filter: cli.filter.clone(),
                resolve_circulars: !cli.no_resolve_circulars,
            },
            timeout: Duration::from_secs(cli.timeout),
        })
    }
}

/// Make `path` absolute, joining relative paths onto the current directory
pub fn absolute_spec_path(path: &Path) -> Result<PathBuf> {
    BasePathBuf::new(path)
        .map(BasePathBuf::into_path_buf)
        .map_err(|e| path_resolution_failed(path.display().to_string(), e.to_string()))
}
