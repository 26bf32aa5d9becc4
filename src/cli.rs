//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::resolver::RefKind;

/// Output path used when none is given
pub const DEFAULT_OUTPUT: &str = "tests/apidocs/openapi-derefed.json";

/// refbundle - bundle an OpenAPI document into a single JSON file
///
/// Resolves every `$ref` (local, relative and remote) and writes the fully
/// dereferenced document as indented JSON.
#[derive(Parser, Debug)]
#[command(
    name = "refbundle",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Dereference an OpenAPI YAML document into a single JSON bundle",
    after_help = "EXAMPLES:\n  \
                  Bundle to the default location:\n    refbundle api-docs/openapi.yaml\n\n\
                  Bundle to a chosen file:\n    refbundle api-docs/openapi.yaml dist/openapi.json\n\n\
                  Resolve only local references:\n    refbundle openapi.yaml --filter local"
)]
pub struct Cli {
    /// Root specification file (YAML or JSON)
    pub spec_file: PathBuf,

    /// Destination for the bundled JSON
    #[arg(default_value = DEFAULT_OUTPUT, env = "REFBUNDLE_OUTPUT")]
    pub output_file: PathBuf,

    /// Reference kinds to resolve; other kinds are left as written
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "local,relative,remote",
        env = "REFBUNDLE_FILTER"
    )]
    pub filter: Vec<RefKind>,

    /// Leave circular references as written instead of rewriting them to local self-references
    #[arg(long)]
    pub no_resolve_circulars: bool,

    /// Timeout in seconds for fetching remote documents
    #[arg(long, value_name = "SECS", default_value_t = 30, env = "REFBUNDLE_TIMEOUT")]
    pub timeout: u64,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
