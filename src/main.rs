//! refbundle - OpenAPI reference bundler
//!
//! Reads a YAML OpenAPI/Swagger document, resolves every `$ref` it contains
//! (local fragments, relative files, remote URLs) and writes a single JSON
//! document with all references replaced by their content.

use clap::Parser;

mod aggregate;
mod cache;
mod cli;
mod commands;
mod config;
mod document;
mod error;
mod loader;
mod logging;
mod pipeline;
mod resolver;
mod writer;

use cli::Cli;
use config::BundleOptions;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = BundleOptions::from_cli(&cli).and_then(|options| commands::bundle::run(&options));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
