//! Bundle command implementation

use console::Style;
use tracing::info;

use crate::config::BundleOptions;
use crate::error::Result;
use crate::loader::DefaultLoader;
use crate::pipeline::Pipeline;

/// Run the bundle command
pub fn run(options: &BundleOptions) -> Result<()> {
    let loader = DefaultLoader::new(options.timeout)?;
    let mut pipeline = Pipeline::new(loader, options.resolve.clone());

    info!(
        spec = %options.spec_path.display(),
        output = %options.output_path.display(),
        "bundling"
    );
    pipeline.run(&options.spec_path, &options.output_path)?;

    let green = Style::new().green();
    println!(
        "{} {}",
        green.apply_to("Saved bundle file at"),
        options.output_path.display()
    );

    Ok(())
}
