//! Bundle writer

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::document::Node;
use crate::error::Result;
use crate::error::fs::write_failed;

/// Render the tree as JSON indented with two spaces
pub fn render(tree: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

/// Write the bundled tree to `output`, replacing any existing file
///
/// Missing parent directories are created. The write is not atomic.
pub fn write_bundle(tree: &Node, output: &Path) -> Result<()> {
    let rendered = render(tree)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| write_failed(parent.display().to_string(), e.to_string()))?;
    }

    fs::write(output, rendered.as_bytes())
        .map_err(|e| write_failed(output.display().to_string(), e.to_string()))?;

    debug!(path = %output.display(), bytes = rendered.len(), "bundle written");
    Ok(())
}
