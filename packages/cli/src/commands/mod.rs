pub mod apply;
pub mod init;
pub mod render;
pub mod toolbar;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use toolbar::{toolbar, ToolbarArgs};

use anyhow::{Context, Result};
use prose_model::Value;
use std::path::{Path, PathBuf};

/// Read a value JSON file, relative to `cwd`
pub(crate) fn load_value(cwd: &str, path: &Path) -> Result<(PathBuf, Value)> {
    let full = PathBuf::from(cwd).join(path);
    let content = std::fs::read_to_string(&full)
        .with_context(|| format!("Cannot read {}", full.display()))?;
    let value = Value::from_json(&content)
        .with_context(|| format!("Invalid value in {}", full.display()))?;
    Ok((full, value))
}
