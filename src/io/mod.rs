pub mod output;
pub mod walker;

use anyhow::{Context, Result};
use std::path::Path;

pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))
}
