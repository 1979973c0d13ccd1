//! CLI command implementations

pub mod patch;

use anyhow::{Context, Result};
use std::path::Path;

/// Read a whole file into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))
}

/// Write a buffer, replacing the file if it exists
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).with_context(|| format!("Failed to write: {}", path.display()))
}
