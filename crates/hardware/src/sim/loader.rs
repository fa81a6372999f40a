//! Program file loading and saving.
//!
//! This module moves program text between disk and the simulator. It performs:
//! 1. **Loading:** Reads a program file and splits off its `#HEX`/`#DEC` header.
//! 2. **Saving:** Writes a program back with a header for its current base.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::asm::SourceFile;
use crate::common::{Base, LoadError};

/// Reads a program file from disk.
///
/// # Arguments
///
/// * `path` - Path to the program file.
/// * `default_base` - Base used when the file has no header line.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read.
pub fn load_source(path: impl AsRef<Path>, default_base: Base) -> Result<SourceFile, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source = SourceFile::parse(&text, default_base);
    debug!(path = %path.display(), base = %source.base, lines = source.lines.len(), "loaded program");
    Ok(source)
}

/// Writes a program file to disk, header first.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be written.
pub fn save_source(path: impl AsRef<Path>, source: &SourceFile) -> Result<(), LoadError> {
    let path = path.as_ref();
    fs::write(path, source.render()).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
