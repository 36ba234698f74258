//! Filesystem operations
//!
//! Handles file reads and append-only writes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::FilesystemError;

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Append content to a file, creating it if needed
pub fn append_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    let write_err = |e: std::io::Error| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)
}
