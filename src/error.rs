//! Error types for buildmatrix
//!
//! Domain-specific error types using thiserror. Every error is fatal: the
//! pipeline aborts without writing any output keys.

use std::path::PathBuf;
use thiserror::Error;

/// Version resolution errors
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Version file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Extension is neither `.json` nor `.toml`
    #[error("Unsupported file type '{extension}' for '{path}' (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Failed to read the file
    #[error("Failed to read '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Malformed document
    #[error("Failed to parse '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Explicit key path did not resolve
    #[error("Path '{key_path}' not found in '{path}'")]
    PathNotFound { path: PathBuf, key_path: String },

    /// Structural search found nothing
    #[error("No version value found in '{path}'")]
    NoVersionFound { path: PathBuf },

    /// Resolved value is not a string or number
    #[error("Version value must be a string or number, found {found}")]
    InvalidVersionType { found: String },
}

/// Application descriptor errors
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// Entry without a usable `name`
    #[error("Each app entry must include a 'name' field (entry #{index})")]
    MissingName { index: usize },

    /// Entry that is neither a mapping nor a scalar, or a field of the wrong shape
    #[error("Invalid app entry #{index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// Referenced version file is missing on disk
    #[error("Version file '{version_file}' not found for app '{app}'")]
    VersionFileMissing { app: String, version_file: String },

    /// Version resolution failed for an application
    #[error("Failed to resolve version for app '{app}'")]
    Resolve {
        app: String,
        #[source]
        source: ResolveError,
    },
}

/// Matrix assembly errors
#[derive(Error, Debug, PartialEq)]
pub enum MatrixError {
    /// Empty application list
    #[error("At least one app must be defined in app_names")]
    NoApplications,

    /// Same name used twice while duplicates are rejected
    #[error("Duplicate app name '{name}'")]
    DuplicateName { name: String },

    /// Serialization of an output value failed
    #[error("Failed to serialize '{key}': {error}")]
    Serialize { key: String, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },
}

/// Top-level buildmatrix error type
#[derive(Error, Debug)]
pub enum BuildMatrixError {
    /// Descriptor error
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// Matrix error
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
