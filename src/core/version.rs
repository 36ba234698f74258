//! Version resolution from structured files
//!
//! This module handles:
//! - Loading a JSON or TOML version file
//! - Following an explicit dotted key path (`package.version`)
//! - Falling back to a depth-first search for the first `version` key
//! - Coercing the found value to its canonical string form
//!
//! Every call re-reads and re-parses the file; nothing is cached.

use std::path::Path;

use crate::core::document::{Format, Node};
use crate::error::ResolveError;
use crate::infra::filesystem;

/// Key looked up by the structural search
pub const VERSION_KEY: &str = "version";

/// Resolve the version stored in a structured file
///
/// # Arguments
/// * `path` - Path to a `.json` or `.toml` file
/// * `key_path` - Optional dotted path; `None` or an empty string triggers the
///   structural search
///
/// # Returns
/// * `Ok(String)` with the canonical version string
/// * `Err(ResolveError)` if the file is missing, unsupported, malformed, or
///   holds no usable version
///
/// # Examples
/// ```no_run
/// use std::path::Path;
/// use buildmatrix::core::version::resolve;
///
/// let version = resolve(Path::new("Cargo.toml"), Some("package.version"));
/// ```
pub fn resolve(path: &Path, key_path: Option<&str>) -> Result<String, ResolveError> {
    if !path.exists() {
        return Err(ResolveError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = Format::from_path(path)?;
    let content = filesystem::read_file(path).map_err(|e| ResolveError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    let document = Node::parse(&content, format, path)?;
    tracing::debug!("Parsed {} document {}", format, path.display());

    let value = match key_path.filter(|k| !k.is_empty()) {
        Some(key_path) => lookup_path(&document, key_path).ok_or_else(|| {
            ResolveError::PathNotFound {
                path: path.to_path_buf(),
                key_path: key_path.to_string(),
            }
        })?,
        None => find_first_version(&document).ok_or_else(|| ResolveError::NoVersionFound {
            path: path.to_path_buf(),
        })?,
    };

    coerce_to_string(value)
}

/// Follow a dotted key path through nested mappings
///
/// Returns `None` if a segment is missing or an intermediate value is not a
/// mapping.
pub fn lookup_path<'a>(document: &'a Node, key_path: &str) -> Option<&'a Node> {
    key_path
        .split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

/// Depth-first search for the first usable `version` value
///
/// A mapping's own `version` key wins if it holds a string or number;
/// otherwise its values are searched in document order. Sequence elements are
/// searched in order.
pub fn find_first_version(node: &Node) -> Option<&Node> {
    match node {
        Node::Mapping(entries) => {
            if let Some(candidate) = node.get(VERSION_KEY).filter(|v| v.is_version_scalar()) {
                return Some(candidate);
            }
            entries.iter().find_map(|(_, value)| find_first_version(value))
        }
        Node::Sequence(items) => items.iter().find_map(find_first_version),
        _ => None,
    }
}

/// Coerce a resolved value to a version string
pub fn coerce_to_string(value: &Node) -> Result<String, ResolveError> {
    match value {
        Node::String(s) | Node::Number(s) => Ok(s.clone()),
        other => Err(ResolveError::InvalidVersionType {
            found: other.kind().to_string(),
        }),
    }
}
