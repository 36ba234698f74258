//! Application descriptor normalization
//!
//! Raw application input arrives as a JSON list of mappings, a JSON list of
//! bare names, or a single bare name. Normalization runs in two phases:
//!
//! 1. [`parse_entries`] turns raw input into partial [`AppEntry`] records,
//!    dropping null fields and resolving field aliases once.
//! 2. [`normalize`] fills every optional field from the defaults and resolves
//!    each application's version, producing [`AppDescriptor`] records.
//!
//! Both phases are fail-fast: one bad entry aborts the whole batch.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::defaults::{DEFAULT_CONTEXT, DEFAULT_VERSION_FILE};
use crate::core::version;
use crate::error::DescriptorError;

/// Input keys consumed by normalization; everything else passes through
const RESERVED_FIELDS: &[&str] = &[
    "name",
    "version",
    "version_file",
    "version_key",
    "dockerfile",
    "context",
    "build_context",
    "etcd_app_name",
    "etcd_name",
    "manifest_name",
];

/// A partially specified application, as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppEntry {
    /// Application name
    pub name: String,

    /// Version file path, relative to the workspace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_file: Option<String>,

    /// Dotted key path into the version file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_key: Option<String>,

    /// Dockerfile path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<String>,

    /// Build context (alias: `build_context`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// etcd application name (alias: `etcd_app_name`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etcd_name: Option<String>,

    /// Deployment manifest name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_name: Option<String>,

    /// Fields this tool does not interpret, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppEntry {
    /// Entry carrying only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build an entry from one element of the raw input list
    ///
    /// Mappings are read field by field; scalars become bare names.
    pub fn from_value(index: usize, value: Value) -> Result<Self, DescriptorError> {
        match value {
            Value::Object(map) => {
                let field = |key: &str| match map.get(key) {
                    Some(value) => scalar_field(index, key, value),
                    None => Ok(None),
                };

                let name = field("name")?.ok_or(DescriptorError::MissingName { index })?;
                let version_file = field("version_file")?;
                let version_key = field("version_key")?;
                let dockerfile = field("dockerfile")?;
                let context = field("context")?.or(field("build_context")?);
                let etcd_name = field("etcd_app_name")?.or(field("etcd_name")?);
                let manifest_name = field("manifest_name")?;

                // `version` is always recomputed from the version file
                let extra = map
                    .into_iter()
                    .filter(|(key, value)| {
                        !value.is_null() && !RESERVED_FIELDS.contains(&key.as_str())
                    })
                    .collect();

                Ok(Self {
                    name,
                    version_file,
                    version_key,
                    dockerfile,
                    context,
                    etcd_name,
                    manifest_name,
                    extra,
                })
            }
            Value::Array(_) | Value::Null => Err(DescriptorError::InvalidEntry {
                index,
                reason: "expected a mapping or a bare name".to_string(),
            }),
            scalar => scalar_to_string(&scalar)
                .filter(|name| !name.is_empty())
                .map(Self::named)
                .ok_or(DescriptorError::MissingName { index }),
        }
    }
}

/// A fully resolved application descriptor
///
/// Every field is populated; `version_key` is omitted from the serialized
/// form when no key applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDescriptor {
    /// Application name
    pub name: String,

    /// Version file path, relative to the workspace
    pub version_file: String,

    /// Dotted key path used to resolve the version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_key: Option<String>,

    /// Dockerfile path
    pub dockerfile: String,

    /// Build context
    pub context: String,

    /// etcd application name
    pub etcd_name: String,

    /// Deployment manifest name
    pub manifest_name: String,

    /// Resolved version
    pub version: String,

    /// Pass-through fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pipeline-wide fallbacks for version resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDefaults {
    /// Version file used when an entry names none
    pub version_file: String,

    /// Key path used when an entry names none
    pub version_key: Option<String>,
}

impl Default for VersionDefaults {
    fn default() -> Self {
        Self {
            version_file: DEFAULT_VERSION_FILE.to_string(),
            version_key: None,
        }
    }
}

/// Parse raw application input into partial entries
///
/// `raw` is JSON text. A JSON list is used element by element; any other JSON
/// value, or text that is not JSON at all, is taken as a single bare name.
/// Absent or blank input yields an empty list.
pub fn parse_entries(raw: Option<&str>) -> Result<Vec<AppEntry>, DescriptorError> {
    entries_from_values(parse_values(raw))
}

/// Split raw application input into list elements without interpreting them
pub fn parse_values(raw: Option<&str>) -> Vec<Value> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        _ => {
            tracing::debug!("App input is not a JSON list, treating it as one name");
            vec![Value::String(raw.to_string())]
        }
    }
}

/// Convert an already structured list into partial entries
pub fn entries_from_values(values: Vec<Value>) -> Result<Vec<AppEntry>, DescriptorError> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| AppEntry::from_value(index, value))
        .collect()
}

/// Caller-supplied entries with null fields removed, otherwise untouched
///
/// Every element is validated like [`entries_from_values`]. Mappings keep
/// their keys, aliases and order; `name` is replaced by its string form.
/// Bare names become `{"name": ...}`.
pub fn passthrough_entries(values: Vec<Value>) -> Result<Vec<Map<String, Value>>, DescriptorError> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let name = AppEntry::from_value(index, value.clone())?.name;
            let mut map: Map<String, Value> = match value {
                Value::Object(map) => map.into_iter().filter(|(_, v)| !v.is_null()).collect(),
                _ => Map::new(),
            };
            map.insert("name".to_string(), Value::String(name));
            Ok(map)
        })
        .collect()
}

/// Resolve every entry into a full descriptor, preserving input order
///
/// Version files are looked up relative to `workspace`.
pub fn normalize(
    entries: Vec<AppEntry>,
    defaults: &VersionDefaults,
    workspace: &Path,
) -> Result<Vec<AppDescriptor>, DescriptorError> {
    entries
        .into_iter()
        .map(|entry| normalize_entry(entry, defaults, workspace))
        .collect()
}

fn normalize_entry(
    entry: AppEntry,
    defaults: &VersionDefaults,
    workspace: &Path,
) -> Result<AppDescriptor, DescriptorError> {
    let AppEntry {
        name,
        version_file,
        version_key,
        dockerfile,
        context,
        etcd_name,
        manifest_name,
        extra,
    } = entry;

    let version_file = version_file.unwrap_or_else(|| defaults.version_file.clone());
    let version_key = version_key
        .or_else(|| defaults.version_key.clone())
        .filter(|k| !k.is_empty());

    let resolved_path = workspace.join(&version_file);
    if !resolved_path.exists() {
        return Err(DescriptorError::VersionFileMissing {
            app: name,
            version_file,
        });
    }

    let version = version::resolve(&resolved_path, version_key.as_deref()).map_err(|source| {
        DescriptorError::Resolve {
            app: name.clone(),
            source,
        }
    })?;
    tracing::info!("Resolved {name} to {version} from {version_file}");

    Ok(AppDescriptor {
        dockerfile: dockerfile.unwrap_or_else(|| name.clone()),
        context: context.unwrap_or_else(|| DEFAULT_CONTEXT.to_string()),
        etcd_name: etcd_name.unwrap_or_else(|| name.clone()),
        manifest_name: manifest_name.unwrap_or_else(|| name.clone()),
        name,
        version_file,
        version_key,
        version,
        extra,
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Stringify a scalar field; null and empty strings count as unset
fn scalar_field(index: usize, field: &str, value: &Value) -> Result<Option<String>, DescriptorError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        other => scalar_to_string(other).map(Some).ok_or_else(|| {
            DescriptorError::InvalidEntry {
                index,
                reason: format!("field '{field}' must be a string or number"),
            }
        }),
    }
}
