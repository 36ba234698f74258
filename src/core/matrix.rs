//! Build matrix assembly
//!
//! Takes normalized descriptors and init units and computes the aggregate
//! release facts: the name → version map, the sorted set of distinct
//! versions, the primary version, and whether a single release tag applies.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::config::defaults::NO_INIT_SENTINEL;
use crate::core::descriptor::AppDescriptor;
use crate::error::MatrixError;

/// How repeated application names are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Later versions overwrite earlier ones in the version map
    #[default]
    LastWins,
    /// Repeated names are an error
    Reject,
}

/// Ordered name → version map
///
/// Names keep the position of their first occurrence; a repeated name
/// replaces the stored version in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMap {
    entries: Vec<(String, String)>,
}

impl VersionMap {
    /// Insert a version, returning the previous one for this name
    pub fn insert(&mut self, name: &str, version: &str) -> Option<String> {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, version.to_string())),
            None => {
                self.entries.push((name.to_string(), version.to_string()));
                None
            }
        }
    }

    /// Version stored for a name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// JSON object in first-insertion order
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(n, v)| (n.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

/// Result of one assembly pass
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// Normalized descriptors, in input order
    pub apps: Vec<AppDescriptor>,
    /// Init units; never empty
    pub init_units: Vec<String>,
    /// Name → version
    pub versions: VersionMap,
    /// Distinct versions, sorted ascending
    pub unique_versions: Vec<String>,
    /// Version of the first descriptor
    pub primary_version: String,
    /// Whether all apps share one version
    pub should_tag: bool,
}

impl Assembly {
    /// Render the step outputs in their fixed order
    pub fn outputs(&self) -> Result<Vec<(String, String)>, MatrixError> {
        let init_units: Vec<Value> = self
            .init_units
            .iter()
            .map(|u| Value::String(u.clone()))
            .collect();

        Ok(vec![
            ("matrix_apps".to_string(), to_json("matrix_apps", &self.apps)?),
            ("matrix_init".to_string(), to_json("matrix_init", &init_units)?),
            (
                "app_versions".to_string(),
                to_json("app_versions", &self.versions.to_json())?,
            ),
            (
                "unique_versions".to_string(),
                to_json("unique_versions", &self.unique_versions)?,
            ),
            ("primary_version".to_string(), self.primary_version.clone()),
            ("should_tag".to_string(), self.should_tag.to_string()),
        ])
    }
}

fn to_json<T: serde::Serialize + ?Sized>(key: &str, value: &T) -> Result<String, MatrixError> {
    serde_json::to_string(value).map_err(|e| MatrixError::Serialize {
        key: key.to_string(),
        error: e.to_string(),
    })
}

/// Assemble the matrix from normalized descriptors
///
/// # Errors
///
/// * [`MatrixError::NoApplications`] if `apps` is empty
/// * [`MatrixError::DuplicateName`] if a name repeats under
///   [`DuplicatePolicy::Reject`]
pub fn assemble(
    apps: Vec<AppDescriptor>,
    init_units: Vec<String>,
    duplicates: DuplicatePolicy,
) -> Result<Assembly, MatrixError> {
    let Some(first) = apps.first() else {
        return Err(MatrixError::NoApplications);
    };
    let primary_version = first.version.clone();

    let mut versions = VersionMap::default();
    for app in &apps {
        if let Some(previous) = versions.insert(&app.name, &app.version) {
            match duplicates {
                DuplicatePolicy::Reject => {
                    return Err(MatrixError::DuplicateName {
                        name: app.name.clone(),
                    })
                }
                DuplicatePolicy::LastWins => tracing::warn!(
                    "App '{}' is listed more than once; version {} replaces {}",
                    app.name,
                    app.version,
                    previous
                ),
            }
        }
    }

    let unique_versions: Vec<String> = versions
        .iter()
        .map(|(_, v)| v.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let should_tag = unique_versions.len() == 1;

    let init_units = if init_units.is_empty() {
        vec![NO_INIT_SENTINEL.to_string()]
    } else {
        init_units
    };

    tracing::info!(
        "Assembled {} apps with {} distinct versions (tag: {})",
        apps.len(),
        unique_versions.len(),
        should_tag
    );

    Ok(Assembly {
        apps,
        init_units,
        versions,
        unique_versions,
        primary_version,
        should_tag,
    })
}

/// Parse raw init unit input
///
/// JSON lists are used as-is (elements stringified), any other JSON scalar
/// becomes a single unit, and text that is not JSON is taken verbatim.
/// Absent, blank, or `null` input yields an empty list.
pub fn load_init_units(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items.iter().filter_map(unit_to_string).collect(),
        Ok(value) => unit_to_string(&value).into_iter().collect(),
        Err(_) => vec![raw.to_string()],
    }
}

fn unit_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
