//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid app name (lowercase alphanumeric with hyphens)
    pub fn app_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,20}[a-z0-9]?".prop_filter("Name must not be empty", |s| !s.is_empty())
    }

    /// Generate a valid semver version string
    pub fn semver_version() -> impl Strategy<Value = String> {
        (0u32..20, 0u32..20, 0u32..20)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }

    /// Generate a mapping key that starts with neither `s` nor `v`, so it never
    /// collides with `version` or `sibling`
    pub fn key_segment() -> impl Strategy<Value = String> {
        "[a-rtuw-z][a-z0-9_]{0,8}"
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_app_name_generator(name in app_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn test_semver_version_generator(version in semver_version()) {
            let parts: Vec<&str> = version.split('.').collect();
            prop_assert_eq!(parts.len(), 3);
            for part in parts {
                prop_assert!(part.parse::<u32>().is_ok());
            }
        }

        #[test]
        fn test_key_segment_generator(key in key_segment()) {
            prop_assert_ne!(key.as_str(), "version");
            prop_assert!(!key.contains('.'));
        }
    }
}
