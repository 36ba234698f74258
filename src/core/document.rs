//! Structured version documents
//!
//! JSON and TOML files are parsed into one [`Node`] tree so that key-path
//! lookup and the structural version search work the same for both formats.
//! Mapping keys keep their document order.

use std::fmt;
use std::path::Path;

use crate::error::ResolveError;

/// Supported structured file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl Format {
    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, ResolveError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(ResolveError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: if extension.is_empty() {
                    "(none)".to_string()
                } else {
                    format!(".{extension}")
                },
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Toml => write!(f, "TOML"),
        }
    }
}

/// A node of a parsed structured document
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// String value
    String(String),
    /// Integer or float, already rendered in canonical decimal form
    Number(String),
    /// Boolean value
    Bool(bool),
    /// JSON `null`
    Null,
    /// TOML date/time value
    Datetime(String),
    /// Mapping in document order
    Mapping(Vec<(String, Node)>),
    /// Sequence
    Sequence(Vec<Node>),
}

impl Node {
    /// Parse document text in the given format
    pub fn parse(content: &str, format: Format, path: &Path) -> Result<Self, ResolveError> {
        let parse_err = |error: String| ResolveError::Parse {
            path: path.to_path_buf(),
            error,
        };

        match format {
            Format::Json => serde_json::from_str::<serde_json::Value>(content)
                .map(Self::from)
                .map_err(|e| parse_err(e.to_string())),
            Format::Toml => toml::from_str::<toml::Table>(content)
                .map(|table| Self::from(toml::Value::Table(table)))
                .map_err(|e| parse_err(e.to_string())),
        }
    }

    /// Look up a key in a mapping node
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Whether this node can be used as a version value
    pub fn is_version_scalar(&self) -> bool {
        matches!(self, Self::String(_) | Self::Number(_))
    }

    /// Short type name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::Datetime(_) => "datetime",
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(format_json_number(&n)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<toml::Value> for Node {
    fn from(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::String(s) => Self::String(s),
            Value::Integer(i) => Self::Number(i.to_string()),
            Value::Float(f) => Self::Number(format_float(f)),
            Value::Boolean(b) => Self::Bool(b),
            Value::Datetime(d) => Self::Datetime(d.to_string()),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Table(table) => {
                Self::Mapping(table.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Render a JSON number.
///
/// Integers keep their exact digits, including ones wider than 64 bits.
/// Everything else goes through [`format_float`] so JSON and TOML floats read
/// the same.
fn format_json_number(number: &serde_json::Number) -> String {
    let literal = number.to_string();
    if number.is_i64() || number.is_u64() || !literal.contains(['.', 'e', 'E']) {
        return literal;
    }
    number.as_f64().map_or(literal, format_float)
}

/// Render a float in its shortest round-trip form.
///
/// Integral values keep a trailing `.0` so `1.0` stays distinguishable from
/// the integer `1`. Magnitudes of `1e16` and above, or below `1e-4`, switch to
/// exponent notation with a signed, two-digit exponent (`1e+16`, `1e-07`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return (if value > 0.0 { "inf" } else { "-inf" }).to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        format_exponent(value)
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn format_exponent(value: f64) -> String {
    // `{:e}` yields the shortest mantissa, e.g. `1.5e-7`
    let rendered = format!("{value:e}");
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("package.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("Cargo.TOML")).unwrap(), Format::Toml);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Format::from_path(Path::new("chart.yaml")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UnsupportedFormat { ref extension, .. } if extension == ".yaml"
        ));

        let err = Format::from_path(Path::new("VERSION")).unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_json_mapping_keeps_document_order() {
        let node = Node::parse(
            r#"{"zeta": 1, "alpha": 2, "mid": 3}"#,
            Format::Json,
            &PathBuf::from("a.json"),
        )
        .unwrap();

        let Node::Mapping(entries) = node else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_toml_numbers_are_canonical() {
        let node = Node::parse(
            "int = 3\nfloat = 1.0\nfrac = 2.5\n",
            Format::Toml,
            &PathBuf::from("a.toml"),
        )
        .unwrap();

        assert_eq!(node.get("int"), Some(&Node::Number("3".to_string())));
        assert_eq!(node.get("float"), Some(&Node::Number("1.0".to_string())));
        assert_eq!(node.get("frac"), Some(&Node::Number("2.5".to_string())));
    }

    #[test]
    fn test_json_numbers_are_canonical() {
        let node = Node::parse(
            r#"{"int": 7, "float": 1.5, "whole": 2.0}"#,
            Format::Json,
            &PathBuf::from("a.json"),
        )
        .unwrap();

        assert_eq!(node.get("int"), Some(&Node::Number("7".to_string())));
        assert_eq!(node.get("float"), Some(&Node::Number("1.5".to_string())));
        assert_eq!(node.get("whole"), Some(&Node::Number("2.0".to_string())));
    }

    #[test]
    fn test_toml_datetime_is_not_a_scalar_version() {
        let node = Node::parse(
            "released = 2024-01-01\n",
            Format::Toml,
            &PathBuf::from("a.toml"),
        )
        .unwrap();

        let released = node.get("released").unwrap();
        assert_eq!(released.kind(), "datetime");
        assert!(!released.is_version_scalar());
    }

    #[test]
    fn test_malformed_documents_fail_to_parse() {
        let err = Node::parse("{not json", Format::Json, &PathBuf::from("a.json")).unwrap_err();
        assert!(matches!(err, ResolveError::Parse { .. }));

        let err = Node::parse("= nope", Format::Toml, &PathBuf::from("a.toml")).unwrap_err();
        assert!(matches!(err, ResolveError::Parse { .. }));
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(-3.0), "-3.0");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1e-7), "1e-07");
        assert_eq!(format_float(1.5e-7), "1.5e-07");
        assert_eq!(format_float(2.5e300), "2.5e+300");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(9_999_999_999_999_998.0), "9999999999999998.0");
    }

    #[test]
    fn test_floats_render_the_same_in_json_and_toml() {
        for literal in ["1e16", "1e-7", "2.5", "3.0", "1.5e300"] {
            let json = Node::parse(
                &format!(r#"{{"v": {literal}}}"#),
                Format::Json,
                &PathBuf::from("a.json"),
            )
            .unwrap();
            let toml =
                Node::parse(&format!("v = {literal}\n"), Format::Toml, &PathBuf::from("a.toml"))
                    .unwrap();

            assert_eq!(json.get("v"), toml.get("v"), "mismatch for {literal}");
        }
    }

    #[test]
    fn test_wide_json_integer_keeps_its_digits() {
        let node = Node::parse(
            r#"{"v": 123456789012345678901234, "neg": -98765432109876543210}"#,
            Format::Json,
            &PathBuf::from("a.json"),
        )
        .unwrap();

        assert_eq!(
            node.get("v"),
            Some(&Node::Number("123456789012345678901234".to_string()))
        );
        assert_eq!(
            node.get("neg"),
            Some(&Node::Number("-98765432109876543210".to_string()))
        );
    }
}
