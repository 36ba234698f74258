//! Step output sink
//!
//! Writes `key=value` lines to the file named by `GITHUB_OUTPUT`, or to
//! stdout when no file is configured. The whole block is rendered before the
//! sink is touched, so a failed run never leaves partial output behind.

use std::io::Write;
use std::path::PathBuf;

use crate::error::FilesystemError;
use crate::infra::filesystem::append_file;

/// Delimiter for values spanning several lines
const MULTILINE_DELIMITER: &str = "BUILDMATRIX_EOF";

/// Destination for step outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Append to a file
    File(PathBuf),
    /// Print to stdout
    Stdout,
}

impl OutputSink {
    /// Build a sink from an optional path
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if !p.as_os_str().is_empty() => Self::File(p),
            _ => Self::Stdout,
        }
    }

    /// Write all pairs in one append
    pub fn write(&self, pairs: &[(String, String)]) -> Result<(), FilesystemError> {
        let block = render(pairs);
        match self {
            Self::File(path) => {
                tracing::debug!("Appending {} outputs to {}", pairs.len(), path.display());
                append_file(path, &block)
            }
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(block.as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(|e| FilesystemError::WriteFile {
                        path: PathBuf::from("<stdout>"),
                        error: e.to_string(),
                    })
            }
        }
    }
}

/// Render pairs as output lines
pub fn render(pairs: &[(String, String)]) -> String {
    let mut block = String::new();
    for (key, value) in pairs {
        if value.contains('\n') {
            block.push_str(&format!(
                "{key}<<{MULTILINE_DELIMITER}\n{value}\n{MULTILINE_DELIMITER}\n"
            ));
        } else {
            block.push_str(&format!("{key}={value}\n"));
        }
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_render_single_line_values() {
        let block = render(&[pair("should_tag", "true"), pair("primary_version", "1.2.0")]);
        assert_eq!(block, "should_tag=true\nprimary_version=1.2.0\n");
    }

    #[test]
    fn test_render_empty_value() {
        assert_eq!(render(&[pair("primary_version", "")]), "primary_version=\n");
    }

    #[test]
    fn test_render_multiline_value_uses_delimiter() {
        let block = render(&[pair("notes", "a\nb")]);
        assert_eq!(block, "notes<<BUILDMATRIX_EOF\na\nb\nBUILDMATRIX_EOF\n");
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("github_output");
        std::fs::write(&path, "existing=1\n").expect("seed output file");

        let sink = OutputSink::from_path(Some(path.clone()));
        sink.write(&[pair("should_tag", "false")]).expect("write outputs");

        let content = std::fs::read_to_string(&path).expect("read output file");
        assert_eq!(content, "existing=1\nshould_tag=false\n");
    }

    #[test]
    fn test_empty_path_means_stdout() {
        assert_eq!(OutputSink::from_path(Some(PathBuf::new())), OutputSink::Stdout);
        assert_eq!(OutputSink::from_path(None), OutputSink::Stdout);
    }
}
