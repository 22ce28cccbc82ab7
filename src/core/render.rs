//! Config file generators.
//!
//! Generated documents are rendered whole and overwrite whatever is at the
//! target path. No schema validation: correctness comes from hand-maintained
//! parity with each application's expected keys.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Ordered `KEY=VALUE` file builder (CineSync and friends).
#[derive(Debug, Default)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.entries.push((key.to_string(), value.into()));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `.env` text, quoting values containing spaces or separators.
    pub fn render(&self) -> String {
        let mut output = String::new();
        for (key, value) in &self.entries {
            if value.contains(' ') || value.contains('#') || value.contains('=') {
                output.push_str(&format!("{}=\"{}\"\n", key, value));
            } else {
                output.push_str(&format!("{}={}\n", key, value));
            }
        }
        output
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        write_text(path, &self.render())
    }
}

/// Serialize to YAML and overwrite `path`, creating parent directories.
pub fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_text(path, &serde_yaml::to_string(value)?)
}

/// Serialize to pretty JSON and overwrite `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_text(path, &(serde_json::to_string_pretty(value)? + "\n"))
}

/// Overwrite `path` with `contents`, creating parent directories.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_file_quotes_awkward_values() {
        let mut file = EnvFile::new();
        file.push("PLAIN", "value");
        file.push("SPACED", "two words");
        file.push("EQUALS", "a=b");

        let rendered = file.render();
        assert!(rendered.contains("PLAIN=value\n"));
        assert!(rendered.contains("SPACED=\"two words\"\n"));
        assert!(rendered.contains("EQUALS=\"a=b\"\n"));
    }

    #[test]
    fn env_file_preserves_insertion_order() {
        let mut file = EnvFile::new();
        file.push("B", "1");
        file.push("A", "2");
        assert_eq!(file.keys().collect::<Vec<_>>(), vec!["B", "A"]);
    }

    #[test]
    fn writers_create_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Zurg").join("config").join("config.yml");

        write_yaml(&path, &serde_json::json!({"zurg": "v1", "port": 9999})).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("zurg: v1"));
        assert!(contents.contains("port: 9999"));
    }

    #[test]
    fn overwrite_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        write_json(&path, &serde_json::json!({"old": true})).unwrap();
        write_json(&path, &serde_json::json!({"new": true})).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("new"));
        assert!(!contents.contains("old"));
    }
}
