//! Run settings.
//!
//! Paths default to the conventional project layout and can be overridden by
//! an optional YAML settings file, then by command-line flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RecipeError, Result};
use crate::extract::DEFAULT_EXTENSION;

pub const DEFAULT_SOURCE_DIR: &str = "converted";
pub const DEFAULT_OUTPUT_DIR: &str = "compiled";
pub const DEFAULT_GRAMMAR_FILE: &str = "../grammar/tokens.json";

/// Settings file names searched for in the working directory.
pub const DEFAULT_SETTINGS_NAMES: &[&str] = &["recipec.yaml", ".recipec.yaml"];

/// Contents of a settings file. Absent keys fall back to the defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SettingsFile {
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub grammar: Option<PathBuf>,
    #[serde(default)]
    pub extension: Option<String>,
}

impl SettingsFile {
    /// Parse a settings file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RecipeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| RecipeError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Look for a settings file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_SETTINGS_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub grammar: PathBuf,
    pub extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            grammar: PathBuf::from(DEFAULT_GRAMMAR_FILE),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Settings {
    /// Apply values from a settings file on top of these settings.
    pub fn with_file(mut self, file: SettingsFile) -> Self {
        if let Some(dir) = file.source_dir {
            self.source_dir = dir;
        }
        if let Some(dir) = file.output_dir {
            self.output_dir = dir;
        }
        if let Some(grammar) = file.grammar {
            self.grammar = grammar;
        }
        if let Some(ext) = file.extension {
            self.extension = ext;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.source_dir, PathBuf::from("converted"));
        assert_eq!(settings.output_dir, PathBuf::from("compiled"));
        assert_eq!(settings.grammar, PathBuf::from("../grammar/tokens.json"));
        assert_eq!(settings.extension, "food");
    }

    #[test]
    fn test_file_overrides_some_keys() {
        let yaml = r#"
source_dir: recipes/src
extension: dish
"#;
        let file: SettingsFile = serde_yaml::from_str(yaml).unwrap();
        let settings = Settings::default().with_file(file);
        assert_eq!(settings.source_dir, PathBuf::from("recipes/src"));
        assert_eq!(settings.extension, "dish");
        assert_eq!(settings.output_dir, PathBuf::from("compiled"));
    }

    #[test]
    fn test_discover_and_parse() {
        let temp = TempDir::new().unwrap();
        assert!(discover(temp.path()).is_none());

        let path = temp.path().join(".recipec.yaml");
        std::fs::write(&path, "grammar: grammar/tokens.json\n").unwrap();
        let found = discover(temp.path()).unwrap();
        assert_eq!(found, path);

        let file = SettingsFile::parse_file(&found).unwrap();
        assert_eq!(file.grammar, Some(PathBuf::from("grammar/tokens.json")));
    }

    #[test]
    fn test_invalid_settings_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("recipec.yaml");
        std::fs::write(&path, "source_dir: [unclosed\n").unwrap();

        let err = SettingsFile::parse_file(&path).unwrap_err();
        assert!(matches!(err, RecipeError::Settings { .. }));
    }
}
