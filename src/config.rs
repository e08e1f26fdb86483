//! Configuration file for igata.
//!
//! ```yaml
//! formatter: rspec
//! annotate: false
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::report::DEFAULT_FORMATTER;

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["igata.yaml", ".igata.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Formatter name used when `--formatter` is not given.
    #[serde(default)]
    pub formatter: Option<String>,
    /// Emit branch/comparison comments in generated stubs (default: true).
    #[serde(default)]
    pub annotate: Option<bool>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. An empty document is the default config.
    pub fn parse_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Find a config file in `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Returns the formatter name (defaults to minitest).
    pub fn formatter_name(&self) -> &str {
        self.formatter.as_deref().unwrap_or(DEFAULT_FORMATTER)
    }

    /// Returns whether stubs are annotated (defaults to true).
    pub fn should_annotate(&self) -> bool {
        self.annotate.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.formatter_name(), "minitest");
        assert!(config.should_annotate());
    }

    #[test]
    fn test_parse_str() {
        let config = Config::parse_str("formatter: rspec\nannotate: false\n").unwrap();
        assert_eq!(config.formatter_name(), "rspec");
        assert!(!config.should_annotate());
    }

    #[test]
    fn test_empty_and_unknown_keys() {
        assert_eq!(Config::parse_str("").unwrap(), Config::default());
        let config = Config::parse_str("something_else: 1\n").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = Config::parse_str("formatter: [unclosed").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::discover(dir.path()).is_none());

        let path = dir.path().join(".igata.yaml");
        std::fs::write(&path, "formatter: json\n").unwrap();
        assert_eq!(Config::discover(dir.path()), Some(path.clone()));
        assert_eq!(Config::parse_file(&path).unwrap().formatter_name(), "json");
    }
}
