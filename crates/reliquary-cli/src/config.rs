//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use reliquary_catalog::ParserConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog file to load at startup
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// SQLite database holding saved builds (defaults to the config directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Catalog column layout
    #[serde(default)]
    pub parser: ParserConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file, history and default database.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".reliquary"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::path()?)
    }

    /// Load configuration from a specific file, writing defaults if it is missing.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to a specific file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check the parser section.
    pub fn validate(&self) -> Result<()> {
        self.parser.validate().map_err(CliError::Config)
    }

    /// Database file, falling back to `reliquary.db` in the config directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::dir()?.join("reliquary.db")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            database_path: None,
            settings: Settings::default(),
            parser: ParserConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("catalog.csv")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog_path, PathBuf::from("catalog.csv"));
        assert!(config.database_path.is_none());
        assert!(config.settings.color);
        assert_eq!(config.parser.name_column, "Имя");
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.settings.history_size, 1000);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.catalog_path, config.catalog_path);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
catalog_path = "items.tsv"
database_path = "/tmp/builds.db"

[settings]
format = "json"

[parser]
delimiter = "\t"
name_column = "name"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("items.tsv"));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/builds.db"));
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.parser.delimiter, '\t');
        assert_eq!(config.parser.tier_column, "Тир");
    }

    #[test]
    fn test_written_defaults_have_no_overlay_section() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        Config::load_from(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[settings]"));
        assert!(written.contains("[parser]"));
        assert!(!written.contains("[overlay]"));
    }

    #[test]
    fn test_stale_overlay_section_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "catalog_path = \"items.csv\"\n\n[overlay]\noffset = -5.0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("items.csv"));
    }

    #[test]
    fn test_invalid_parser_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[parser]\nname_column = \"\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }
}
