//! User configuration
//!
//! Read from `~/.adbscope/config.toml`. Every key is optional; a missing
//! file means defaults, a broken one means defaults plus a warning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use adbscope_logs::MatchMode;
use adbscope_types::{DEFAULT_ADB, DEFAULT_TARGET};

/// Settings that are not exposed on the command line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// adb executable
    pub adb: String,

    /// Device serial or address
    pub target: String,

    /// Treat the filter as a regular expression
    pub regex: bool,

    /// Match the filter regardless of case
    pub case_insensitive: bool,

    /// Emit ANSI colors
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adb: DEFAULT_ADB.to_string(),
            target: DEFAULT_TARGET.to_string(),
            regex: false,
            case_insensitive: false,
            color: true,
        }
    }
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(".adbscope").join("config.toml"))
    }

    /// Load the config from the user's home directory
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load the config from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
                return Self::default();
            }
        };

        Self::parse(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Self::default()
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// How the filter argument is interpreted
    pub fn match_mode(&self) -> MatchMode {
        if self.regex {
            MatchMode::Regex
        } else {
            MatchMode::Literal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse("target = \"emulator-5554\"\ncase_insensitive = true\n").unwrap();
        assert_eq!(config.target, "emulator-5554");
        assert!(config.case_insensitive);
        assert_eq!(config.adb, "adb");
        assert_eq!(config.match_mode(), MatchMode::Literal);
        assert!(config.color);
    }

    #[test]
    fn test_regex_mode() {
        let config = Config::parse("regex = true").unwrap();
        assert_eq!(config.match_mode(), MatchMode::Regex);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "target = [").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "adb = \"/opt/platform-tools/adb\"\ncolor = false\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.adb, "/opt/platform-tools/adb");
        assert!(!config.color);
        assert_eq!(config.target, "localhost");
    }
}
