//! User configuration, loaded from `~/.config/calcpad/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::calculator::{Calculator, DEFAULT_TAPE_LIMIT, Locale};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display language for the error token.
    pub locale: Locale,
    /// Completed calculations kept on the tape.
    pub tape_limit: usize,
    /// Print the pending expression line above the display.
    pub show_history: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            tape_limit: DEFAULT_TAPE_LIMIT,
            show_history: true,
        }
    }
}

impl Config {
    /// The default configuration file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calcpad").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        tracing::info!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// A calculator set up with this configuration.
    pub fn build_calculator(&self) -> Calculator {
        Calculator::with_locale(self.locale).with_tape_limit(self.tape_limit)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.locale, Locale::Portuguese);
        assert!(config.show_history);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml("locale = \"en\"\ntape_limit = 3\n").unwrap();
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.tape_limit, 3);
        assert!(config.show_history);
    }

    #[test]
    fn test_invalid_locale() {
        assert!(Config::from_toml("locale = \"fr\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "locale = \"en\"").unwrap();
        writeln!(file, "show_history = false").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.locale, Locale::English);
        assert!(!config.show_history);
        assert_eq!(config.build_calculator().locale(), Locale::English);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
