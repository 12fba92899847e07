//! Configuration file
//!
//! An optional TOML file providing defaults for the command line:
//!
//! ```toml
//! # Programmer string, same syntax as -p
//! programmer = "linux_spi:dev=/dev/spidev1.0,spispeed=1000"
//!
//! # Skip autodetection
//! chip = "max6902"
//! ```

use spirtc_core::ChipFamily;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Locations searched when no --config is given, in order
const DEFAULT_PATHS: [&str; 2] = ["spirtc.toml", "/etc/spirtc.toml"];

/// Errors from loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unknown keys
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings read from the configuration file
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default programmer string
    pub programmer: Option<String>,
    /// Default chip family, skips autodetection
    pub chip: Option<ChipFamily>,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load the configuration
    ///
    /// An explicit path must exist. Otherwise the default locations are
    /// tried and an empty configuration is returned if none exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            log::debug!("Loaded configuration from {}", path.display());
            return Ok(config);
        }

        for path in DEFAULT_PATHS.iter().map(Path::new) {
            if path.is_file() {
                let config = Self::from_file(path)?;
                log::debug!("Loaded configuration from {}", path.display());
                return Ok(config);
            }
        }

        log::debug!("No configuration file found");
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = Config::from_toml_str(
            r#"
            programmer = "linux_spi:dev=/dev/spidev1.0"
            chip = "ds1391"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.programmer.as_deref(),
            Some("linux_spi:dev=/dev/spidev1.0")
        );
        assert_eq!(config.chip, Some(ChipFamily::Ds1391));
    }

    #[test]
    fn test_chip_aliases() {
        let config = Config::from_toml_str("chip = \"ds1394\"").unwrap();
        assert_eq!(config.chip, Some(ChipFamily::Ds1391));
        let config = Config::from_toml_str("chip = \"max6902\"").unwrap();
        assert_eq!(config.chip, Some(ChipFamily::Max6902));
        assert!(Config::from_toml_str("chip = \"ds3231\"").is_err());
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml_str("programer = \"dummy\"").is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/spirtc.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
