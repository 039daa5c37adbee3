use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::solver::PackSizes;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("pack size list is empty")]
    Empty,

    #[error("pack sizes must be positive")]
    NonPositive,
}

/// Contents of the JSON config file, e.g. `{"items": [250, 500, 1000]}`.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub items: Vec<u64>,
}

impl Settings {
    /// Reads settings from `path`. A missing file is not an error and yields `None`.
    pub fn load(path: &Path) -> Result<Option<Settings>, ConfigError> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Settings::parse(&data)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn parse(data: &[u8]) -> serde_json::Result<Settings> {
        serde_json::from_slice(data)
    }

    pub fn into_pack_sizes(self) -> Result<PackSizes, ConfigError> {
        PackSizes::new(self.items)
    }
}

/// Resolves the pack sizes to serve with.
///
/// Falls back to the built-in sizes when the config file is missing or cannot
/// be read. A file that reads but holds invalid content is reported as an error.
pub fn load_pack_sizes(path: &Path) -> Result<PackSizes, ConfigError> {
    let settings = match Settings::load(path) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            warn!("no config file at {}, using default pack sizes", path.display());
            return Ok(PackSizes::default());
        }
        Err(err @ ConfigError::Read { .. }) => {
            warn!("{}, using default pack sizes", err);
            return Ok(PackSizes::default());
        }
        Err(err) => return Err(err),
    };
    let sizes = settings.into_pack_sizes()?;
    info!("loaded pack sizes {:?} from {}", sizes.as_slice(), path.display());
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("packs-{}-{}.json", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_settings() {
        let settings = Settings::parse(br#"{"items": [1000, 250, 500]}"#).unwrap();
        assert_eq!(settings.items, vec![1000, 250, 500]);
        let sizes = settings.into_pack_sizes().unwrap();
        assert_eq!(sizes.as_slice(), &[250, 500, 1000]);
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(Settings::parse(br#"{"items": [250, -1]}"#).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("packs-does-not-exist.json");
        assert!(Settings::load(&path).unwrap().is_none());
        assert_eq!(load_pack_sizes(&path).unwrap(), PackSizes::default());
    }

    #[test]
    fn test_unreadable_path_uses_defaults() {
        let path = std::env::temp_dir();
        assert!(matches!(Settings::load(&path), Err(ConfigError::Read { .. })));
        assert_eq!(load_pack_sizes(&path).unwrap(), PackSizes::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_config("valid", r#"{"items": [23, 31, 53]}"#);
        let sizes = load_pack_sizes(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(sizes.as_slice(), &[23, 31, 53]);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let path = temp_config("malformed", "{items: ");
        let res = load_pack_sizes(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(res, Err(ConfigError::Parse { .. })));

        let path = temp_config("empty", r#"{"items": []}"#);
        let res = load_pack_sizes(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(res, Err(ConfigError::Empty)));

        let path = temp_config("zero", r#"{"items": [0, 250]}"#);
        let res = load_pack_sizes(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(res, Err(ConfigError::NonPositive)));
    }
}
