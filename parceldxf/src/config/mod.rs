//! Configuration file support
//!
//! Settings are read from an INI file. Every key is optional; missing keys
//! keep their defaults and unknown keys are ignored.
//!
//! ```ini
//! [service]
//! url = https://gis.ohiodnr.gov/arcgis_site2/rest/services/OIT_Services/odnr_landbase_v2/MapServer/4/query
//! timeout = 60
//! fields = PIN,OWNER1,OWNER2,ADDRESS,CITY,STATE,ZIP,ACRES
//!
//! [drawing]
//! label_height = 10
//! label_id_field = PIN
//! label_owner_field = OWNER1
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::export::DEFAULT_LABEL_HEIGHT;
use crate::provider::{DEFAULT_FIELDS, DEFAULT_TIMEOUT_SECS, ODNR_PARCEL_URL};

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid value for {section}.{key}: '{value}'")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

/// `[service]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    pub url: String,
    pub timeout_secs: u64,
    pub fields: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            url: ODNR_PARCEL_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fields: DEFAULT_FIELDS.to_string(),
        }
    }
}

/// `[drawing]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSettings {
    pub label_height: f64,
    pub label_id_field: String,
    pub label_owner_field: String,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            label_height: DEFAULT_LABEL_HEIGHT,
            label_id_field: "PIN".to_string(),
            label_owner_field: "OWNER1".to_string(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    pub service: ServiceSettings,
    pub drawing: DrawingSettings,
}

impl ConfigFile {
    /// Loads a configuration file from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Parses configuration from INI text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Read {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Loads the default config file if it exists, otherwise returns defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match config_file_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("service")) {
            if let Some(url) = section.get("url") {
                config.service.url = url.trim().to_string();
            }
            if let Some(value) = section.get("timeout") {
                config.service.timeout_secs = parse_value("service", "timeout", value)?;
            }
            if let Some(fields) = section.get("fields") {
                config.service.fields = fields.trim().to_string();
            }
        }

        if let Some(section) = ini.section(Some("drawing")) {
            if let Some(value) = section.get("label_height") {
                config.drawing.label_height = parse_value("drawing", "label_height", value)?;
            }
            if let Some(field) = section.get("label_id_field") {
                config.drawing.label_id_field = field.trim().to_string();
            }
            if let Some(field) = section.get("label_owner_field") {
                config.drawing.label_owner_field = field.trim().to_string();
            }
        }

        Ok(config)
    }
}

/// Path of the per-user config file, e.g. `~/.config/parceldxf/config.ini`.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("parceldxf").join("config.ini"))
}

fn parse_value<T: FromStr>(section: &str, key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.service.url, ODNR_PARCEL_URL);
        assert_eq!(config.service.timeout_secs, 60);
        assert_eq!(config.service.fields, DEFAULT_FIELDS);
        assert_eq!(config.drawing.label_height, 10.0);
        assert_eq!(config.drawing.label_id_field, "PIN");
        assert_eq!(config.drawing.label_owner_field, "OWNER1");
    }

    #[test]
    fn test_parse_overrides() {
        let config = ConfigFile::parse(
            "[service]\n\
             url = http://localhost:8080/query\n\
             timeout = 15\n\
             \n\
             [drawing]\n\
             label_height = 2.5\n\
             label_owner_field = OWNER2\n",
        )
        .unwrap();

        assert_eq!(config.service.url, "http://localhost:8080/query");
        assert_eq!(config.service.timeout_secs, 15);
        assert_eq!(config.service.fields, DEFAULT_FIELDS);
        assert_eq!(config.drawing.label_height, 2.5);
        assert_eq!(config.drawing.label_id_field, "PIN");
        assert_eq!(config.drawing.label_owner_field, "OWNER2");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = ConfigFile::parse("[service]\ncolour = blue\n[other]\nx = 1\n").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_invalid_number() {
        let result = ConfigFile::parse("[service]\ntimeout = soon\n");
        match result {
            Err(ConfigError::InvalidValue { section, key, .. }) => {
                assert_eq!(section, "service");
                assert_eq!(key, "timeout");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[service]\nfields = PIN,ACRES\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.service.fields, "PIN,ACRES");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigFile::load_from(&dir.path().join("absent.ini"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_config_file_path_name() {
        if let Some(path) = config_file_path() {
            assert!(path.ends_with("parceldxf/config.ini"));
        }
    }
}
