//! Common types and utilities shared across CLI commands.

use std::path::Path;

use clap::ValueEnum;
use parceldxf::config::ConfigFile;
use parceldxf::crs::Zone;

use crate::error::CliError;

/// Ohio State-Plane zone selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum ZoneArg {
    /// Ohio North (EPSG:3734)
    North,
    /// Ohio South (EPSG:3735)
    South,
}

impl From<ZoneArg> for Zone {
    fn from(zone: ZoneArg) -> Self {
        match zone {
            ZoneArg::North => Zone::North,
            ZoneArg::South => Zone::South,
        }
    }
}

/// Load configuration: an explicit path must exist, otherwise the per-user
/// file is used when present, otherwise defaults.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    match path {
        Some(path) if !path.is_file() => Err(CliError::Config(format!(
            "config file not found: {}",
            path.display()
        ))),
        Some(path) => Ok(ConfigFile::load_from(path)?),
        None => Ok(ConfigFile::load_default()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_arg_conversion() {
        assert_eq!(Zone::from(ZoneArg::North), Zone::North);
        assert_eq!(Zone::from(ZoneArg::South), Zone::South);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("absent.ini")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[service]\ntimeout = 7\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.service.timeout_secs, 7);
    }
}
