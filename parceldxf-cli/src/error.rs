//! CLI error type.

use parceldxf::app::AppError;
use parceldxf::config::ConfigError;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The extraction run failed.
    #[error("{0}")]
    App(#[from] AppError),

    /// The configuration file could not be located or loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Process exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::App(e) => e.exit_code(),
            CliError::Config(_) => 1,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}
