//! Application error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::crs::CrsError;
use crate::provider::ProviderError;

/// Errors that end an extraction run.
///
/// None of these are retried; each is reported once and the process exits
/// with [`AppError::exit_code`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad bounding box, zone or other user input.
    #[error("{0}")]
    InvalidArgument(String),

    /// Request failed, timed out or returned a non-success status.
    #[error("Error fetching parcels: {0}")]
    Network(String),

    /// Response could not be read as parcel features.
    #[error("Error parsing response: {0}")]
    ResponseFormat(String),

    /// The query succeeded but matched no parcels.
    #[error("No parcels found in the specified bounding box")]
    EmptyResult,

    /// Writing an output file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file or endpoint problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<CrsError> for AppError {
    fn from(e: CrsError) -> Self {
        AppError::InvalidArgument(e.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::HttpError(msg) => AppError::Network(msg),
            ProviderError::InvalidEndpoint { .. } => AppError::Config(e.to_string()),
            ProviderError::InvalidResponse(msg) => AppError::ResponseFormat(msg),
            ProviderError::ServiceError { .. } => AppError::ResponseFormat(e.to_string()),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_is_one_for_all() {
        let errors = [
            AppError::InvalidArgument("x".into()),
            AppError::Network("x".into()),
            AppError::ResponseFormat("x".into()),
            AppError::EmptyResult,
            AppError::io("a.dxf", io::Error::new(io::ErrorKind::Other, "x")),
            AppError::Config("x".into()),
        ];
        assert!(errors.iter().all(|e| e.exit_code() == 1));
    }

    #[test]
    fn test_from_crs_error() {
        let err: AppError = CrsError::InvalidBoundingBox("expected 4 values, got 3".into()).into();
        assert!(matches!(err, AppError::InvalidArgument(_)));
        assert!(err.to_string().contains("four comma-separated numbers"));
    }

    #[test]
    fn test_from_provider_error() {
        let err: AppError = ProviderError::HttpError("HTTP 500".into()).into();
        assert!(matches!(err, AppError::Network(_)));

        let err: AppError = ProviderError::InvalidResponse("bad".into()).into();
        assert!(matches!(err, AppError::ResponseFormat(_)));

        let err: AppError = ProviderError::ServiceError {
            code: 400,
            message: "Invalid query".into(),
        }
        .into();
        assert!(matches!(err, AppError::ResponseFormat(_)));
        assert!(err.to_string().contains("Invalid query"));

        let err: AppError = ProviderError::InvalidEndpoint {
            url: "x".into(),
            reason: "relative URL".into(),
        }
        .into();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_io_display_includes_path() {
        let err = AppError::io(
            "/nowhere/parcels.dxf",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        let message = err.to_string();
        assert!(message.contains("/nowhere/parcels.dxf"));
        assert!(message.contains("No such file"));
    }
}
