//! Provider error type.

use thiserror::Error;

/// Errors from querying the parcel service.
///
/// `Clone` so test clients can hand out the same failure repeatedly.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    /// Transport failure, timeout or non-success HTTP status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The configured endpoint is not a valid URL.
    #[error("Invalid service endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// The body could not be read as a GeoJSON feature collection.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The service answered with an ArcGIS error envelope.
    #[error("Service error {code}: {message}")]
    ServiceError { code: i64, message: String },
}
