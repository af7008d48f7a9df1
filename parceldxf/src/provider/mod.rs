//! Parcel service access
//!
//! This module provides the HTTP client abstraction and the ArcGIS parcel
//! layer client that turns an envelope query into a [`ParcelCollection`].
//!
//! ```ignore
//! use parceldxf::provider::{ParcelProvider, ParcelQuery, ReqwestClient};
//!
//! let http_client = ReqwestClient::with_timeout(60)?;
//! let provider = ParcelProvider::new(http_client);
//! let parcels = provider.fetch(&ParcelQuery::new(envelope, &crs, zone, DEFAULT_FIELDS))?;
//! ```
//!
//! [`ParcelCollection`]: crate::parcel::ParcelCollection

mod arcgis;
mod http;
mod types;

pub use arcgis::{parse_response, ParcelProvider, ParcelQuery, DEFAULT_FIELDS, ODNR_PARCEL_URL};
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::MockHttpClient;
