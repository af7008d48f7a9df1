//! parceldxf - Ohio parcel polygons to DXF
//!
//! This library fetches parcel polygons intersecting a State-Plane bounding
//! box from the ODNR statewide parcel service and writes them to a DXF
//! drawing, optionally with labels and a JSON attribute export.
//!
//! The pieces, in pipeline order:
//!
//! - [`crs`]: bounding box parsing and State-Plane ⇄ Web Mercator reprojection
//! - [`provider`]: the ArcGIS envelope query
//! - [`parcel`]: the parcel feature model
//! - [`export`] and [`dxf`]: drawing construction, DXF and JSON output
//! - [`app`]: the orchestrating [`ParcelExtractor`](app::ParcelExtractor)

pub mod app;
pub mod config;
pub mod crs;
pub mod dxf;
pub mod export;
pub mod logging;
pub mod parcel;
pub mod provider;

/// Version of the parceldxf library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
