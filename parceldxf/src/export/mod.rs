//! Conversion of parcels into output files
//!
//! - [`build_drawing`] turns parcels into a DXF [`Drawing`](crate::dxf::Drawing)
//! - [`export_metadata`] writes the raw attributes of every parcel as JSON
//!
//! Both work from the same in-memory [`ParcelCollection`](crate::parcel::ParcelCollection);
//! neither reads the other's output.

mod drawing;
mod metadata;

pub use drawing::{
    build_drawing, vertex_centroid, DrawingOptions, DEFAULT_LABEL_HEIGHT, LABELS_LAYER,
    PARCELS_LAYER,
};
pub use metadata::{export_metadata, metadata_path, ParcelMetadata};
