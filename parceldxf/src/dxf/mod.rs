//! Minimal DXF drawing model and writer
//!
//! Only what the parcel exporter needs: a layer table, closed polylines and
//! text. The output targets AutoCAD R12 ASCII DXF.

mod document;
mod writer;

pub use document::{AciColor, Drawing, Entity, Layer, Polyline, Text};
pub use writer::DxfWriter;
