//! Parcel attribute export.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::parcel::{Attributes, ParcelCollection};

/// JSON document written next to the drawing.
#[derive(Debug, Serialize)]
pub struct ParcelMetadata<'a> {
    pub total_parcels: usize,
    pub parcels: Vec<&'a Attributes>,
}

impl<'a> ParcelMetadata<'a> {
    pub fn from_parcels(parcels: &'a ParcelCollection) -> Self {
        Self {
            total_parcels: parcels.len(),
            parcels: parcels.iter().map(|p| &p.attributes).collect(),
        }
    }
}

/// Metadata file path for a drawing: same stem, `.json` extension.
pub fn metadata_path(drawing_path: &Path) -> PathBuf {
    drawing_path.with_extension("json")
}

/// Writes `{"total_parcels": n, "parcels": [...]}` to `path`, indented by two spaces.
pub fn export_metadata(parcels: &ParcelCollection, path: &Path) -> io::Result<()> {
    let metadata = ParcelMetadata::from_parcels(parcels);
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &metadata)?;
    writer.flush()
}
