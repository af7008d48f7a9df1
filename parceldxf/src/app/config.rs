//! Run configuration for [`ParcelExtractor`](super::ParcelExtractor).
//!
//! `ExtractConfig` is the fully resolved set of inputs for one run: the
//! user's bounding box and zone, output choices, and the service and drawing
//! settings merged from the config file.

use std::path::PathBuf;

use crate::config::ConfigFile;
use crate::crs::{BoundingBox, CrsTable, Zone};
use crate::export::DrawingOptions;

/// Default output drawing path.
pub const DEFAULT_OUTPUT: &str = "parcels.dxf";

/// Inputs of one extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// Bounding box in the zone's State-Plane feet, as given by the user.
    pub bbox: BoundingBox,
    pub zone: Zone,
    pub output: PathBuf,
    /// Comma-separated attribute names to request.
    pub fields: String,
    pub export_metadata: bool,
    pub drawing: DrawingOptions,
    pub service_url: String,
    pub timeout_secs: u64,
    pub crs: CrsTable,
}

impl ExtractConfig {
    /// Creates a config with defaults for everything but the bounding box.
    pub fn new(bbox: BoundingBox) -> Self {
        Self::from_config_file(bbox, &ConfigFile::default())
    }

    /// Creates a config taking service and drawing settings from a config file.
    pub fn from_config_file(bbox: BoundingBox, file: &ConfigFile) -> Self {
        Self {
            bbox,
            zone: Zone::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            fields: file.service.fields.clone(),
            export_metadata: false,
            drawing: DrawingOptions {
                include_labels: false,
                label_height: file.drawing.label_height,
                id_field: file.drawing.label_id_field.clone(),
                owner_field: file.drawing.label_owner_field.clone(),
            },
            service_url: file.service.url.clone(),
            timeout_secs: file.service.timeout_secs,
            crs: CrsTable::ohio(),
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = fields.into();
        self
    }

    pub fn with_labels(mut self, include_labels: bool) -> Self {
        self.drawing.include_labels = include_labels;
        self
    }

    pub fn with_metadata(mut self, export_metadata: bool) -> Self {
        self.export_metadata = export_metadata;
        self
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
