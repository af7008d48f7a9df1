//! The extraction pipeline.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::crs::{BoundingBox, Reprojector, Zone};
use crate::export::{build_drawing, export_metadata, metadata_path};
use crate::provider::{HttpClient, ParcelProvider, ParcelQuery, ReqwestClient};

use super::config::ExtractConfig;
use super::error::AppError;

/// Progress notifications emitted while a run advances.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractEvent {
    /// About to reproject the user's bounding box.
    Reprojecting { bbox: BoundingBox, zone: Zone },
    /// Bounding box expressed in the service reference system.
    Reprojected { service_bbox: BoundingBox },
    /// About to query the parcel service.
    Querying,
    /// The service returned this many parcels.
    Fetched { parcel_count: usize },
    /// About to build and write the drawing.
    WritingDrawing { path: PathBuf },
    DrawingWritten { path: PathBuf },
    MetadataWritten { path: PathBuf },
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractSummary {
    pub parcel_count: usize,
    pub polylines: usize,
    pub labels: usize,
    pub service_bbox: BoundingBox,
    pub drawing_path: PathBuf,
    pub metadata_path: Option<PathBuf>,
}

/// Runs bbox reprojection, the parcel query and the file exports in order.
///
/// # Example
///
/// ```ignore
/// use parceldxf::app::{ExtractConfig, ParcelExtractor};
///
/// let config = ExtractConfig::new("1604764,770138,1609220,765420".parse()?);
/// let summary = ParcelExtractor::from_config(config)?.run()?;
/// println!("{} parcels", summary.parcel_count);
/// ```
pub struct ParcelExtractor<C: HttpClient> {
    config: ExtractConfig,
    provider: ParcelProvider<C>,
}

impl ParcelExtractor<ReqwestClient> {
    /// Creates an extractor using a reqwest client with the configured timeout.
    pub fn from_config(config: ExtractConfig) -> Result<Self, AppError> {
        let client = ReqwestClient::with_timeout(config.timeout_secs)?;
        Ok(Self::with_client(config, client))
    }
}

impl<C: HttpClient> ParcelExtractor<C> {
    /// Creates an extractor over any HTTP client.
    pub fn with_client(config: ExtractConfig, http_client: C) -> Self {
        let provider = ParcelProvider::with_endpoint(http_client, config.service_url.clone());
        Self { config, provider }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn http_client(&self) -> &C {
        self.provider.http_client()
    }

    /// Runs the pipeline without progress reporting.
    pub fn run(&self) -> Result<ExtractSummary, AppError> {
        self.run_with_progress(|_| {})
    }

    /// Runs the pipeline, reporting each step to `progress`.
    ///
    /// Nothing is written unless the query returned at least one parcel.
    pub fn run_with_progress<F>(&self, mut progress: F) -> Result<ExtractSummary, AppError>
    where
        F: FnMut(ExtractEvent),
    {
        let config = &self.config;
        let state_plane = config.crs.state_plane(config.zone);

        progress(ExtractEvent::Reprojecting {
            bbox: config.bbox,
            zone: config.zone,
        });
        let reprojector = Reprojector::new(state_plane)?;
        let service_bbox = reprojector.to_service(&config.bbox)?;
        debug!(
            epsg = reprojector.epsg(),
            service_srid = config.crs.service_srid,
            bbox = %service_bbox,
            "Reprojected bounding box"
        );
        progress(ExtractEvent::Reprojected { service_bbox });

        progress(ExtractEvent::Querying);
        let query = ParcelQuery::new(service_bbox, &config.crs, config.zone, &config.fields);
        let parcels = self.provider.fetch(&query)?;
        if parcels.is_empty() {
            return Err(AppError::EmptyResult);
        }
        info!(parcels = parcels.len(), "Fetched parcels");
        progress(ExtractEvent::Fetched {
            parcel_count: parcels.len(),
        });

        progress(ExtractEvent::WritingDrawing {
            path: config.output.clone(),
        });
        let drawing = build_drawing(&parcels, &config.drawing);
        drawing
            .save(&config.output)
            .map_err(|e| AppError::io(&config.output, e))?;
        info!(path = %config.output.display(), "Wrote drawing");
        progress(ExtractEvent::DrawingWritten {
            path: config.output.clone(),
        });

        let metadata = if config.export_metadata {
            let path = metadata_path(&config.output);
            export_metadata(&parcels, &path).map_err(|e| AppError::io(&path, e))?;
            info!(path = %path.display(), "Wrote metadata");
            progress(ExtractEvent::MetadataWritten { path: path.clone() });
            Some(path)
        } else {
            None
        };

        Ok(ExtractSummary {
            parcel_count: parcels.len(),
            polylines: drawing.polylines().count(),
            labels: drawing.texts().count(),
            service_bbox,
            drawing_path: config.output.clone(),
            metadata_path: metadata,
        })
    }
}
