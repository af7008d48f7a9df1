//! Extract command - fetch parcels for a bounding box and write the drawing.

use std::path::PathBuf;

use parceldxf::app::{AppError, ExtractConfig, ExtractEvent, ExtractSummary, ParcelExtractor};
use parceldxf::config::ConfigFile;
use parceldxf::crs::{BoundingBox, Zone};
use tracing::debug;

use super::common::{load_config, ZoneArg};
use crate::error::CliError;

/// Arguments for the extract command.
#[derive(Debug)]
pub struct ExtractArgs {
    pub bbox: String,
    pub zone: ZoneArg,
    pub out: PathBuf,
    pub fields: Option<String>,
    pub include_labels: bool,
    pub export_metadata: bool,
    pub verbose: bool,
    pub timeout: Option<u64>,
    pub config: Option<PathBuf>,
}

/// Run the extract command.
pub fn run(args: ExtractArgs) -> Result<(), CliError> {
    let bbox: BoundingBox = args.bbox.parse().map_err(AppError::from)?;
    let file = load_config(args.config.as_deref())?;
    let config = resolve_config(bbox, &args, &file);
    debug!(
        zone = %config.zone,
        service_url = %config.service_url,
        timeout_secs = config.timeout_secs,
        "Resolved run configuration"
    );
    let verbose = args.verbose;

    if verbose {
        let crs = config.crs.state_plane(config.zone);
        println!("Bounding box: {} ({})", config.bbox, crs.name);
        println!("Output file:  {}", config.output.display());
        println!("Fields:       {}", config.fields);
    }

    let extractor = ParcelExtractor::from_config(config)?;
    let summary = extractor.run_with_progress(|event| print_event(&event, verbose))?;

    if verbose {
        print_summary(extractor.config(), &summary);
    }
    Ok(())
}

/// Merge CLI arguments over config file settings.
fn resolve_config(bbox: BoundingBox, args: &ExtractArgs, file: &ConfigFile) -> ExtractConfig {
    // CLI takes precedence, then config
    let fields = args
        .fields
        .clone()
        .unwrap_or_else(|| file.service.fields.clone());
    let timeout_secs = args.timeout.unwrap_or(file.service.timeout_secs);

    ExtractConfig::from_config_file(bbox, file)
        .with_zone(Zone::from(args.zone))
        .with_output(args.out.clone())
        .with_fields(fields)
        .with_labels(args.include_labels)
        .with_metadata(args.export_metadata)
        .with_timeout_secs(timeout_secs)
}

fn print_event(event: &ExtractEvent, verbose: bool) {
    match event {
        ExtractEvent::Reprojecting { .. } => {
            println!("Re-projecting bounding box to Web Mercator...");
        }
        ExtractEvent::Reprojected { service_bbox } => {
            if verbose {
                println!("  Service bbox: {}", service_bbox);
            }
        }
        ExtractEvent::Querying => println!("Querying ODNR parcel service..."),
        ExtractEvent::Fetched { parcel_count } => println!("Found {} parcels", parcel_count),
        ExtractEvent::WritingDrawing { .. } => println!("Building DXF file..."),
        ExtractEvent::DrawingWritten { path } => println!("Saved {}", path.display()),
        ExtractEvent::MetadataWritten { path } => {
            println!("Exported metadata to {}", path.display());
        }
    }
}

fn print_summary(config: &ExtractConfig, summary: &ExtractSummary) {
    let crs = config.crs.state_plane(config.zone);
    println!();
    println!("Summary:");
    println!("  Parcels exported:  {}", summary.parcel_count);
    println!("  Polylines:         {}", summary.polylines);
    println!("  Coordinate system: {} (EPSG:{})", crs.name, crs.epsg);
    println!("  Output file:       {}", summary.drawing_path.display());
    if config.drawing.include_labels {
        println!("  Labels:            {}", summary.labels);
    }
    if let Some(path) = &summary.metadata_path {
        println!("  Metadata file:     {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ExtractArgs {
        ExtractArgs {
            bbox: "1604764,770138,1609220,765420".to_string(),
            zone: ZoneArg::North,
            out: PathBuf::from("site.dxf"),
            fields: None,
            include_labels: true,
            export_metadata: false,
            verbose: false,
            timeout: None,
            config: None,
        }
    }

    #[test]
    fn test_config_file_fills_unset_flags() {
        let file = ConfigFile::parse(
            "[service]\nurl = http://localhost/query\ntimeout = 9\nfields = PIN\n\
             [drawing]\nlabel_height = 4\n",
        )
        .unwrap();
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);

        let config = resolve_config(bbox, &args(), &file);
        assert_eq!(config.zone, Zone::North);
        assert_eq!(config.output, PathBuf::from("site.dxf"));
        assert_eq!(config.fields, "PIN");
        assert_eq!(config.timeout_secs, 9);
        assert_eq!(config.service_url, "http://localhost/query");
        assert_eq!(config.drawing.label_height, 4.0);
        assert!(config.drawing.include_labels);
        assert!(!config.export_metadata);
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = ConfigFile::parse("[service]\ntimeout = 9\nfields = PIN\n").unwrap();
        let mut args = args();
        args.fields = Some("PIN,OWNER1".to_string());
        args.timeout = Some(30);

        let config = resolve_config(BoundingBox::new(1.0, 2.0, 3.0, 4.0), &args, &file);
        assert_eq!(config.fields, "PIN,OWNER1");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_bbox_fails_before_any_request() {
        let mut args = args();
        args.bbox = "1,2,3".to_string();

        let err = run(args).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("--bbox must be four comma-separated numbers"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args();
        args.config = Some(dir.path().join("absent.ini"));

        let err = run(args).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
