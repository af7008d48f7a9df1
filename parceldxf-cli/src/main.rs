//! parceldxf CLI - Command-line interface
//!
//! Extracts Ohio county parcel polygons for a State-Plane bounding box and
//! writes them to a DXF drawing.

mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use commands::common::ZoneArg;
use commands::extract::{self, ExtractArgs};

#[derive(Parser, Debug)]
#[command(name = "parceldxf")]
#[command(version = parceldxf::VERSION)]
#[command(about = "Extract Ohio parcel polygons within a bounding box to DXF", long_about = None)]
struct Cli {
    /// Bounding box in State-Plane feet: xmin,ymin,xmax,ymax
    #[arg(long, allow_hyphen_values = true)]
    bbox: String,

    /// Ohio State-Plane zone of the bounding box
    #[arg(long, value_enum, ignore_case = true, default_value_t = ZoneArg::South)]
    zone: ZoneArg,

    /// Output DXF file
    #[arg(short, long, default_value = parceldxf::app::DEFAULT_OUTPUT)]
    out: PathBuf,

    /// Comma-separated attribute fields to request (default from config)
    #[arg(long)]
    fields: Option<String>,

    /// Add PIN/owner labels at each parcel's vertex centroid
    #[arg(long)]
    include_labels: bool,

    /// Also write parcel attributes to <out>.json
    #[arg(long)]
    export_metadata: bool,

    /// Print bounding boxes and a summary; enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Request timeout in seconds (default from config, 60)
    #[arg(long)]
    timeout: Option<u64>,

    /// Configuration file (default: per-user config.ini if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl From<Cli> for ExtractArgs {
    fn from(cli: Cli) -> Self {
        ExtractArgs {
            bbox: cli.bbox,
            zone: cli.zone,
            out: cli.out,
            fields: cli.fields,
            include_labels: cli.include_labels,
            export_metadata: cli.export_metadata,
            verbose: cli.verbose,
            timeout: cli.timeout,
            config: cli.config,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            // Help goes to stdout, usage errors to stderr
            let _ = e.print();
            process::exit(code);
        }
    };

    parceldxf::logging::init_logging(cli.verbose);

    if let Err(e) = extract::run(cli.into()) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments_use_defaults() {
        let cli = Cli::try_parse_from(["parceldxf", "--bbox", "1,2,3,4"]).unwrap();
        assert_eq!(cli.bbox, "1,2,3,4");
        assert_eq!(cli.zone, ZoneArg::South);
        assert_eq!(cli.out, PathBuf::from("parcels.dxf"));
        assert!(cli.fields.is_none());
        assert!(!cli.include_labels);
        assert!(!cli.export_metadata);
        assert!(!cli.verbose);
        assert!(cli.timeout.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_bbox_is_required() {
        let err = Cli::try_parse_from(["parceldxf"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_bbox_accepts_leading_minus() {
        let cli = Cli::try_parse_from(["parceldxf", "--bbox", "-10,-20,30,40"]).unwrap();
        assert_eq!(cli.bbox, "-10,-20,30,40");
    }

    #[test]
    fn test_zone_is_case_insensitive() {
        let cli = Cli::try_parse_from(["parceldxf", "--bbox", "1,2,3,4", "--zone", "NORTH"]).unwrap();
        assert_eq!(cli.zone, ZoneArg::North);
    }

    #[test]
    fn test_unknown_zone_rejected() {
        let err = Cli::try_parse_from(["parceldxf", "--bbox", "1,2,3,4", "--zone", "east"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "parceldxf",
            "--bbox",
            "1604764,770138,1609220,765420",
            "--zone",
            "north",
            "-o",
            "out/site.dxf",
            "--fields",
            "PIN,ACRES",
            "--include-labels",
            "--export-metadata",
            "-v",
            "--timeout",
            "5",
            "--config",
            "custom.ini",
        ])
        .unwrap();

        let args = ExtractArgs::from(cli);
        assert_eq!(args.zone, ZoneArg::North);
        assert_eq!(args.out, PathBuf::from("out/site.dxf"));
        assert_eq!(args.fields.as_deref(), Some("PIN,ACRES"));
        assert!(args.include_labels);
        assert!(args.export_metadata);
        assert!(args.verbose);
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.config, Some(PathBuf::from("custom.ini")));
    }

    #[test]
    fn test_timeout_must_be_number() {
        let result = Cli::try_parse_from(["parceldxf", "--bbox", "1,2,3,4", "--timeout", "soon"]);
        assert!(result.is_err());
    }
}
