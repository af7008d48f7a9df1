//! Coordinate types: bounding boxes, zones and the CRS table.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// EPSG code of the parcel service's native reference system (Web Mercator).
pub const SERVICE_SRID: u32 = 3857;

/// Length of one US survey foot in metres.
pub const US_SURVEY_FOOT: f64 = 1200.0 / 3937.0;

/// Errors from parsing or reprojecting coordinates.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CrsError {
    /// The bounding box string was not four comma-separated numbers.
    #[error("--bbox must be four comma-separated numbers (xmin,ymin,xmax,ymax): {0}")]
    InvalidBoundingBox(String),

    /// The zone name is not one of the supported State-Plane zones.
    #[error("Unknown zone '{0}' (expected 'north' or 'south')")]
    UnknownZone(String),

    /// The projection library rejected a definition or a point.
    #[error("Projection failed: {0}")]
    Projection(String),
}

/// Axis-aligned bounding box `(xmin, ymin, xmax, ymax)`.
///
/// The values are kept in the order they were given; call
/// [`BoundingBox::normalized`] to enforce `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    /// Creates a bounding box from its four ordinates.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Returns a copy with `xmin <= xmax` and `ymin <= ymax`.
    pub fn normalized(&self) -> Self {
        Self {
            xmin: self.xmin.min(self.xmax),
            ymin: self.ymin.min(self.ymax),
            xmax: self.xmin.max(self.xmax),
            ymax: self.ymin.max(self.ymax),
        }
    }

    /// Whether `min <= max` holds on both axes.
    pub fn is_normalized(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }

    /// Envelope string in the `xmin,ymin,xmax,ymax` form ArcGIS expects.
    pub fn to_envelope_string(&self) -> String {
        format!("{},{},{},{}", self.xmin, self.ymin, self.xmax, self.ymax)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}

impl FromStr for BoundingBox {
    type Err = CrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split(',').map(str::trim).collect();
        if tokens.len() != 4 {
            return Err(CrsError::InvalidBoundingBox(format!(
                "expected 4 values, got {}",
                tokens.len()
            )));
        }

        let mut values = [0.0_f64; 4];
        for (slot, token) in values.iter_mut().zip(&tokens) {
            let value: f64 = token
                .parse()
                .map_err(|_| CrsError::InvalidBoundingBox(format!("'{}' is not a number", token)))?;
            if !value.is_finite() {
                return Err(CrsError::InvalidBoundingBox(format!(
                    "'{}' is not a finite number",
                    token
                )));
            }
            *slot = value;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

/// Ohio State-Plane zone of the input bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Zone {
    North,
    #[default]
    South,
}

impl Zone {
    /// Lower-case name as used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::North => "north",
            Zone::South => "south",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = CrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" => Ok(Zone::North),
            "south" => Ok(Zone::South),
            _ => Err(CrsError::UnknownZone(s.to_string())),
        }
    }
}

/// A State-Plane reference system.
///
/// `proj_definition` is expressed in metres; `to_meter` converts the
/// system's native linear unit (US survey feet for Ohio) to metres.
#[derive(Debug, Clone, PartialEq)]
pub struct StatePlaneCrs {
    pub epsg: u32,
    pub name: &'static str,
    pub proj_definition: &'static str,
    pub to_meter: f64,
}

/// Immutable mapping from zone to reference system, plus the service SRID.
#[derive(Debug, Clone, PartialEq)]
pub struct CrsTable {
    pub service_srid: u32,
    pub north: StatePlaneCrs,
    pub south: StatePlaneCrs,
}

impl CrsTable {
    /// Ohio State Plane North/South (NAD83, US survey feet) against EPSG:3857.
    pub fn ohio() -> Self {
        Self {
            service_srid: SERVICE_SRID,
            north: StatePlaneCrs {
                epsg: 3734,
                name: "Ohio State Plane North",
                proj_definition: "+proj=lcc +lat_1=41.7 +lat_2=40.43333333333333 \
                                  +lat_0=39.66666666666666 +lon_0=-82.5 +x_0=600000 +y_0=0 \
                                  +ellps=GRS80 +units=m +no_defs",
                to_meter: US_SURVEY_FOOT,
            },
            south: StatePlaneCrs {
                epsg: 3735,
                name: "Ohio State Plane South",
                proj_definition: "+proj=lcc +lat_1=40.03333333333333 +lat_2=38.73333333333333 \
                                  +lat_0=38 +lon_0=-82.5 +x_0=600000 +y_0=0 \
                                  +ellps=GRS80 +units=m +no_defs",
                to_meter: US_SURVEY_FOOT,
            },
        }
    }

    /// Reference system for a zone.
    pub fn state_plane(&self, zone: Zone) -> &StatePlaneCrs {
        match zone {
            Zone::North => &self.north,
            Zone::South => &self.south,
        }
    }
}

impl Default for CrsTable {
    fn default() -> Self {
        Self::ohio()
    }
}
