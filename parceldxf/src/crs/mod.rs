//! Coordinate reference handling
//!
//! Parses State-Plane bounding boxes and converts them between the Ohio
//! State-Plane zones (US survey feet) and the Web Mercator system used by the
//! parcel service.
//!
//! Coordinates are always `(easting, northing)`; nothing in this module swaps
//! axes based on a reference system's declared axis order.

mod types;

pub use types::{BoundingBox, CrsError, CrsTable, StatePlaneCrs, Zone, SERVICE_SRID, US_SURVEY_FOOT};

use std::f64::consts::PI;

use proj4rs::proj::Proj;

/// Radius of the Web Mercator sphere in metres.
pub const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Geographic system sharing the State-Plane ellipsoid, so no datum shift occurs.
const GEOGRAPHIC_DEFINITION: &str = "+proj=longlat +ellps=GRS80 +no_defs";

/// Projects longitude/latitude (radians) to Web Mercator metres.
#[inline]
pub fn lon_lat_to_web_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = WEB_MERCATOR_RADIUS * lon;
    let y = WEB_MERCATOR_RADIUS * (PI / 4.0 + lat / 2.0).tan().ln();
    (x, y)
}

/// Inverse of [`lon_lat_to_web_mercator`]; returns radians.
#[inline]
pub fn web_mercator_to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = x / WEB_MERCATOR_RADIUS;
    let lat = 2.0 * (y / WEB_MERCATOR_RADIUS).exp().atan() - PI / 2.0;
    (lon, lat)
}

/// Converts bounding boxes between one State-Plane zone and Web Mercator.
pub struct Reprojector {
    state_plane: Proj,
    geographic: Proj,
    to_meter: f64,
    epsg: u32,
}

impl Reprojector {
    /// Builds a reprojector for the given State-Plane system.
    pub fn new(crs: &StatePlaneCrs) -> Result<Self, CrsError> {
        let state_plane = Proj::from_proj_string(crs.proj_definition)
            .map_err(|e| CrsError::Projection(format!("EPSG:{}: {}", crs.epsg, e)))?;
        let geographic = Proj::from_proj_string(GEOGRAPHIC_DEFINITION)
            .map_err(|e| CrsError::Projection(e.to_string()))?;

        Ok(Self {
            state_plane,
            geographic,
            to_meter: crs.to_meter,
            epsg: crs.epsg,
        })
    }

    /// EPSG code of the State-Plane side.
    pub fn epsg(&self) -> u32 {
        self.epsg
    }

    /// Reprojects a State-Plane bounding box to Web Mercator.
    ///
    /// Each corner is transformed on its own and the result is normalized,
    /// since the two corners need not keep their relative order.
    pub fn to_service(&self, bbox: &BoundingBox) -> Result<BoundingBox, CrsError> {
        let (x0, y0) = self.forward_point(bbox.xmin, bbox.ymin)?;
        let (x1, y1) = self.forward_point(bbox.xmax, bbox.ymax)?;
        Ok(BoundingBox::new(x0, y0, x1, y1).normalized())
    }

    /// Reprojects a Web Mercator bounding box back to State-Plane feet.
    pub fn to_state_plane(&self, bbox: &BoundingBox) -> Result<BoundingBox, CrsError> {
        let (x0, y0) = self.inverse_point(bbox.xmin, bbox.ymin)?;
        let (x1, y1) = self.inverse_point(bbox.xmax, bbox.ymax)?;
        Ok(BoundingBox::new(x0, y0, x1, y1).normalized())
    }

    /// State-Plane `(easting, northing)` in native units to Web Mercator metres.
    pub fn forward_point(&self, x: f64, y: f64) -> Result<(f64, f64), CrsError> {
        let mut point = (x * self.to_meter, y * self.to_meter, 0.0);
        proj4rs::transform::transform(&self.state_plane, &self.geographic, &mut point)
            .map_err(|e| CrsError::Projection(format!("({}, {}): {}", x, y, e)))?;
        Ok(lon_lat_to_web_mercator(point.0, point.1))
    }

    /// Web Mercator metres to State-Plane `(easting, northing)` in native units.
    pub fn inverse_point(&self, x: f64, y: f64) -> Result<(f64, f64), CrsError> {
        let (lon, lat) = web_mercator_to_lon_lat(x, y);
        let mut point = (lon, lat, 0.0);
        proj4rs::transform::transform(&self.geographic, &self.state_plane, &mut point)
            .map_err(|e| CrsError::Projection(format!("({}, {}): {}", x, y, e)))?;
        Ok((point.0 / self.to_meter, point.1 / self.to_meter))
    }
}

impl std::fmt::Debug for Reprojector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reprojector")
            .field("epsg", &self.epsg)
            .field("to_meter", &self.to_meter)
            .finish()
    }
}
