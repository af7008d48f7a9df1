//! Parcel feature model
//!
//! The service answers with a GeoJSON `FeatureCollection`. This module turns
//! it into [`ParcelCollection`], keeping only what the exporters consume:
//! polygon ring sets and the raw attribute map of every feature.

use geojson::{FeatureCollection, PolygonType, Position, Value};
use tracing::warn;

/// Raw attribute map of one feature, in the order the service returned it.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// A 2D point in the drawing's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A closed vertex sequence as delivered by the service.
pub type Ring = Vec<Point2>;

/// Polygonal geometry of a parcel.
///
/// Ring index 0 of every ring set is the exterior; any further rings are
/// holes and are not drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum ParcelGeometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl ParcelGeometry {
    /// Ring sets in order: one for a polygon, one per member of a multipolygon.
    pub fn ring_sets(&self) -> Vec<&[Ring]> {
        match self {
            ParcelGeometry::Polygon(rings) => vec![rings.as_slice()],
            ParcelGeometry::MultiPolygon(polygons) => {
                polygons.iter().map(|rings| rings.as_slice()).collect()
            }
        }
    }

    /// Exterior rings of all ring sets, skipping ring sets without one.
    pub fn exteriors(&self) -> impl Iterator<Item = &Ring> {
        self.ring_sets()
            .into_iter()
            .filter_map(|rings| rings.first())
            .filter(|ring| !ring.is_empty())
    }
}

/// One feature returned by the parcel service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parcel {
    /// `None` when the feature had no geometry or a non-polygonal one.
    pub geometry: Option<ParcelGeometry>,
    pub attributes: Attributes,
}

impl Parcel {
    /// Attribute value rendered as label text.
    ///
    /// Strings are returned verbatim; numbers and booleans use their JSON
    /// form. Missing and null attributes are empty.
    pub fn attribute_text(&self, name: &str) -> String {
        match self.attributes.get(name) {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Errors converting a service response into parcels.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParcelError {
    #[error("feature {feature}: position has {len} ordinate(s), expected at least 2")]
    ShortPosition { feature: usize, len: usize },
}

/// Ordered parcels of one query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParcelCollection {
    pub parcels: Vec<Parcel>,
}

impl ParcelCollection {
    pub fn new(parcels: Vec<Parcel>) -> Self {
        Self { parcels }
    }

    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parcel> {
        self.parcels.iter()
    }

    /// Converts a GeoJSON feature collection.
    ///
    /// Features whose geometry is missing or not a (multi)polygon are kept
    /// without geometry so their attributes still reach the metadata export.
    pub fn from_geojson(collection: FeatureCollection) -> Result<Self, ParcelError> {
        let mut parcels = Vec::with_capacity(collection.features.len());

        for (index, feature) in collection.features.into_iter().enumerate() {
            let geometry = match feature.geometry.map(|g| g.value) {
                Some(Value::Polygon(rings)) => {
                    Some(ParcelGeometry::Polygon(convert_polygon(index, &rings)?))
                }
                Some(Value::MultiPolygon(polygons)) => Some(ParcelGeometry::MultiPolygon(
                    polygons
                        .iter()
                        .map(|rings| convert_polygon(index, rings))
                        .collect::<Result<Vec<_>, _>>()?,
                )),
                Some(other) => {
                    warn!(
                        feature = index,
                        geometry_type = geometry_type_name(&other),
                        "Skipping non-polygonal geometry"
                    );
                    None
                }
                None => {
                    warn!(feature = index, "Feature has no geometry");
                    None
                }
            };

            parcels.push(Parcel {
                geometry,
                attributes: feature.properties.unwrap_or_default(),
            });
        }

        Ok(Self { parcels })
    }
}

impl<'a> IntoIterator for &'a ParcelCollection {
    type Item = &'a Parcel;
    type IntoIter = std::slice::Iter<'a, Parcel>;

    fn into_iter(self) -> Self::IntoIter {
        self.parcels.iter()
    }
}

fn geometry_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn convert_polygon(feature: usize, rings: &PolygonType) -> Result<Vec<Ring>, ParcelError> {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|position| convert_position(feature, position))
                .collect()
        })
        .collect()
}

fn convert_position(feature: usize, position: &Position) -> Result<Point2, ParcelError> {
    match position.as_slice() {
        [x, y, ..] => Ok(Point2::new(*x, *y)),
        _ => Err(ParcelError::ShortPosition {
            feature,
            len: position.len(),
        }),
    }
}
