//! Parcel to drawing conversion.

use tracing::debug;

use crate::dxf::{AciColor, Drawing};
use crate::parcel::{Parcel, ParcelCollection, Point2};

/// Layer holding parcel boundaries.
pub const PARCELS_LAYER: &str = "PARCELS";

/// Layer holding parcel labels.
pub const LABELS_LAYER: &str = "LABELS";

/// Label text height in drawing units (State-Plane feet).
pub const DEFAULT_LABEL_HEIGHT: f64 = 10.0;

/// Options for [`build_drawing`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingOptions {
    /// Add a label per ring set of every identified parcel.
    pub include_labels: bool,
    pub label_height: f64,
    /// Attribute that identifies a parcel; parcels without it get no label.
    pub id_field: String,
    /// Attribute shown on the label's second line.
    pub owner_field: String,
}

impl Default for DrawingOptions {
    fn default() -> Self {
        Self {
            include_labels: false,
            label_height: DEFAULT_LABEL_HEIGHT,
            id_field: "PIN".to_string(),
            owner_field: "OWNER1".to_string(),
        }
    }
}

impl DrawingOptions {
    pub fn with_labels(mut self, include_labels: bool) -> Self {
        self.include_labels = include_labels;
        self
    }

    pub fn with_label_height(mut self, height: f64) -> Self {
        self.label_height = height;
        self
    }
}

/// Builds the drawing for a parcel collection.
///
/// Every ring set contributes its exterior ring as one closed polyline on
/// [`PARCELS_LAYER`], points taken as delivered. Holes are not drawn.
pub fn build_drawing(parcels: &ParcelCollection, options: &DrawingOptions) -> Drawing {
    let mut drawing = Drawing::new();
    drawing.add_layer(PARCELS_LAYER, AciColor::CYAN);
    if options.include_labels {
        drawing.add_layer(LABELS_LAYER, AciColor::YELLOW);
    }

    for parcel in parcels {
        let Some(geometry) = &parcel.geometry else {
            continue;
        };

        let label = if options.include_labels {
            label_lines(parcel, options)
        } else {
            None
        };

        for exterior in geometry.exteriors() {
            drawing.add_polyline(PARCELS_LAYER, exterior.clone(), true);

            if let (Some(lines), Some(centroid)) = (&label, vertex_centroid(exterior)) {
                drawing.add_text(LABELS_LAYER, centroid, options.label_height, lines.clone());
            }
        }
    }

    debug!(
        polylines = drawing.polylines().count(),
        labels = drawing.texts().count(),
        "Built drawing"
    );
    drawing
}

/// Unweighted mean of a ring's vertices.
///
/// Every vertex counts once, including a repeated closing vertex. This is not
/// the area centroid; it is used for label placement only.
pub fn vertex_centroid(ring: &[Point2]) -> Option<Point2> {
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let sum_x: f64 = ring.iter().map(|p| p.x).sum();
    let sum_y: f64 = ring.iter().map(|p| p.y).sum();
    Some(Point2::new(sum_x / n, sum_y / n))
}

fn label_lines(parcel: &Parcel, options: &DrawingOptions) -> Option<Vec<String>> {
    let id = parcel.attribute_text(&options.id_field);
    if id.is_empty() {
        return None;
    }
    let owner = parcel.attribute_text(&options.owner_field);
    Some(vec![format!("PIN: {}", id), format!("Owner: {}", owner)])
}
