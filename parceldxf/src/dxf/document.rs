//! In-memory drawing model.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::parcel::Point2;

use super::writer::DxfWriter;

/// AutoCAD Color Index values used by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AciColor(pub u8);

impl AciColor {
    pub const WHITE: AciColor = AciColor(7);
    pub const YELLOW: AciColor = AciColor(2);
    pub const CYAN: AciColor = AciColor(4);
}

/// A named drawing layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub color: AciColor,
}

/// Polyline through `vertices`, optionally closed back to the first vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub layer: String,
    pub vertices: Vec<Point2>,
    pub closed: bool,
}

/// Single- or multi-line text anchored at `insert`.
///
/// The first line sits on the insertion point; following lines stack
/// downward by [`Text::line_spacing`].
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub layer: String,
    pub insert: Point2,
    pub height: f64,
    pub lines: Vec<String>,
}

impl Text {
    /// Baseline-to-baseline distance, in drawing units.
    pub fn line_spacing(&self) -> f64 {
        self.height * 5.0 / 3.0
    }

    /// Insertion point of line `index`.
    pub fn line_insert(&self, index: usize) -> Point2 {
        Point2::new(
            self.insert.x,
            self.insert.y - self.line_spacing() * index as f64,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Polyline(Polyline),
    Text(Text),
}

impl Entity {
    pub fn layer(&self) -> &str {
        match self {
            Entity::Polyline(p) => &p.layer,
            Entity::Text(t) => &t.layer,
        }
    }
}

/// Ordered layers and entities of one DXF drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    layers: Vec<Layer>,
    entities: Vec<Entity>,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawing {
    /// Name of the layer every DXF drawing carries.
    pub const DEFAULT_LAYER: &'static str = "0";

    /// Creates a drawing containing only layer `0`.
    pub fn new() -> Self {
        Self {
            layers: vec![Layer {
                name: Self::DEFAULT_LAYER.to_string(),
                color: AciColor::WHITE,
            }],
            entities: Vec::new(),
        }
    }

    /// Adds a layer; an existing layer of the same name keeps its colour.
    pub fn add_layer(&mut self, name: &str, color: AciColor) {
        if !self.has_layer(name) {
            self.layers.push(Layer {
                name: name.to_string(),
                color,
            });
        }
    }

    /// Layer names compare case-insensitively, as in CAD applications.
    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.name.eq_ignore_ascii_case(name))
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn add_polyline(&mut self, layer: &str, vertices: Vec<Point2>, closed: bool) {
        self.entities.push(Entity::Polyline(Polyline {
            layer: layer.to_string(),
            vertices,
            closed,
        }));
    }

    pub fn add_text(&mut self, layer: &str, insert: Point2, height: f64, lines: Vec<String>) {
        self.entities.push(Entity::Text(Text {
            layer: layer.to_string(),
            insert,
            height,
            lines,
        }));
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Polyline(p) => Some(p),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Bounding corners of all polyline vertices and text insertion points.
    pub fn extents(&self) -> Option<(Point2, Point2)> {
        let points = self.entities.iter().flat_map(|e| match e {
            Entity::Polyline(p) => p.vertices.clone(),
            Entity::Text(t) => vec![t.insert],
        });

        points.fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((min, max)) => Some((
                Point2::new(min.x.min(p.x), min.y.min(p.y)),
                Point2::new(max.x.max(p.x), max.y.max(p.y)),
            )),
        })
    }

    /// Serializes the drawing as ASCII DXF.
    pub fn write_to<W: Write>(&self, out: W) -> io::Result<()> {
        DxfWriter::new(out).write_drawing(self)
    }

    /// Writes the drawing to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()
    }
}
