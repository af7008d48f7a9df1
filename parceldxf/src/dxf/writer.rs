//! ASCII DXF serialization (AutoCAD R12, `AC1009`).
//!
//! R12 is the most widely readable DXF flavour and needs no object handles.
//! Polylines are written as `POLYLINE`/`VERTEX`/`SEQEND` sequences and each
//! text line as its own `TEXT` entity, since R12 `TEXT` is single-line.

use std::io::{self, Write};

use super::document::{Drawing, Entity, Layer, Polyline, Text};

/// Linetype referenced by every layer.
const CONTINUOUS: &str = "CONTINUOUS";

/// Writes group-code/value pairs to an underlying stream.
pub struct DxfWriter<W: Write> {
    out: W,
}

impl<W: Write> DxfWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes a complete drawing, `EOF` marker included.
    pub fn write_drawing(&mut self, drawing: &Drawing) -> io::Result<()> {
        self.write_header(drawing)?;
        self.write_tables(drawing)?;
        self.write_entities(drawing)?;
        self.pair(0, "EOF")
    }

    fn write_header(&mut self, drawing: &Drawing) -> io::Result<()> {
        self.section("HEADER")?;
        self.pair(9, "$ACADVER")?;
        self.pair(1, "AC1009")?;
        if let Some((min, max)) = drawing.extents() {
            self.pair(9, "$EXTMIN")?;
            self.point(min.x, min.y)?;
            self.pair(9, "$EXTMAX")?;
            self.point(max.x, max.y)?;
        }
        self.end_section()
    }

    fn write_tables(&mut self, drawing: &Drawing) -> io::Result<()> {
        self.section("TABLES")?;

        self.pair(0, "TABLE")?;
        self.pair(2, "LTYPE")?;
        self.pair(70, 1)?;
        self.pair(0, "LTYPE")?;
        self.pair(2, CONTINUOUS)?;
        self.pair(70, 0)?;
        self.pair(3, "Solid line")?;
        self.pair(72, 65)?;
        self.pair(73, 0)?;
        self.pair(40, 0.0)?;
        self.pair(0, "ENDTAB")?;

        self.pair(0, "TABLE")?;
        self.pair(2, "LAYER")?;
        self.pair(70, drawing.layers().len())?;
        for layer in drawing.layers() {
            self.write_layer(layer)?;
        }
        self.pair(0, "ENDTAB")?;

        self.end_section()
    }

    fn write_layer(&mut self, layer: &Layer) -> io::Result<()> {
        self.pair(0, "LAYER")?;
        self.pair(2, sanitize(&layer.name))?;
        self.pair(70, 0)?;
        self.pair(62, layer.color.0)?;
        self.pair(6, CONTINUOUS)
    }

    fn write_entities(&mut self, drawing: &Drawing) -> io::Result<()> {
        self.section("ENTITIES")?;
        for entity in drawing.entities() {
            match entity {
                Entity::Polyline(polyline) => self.write_polyline(polyline)?,
                Entity::Text(text) => self.write_text(text)?,
            }
        }
        self.end_section()
    }

    fn write_polyline(&mut self, polyline: &Polyline) -> io::Result<()> {
        let layer = sanitize(&polyline.layer);

        self.pair(0, "POLYLINE")?;
        self.pair(8, &layer)?;
        // vertices-follow flag
        self.pair(66, 1)?;
        self.point(0.0, 0.0)?;
        self.pair(70, if polyline.closed { 1 } else { 0 })?;

        for vertex in &polyline.vertices {
            self.pair(0, "VERTEX")?;
            self.pair(8, &layer)?;
            self.point(vertex.x, vertex.y)?;
        }

        self.pair(0, "SEQEND")?;
        self.pair(8, &layer)
    }

    fn write_text(&mut self, text: &Text) -> io::Result<()> {
        let layer = sanitize(&text.layer);
        for (index, line) in text.lines.iter().enumerate() {
            let insert = text.line_insert(index);
            self.pair(0, "TEXT")?;
            self.pair(8, &layer)?;
            self.point(insert.x, insert.y)?;
            self.pair(40, text.height)?;
            self.pair(1, sanitize(line))?;
        }
        Ok(())
    }

    fn section(&mut self, name: &str) -> io::Result<()> {
        self.pair(0, "SECTION")?;
        self.pair(2, name)
    }

    fn end_section(&mut self) -> io::Result<()> {
        self.pair(0, "ENDSEC")
    }

    fn point(&mut self, x: f64, y: f64) -> io::Result<()> {
        self.pair(10, x)?;
        self.pair(20, y)?;
        self.pair(30, 0.0)
    }

    fn pair(&mut self, code: u16, value: impl std::fmt::Display) -> io::Result<()> {
        write!(self.out, "{:>3}\n{}\n", code, value)
    }
}

/// Replaces characters that would break the line-oriented format.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
