//! DXF (Drawing Exchange Format) writer for label drawings.
//!
//! Writes ASCII DXF R12 (`AC1009`). Outlines and holes become closed
//! `POLYLINE` entities, text becomes `TEXT` entities with middle vertical
//! alignment. Coordinates are millimeters.
//!
//! The drawing declares the `ANSI_1252` code page and text is written as
//! plain ASCII: characters outside ASCII use the `\U+XXXX` escape so
//! R12 readers decode `²` and friends regardless of their locale.

use crate::layout::Page;
use crate::model::{Layer, Point, Primitive, Rect, TextAlign, TextItem, LAYER_SPEC};
use std::fmt::Write;

/// DXF writer for generating AutoCAD-compatible drawings.
pub struct DxfWriter {
    output: String,
}

impl Default for DxfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DxfWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Get the generated DXF content.
    pub fn into_string(self) -> String {
        self.output
    }

    /// Write a DXF group code and value. Codes are right-aligned in 3 columns.
    fn write_group(&mut self, code: i32, value: &str) {
        // Writing to a String cannot fail
        let _ = writeln!(self.output, "{:>3}", code);
        let _ = writeln!(self.output, "{}", value);
    }

    /// Write a DXF group code with integer value (right-aligned in 6 chars).
    fn write_group_int(&mut self, code: i32, value: i32) {
        self.write_group(code, &format!("{:>6}", value));
    }

    /// Write a coordinate group.
    fn write_group_coord(&mut self, code: i32, value: f64) {
        self.write_group(code, &format_coord(value));
    }

    /// Write a 2D point as x/y/z groups starting at `base` (10, 11, ...).
    fn write_point(&mut self, base: i32, point: Point) {
        self.write_group_coord(base, point.x);
        self.write_group_coord(base + 10, point.y);
        self.write_group(base + 20, "0.000");
    }

    /// Write the DXF header section with drawing extents.
    pub fn write_header(&mut self, min: Point, max: Point) {
        self.write_group(0, "SECTION");
        self.write_group(2, "HEADER");

        self.write_group(9, "$ACADVER");
        self.write_group(1, "AC1009");

        self.write_group(9, "$DWGCODEPAGE");
        self.write_group(3, "ANSI_1252");

        self.write_group(9, "$EXTMIN");
        self.write_point(10, min);

        self.write_group(9, "$EXTMAX");
        self.write_point(10, max);

        self.write_group(0, "ENDSEC");
    }

    /// Write the tables section with layer definitions.
    pub fn write_tables(&mut self, layers: &[(Layer, i32)]) {
        self.write_group(0, "SECTION");
        self.write_group(2, "TABLES");

        // Line type table
        self.write_group(0, "TABLE");
        self.write_group(2, "LTYPE");
        self.write_group_int(70, 1);

        self.write_group(0, "LTYPE");
        self.write_group(2, "CONTINUOUS");
        self.write_group_int(70, 64);
        self.write_group(3, "Solid line");
        self.write_group_int(72, 65);
        self.write_group_int(73, 0);
        self.write_group(40, "0.0");

        self.write_group(0, "ENDTAB");

        // Layer table
        self.write_group(0, "TABLE");
        self.write_group(2, "LAYER");
        self.write_group_int(70, layers.len() as i32);

        for (layer, color) in layers {
            self.write_layer(layer.name(), *color);
        }

        self.write_group(0, "ENDTAB");

        // Style table
        self.write_group(0, "TABLE");
        self.write_group(2, "STYLE");
        self.write_group_int(70, 1);
        self.write_group(0, "STYLE");
        self.write_group(2, "STANDARD");
        self.write_group_int(70, 0);
        self.write_group(40, "0.0");
        self.write_group(41, "1.0");
        self.write_group(50, "0.0");
        self.write_group_int(71, 0);
        self.write_group(42, "2.5");
        self.write_group(3, "txt");
        self.write_group(4, "");
        self.write_group(0, "ENDTAB");

        self.write_group(0, "ENDSEC");

        // Blocks section (empty)
        self.write_group(0, "SECTION");
        self.write_group(2, "BLOCKS");
        self.write_group(0, "ENDSEC");
    }

    /// Write a layer definition.
    fn write_layer(&mut self, name: &str, color: i32) {
        self.write_group(0, "LAYER");
        self.write_group(2, name);
        self.write_group_int(70, 0);
        self.write_group_int(62, color);
        self.write_group(6, "CONTINUOUS");
    }

    /// Begin the entities section.
    pub fn begin_entities(&mut self) {
        self.write_group(0, "SECTION");
        self.write_group(2, "ENTITIES");
    }

    /// End the entities section and write EOF.
    pub fn end_entities(&mut self) {
        self.write_group(0, "ENDSEC");
        self.write_group(0, "EOF");
    }

    /// Write a closed rectangular POLYLINE. Color is BYLAYER.
    pub fn write_rect_entity(&mut self, layer: &str, rect: &Rect) {
        self.write_group(0, "POLYLINE");
        self.write_group(8, layer);
        self.write_group_int(66, 1);
        self.write_point(10, Point::default());
        self.write_group_int(70, 1);

        for corner in rect.corners() {
            self.write_group(0, "VERTEX");
            self.write_group(8, layer);
            self.write_point(10, corner);
        }

        self.write_group(0, "SEQEND");
        self.write_group(8, layer);
    }

    /// Write a TEXT entity, vertically centered on its anchor.
    pub fn write_text_entity(&mut self, layer: &str, text: &TextItem) {
        let halign = match text.align {
            TextAlign::Left => 0,
            TextAlign::Center => 1,
        };

        self.write_group(0, "TEXT");
        self.write_group(8, layer);
        self.write_point(10, text.anchor);
        self.write_group_coord(40, text.height);
        self.write_group(1, &encode_text(&text.content));
        self.write_group(7, "STANDARD");
        self.write_group_int(72, halign);
        // Alignment point is used whenever 72/73 are not both zero
        self.write_point(11, text.anchor);
        self.write_group_int(73, 2);
    }

    /// Write one primitive on its layer.
    pub fn write_primitive(&mut self, primitive: &Primitive) {
        let layer = primitive.layer().name();
        match primitive {
            Primitive::Outline(rect) | Primitive::Hole(rect) => {
                self.write_rect_entity(layer, rect)
            }
            Primitive::Text(text) => self.write_text_entity(layer, text),
        }
    }
}

/// Format a coordinate value with 3 decimal places.
/// Uses "round half away from zero" rounding.
pub fn format_coord(value: f64) -> String {
    let scaled = value * 1000.0;
    let rounded = if scaled >= 0.0 {
        (scaled + 0.5).floor()
    } else {
        (scaled - 0.5).ceil()
    };
    // Avoid "-0.000"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.3}", rounded / 1000.0)
}

/// Encode a text value for a single DXF group line.
///
/// Control characters become a space so the value stays on one line, and
/// anything outside ASCII is written as a `\U+XXXX` escape.
pub fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.push(' ');
        } else if c.is_ascii() {
            out.push(c);
        } else if (c as u32) <= 0xFFFF {
            let _ = write!(out, "\\U+{:04X}", c as u32);
        } else {
            // Outside the BMP; R12 has no escape for these
            out.push('?');
        }
    }
    out
}

/// Layer table with AutoCAD color indices.
fn layer_table() -> Vec<(Layer, i32)> {
    LAYER_SPEC
        .iter()
        .map(|(layer, color)| (*layer, color.aci()))
        .collect()
}

/// Render primitives into a complete DXF document covering `(0,0)-(width,height)`.
pub fn render_primitives(primitives: &[Primitive], width: f64, height: f64) -> String {
    let mut dxf = DxfWriter::new();

    dxf.write_header(Point::new(0.0, 0.0), Point::new(width, height));
    dxf.write_tables(&layer_table());
    dxf.begin_entities();
    for primitive in primitives {
        dxf.write_primitive(primitive);
    }
    dxf.end_entities();

    dxf.into_string()
}

/// Render a single label laid out in label-local coordinates.
pub fn render_label(primitives: &[Primitive], label_width: f64, label_height: f64) -> String {
    render_primitives(primitives, label_width, label_height)
}

/// Render a packed page.
pub fn render_page(page: &Page) -> String {
    render_primitives(&page.primitives, page.width, page.height)
}
