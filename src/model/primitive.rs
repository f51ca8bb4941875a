//! Drawing primitives produced by the layout engines.

use serde::{Deserialize, Serialize};

/// Drawing layer. Downstream cutting/engraving tools separate operations by layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Label outline, cut through.
    Cutting,
    /// Mounting holes, cut through.
    Hole,
    /// Engraved/printed text.
    Text,
}

/// Display color of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Cyan,
    Blue,
}

impl Color {
    /// AutoCAD color index.
    pub fn aci(&self) -> i32 {
        match self {
            Color::Red => 1,
            Color::Cyan => 4,
            Color::Blue => 5,
        }
    }
}

/// Layer to color table shared by every output file.
pub const LAYER_SPEC: [(Layer, Color); 3] = [
    (Layer::Cutting, Color::Cyan),
    (Layer::Hole, Color::Red),
    (Layer::Text, Color::Blue),
];

impl Layer {
    /// Layer name as written to drawing files.
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Cutting => "Cutting",
            Layer::Hole => "Hole",
            Layer::Text => "Text",
        }
    }

    /// Color assigned to this layer in [`LAYER_SPEC`].
    pub fn color(&self) -> Color {
        match self {
            Layer::Cutting => Color::Cyan,
            Layer::Hole => Color::Red,
            Layer::Text => Color::Blue,
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A 2D point in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle given by its lower-left and upper-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self {
            min: Point::new(center.x - width / 2.0, center.y - height / 2.0),
            max: Point::new(center.x + width / 2.0, center.y + height / 2.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Corners in drawing order, counter-clockwise from the lower-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.min.translate(dx, dy), self.max.translate(dx, dy))
    }
}

/// Horizontal text alignment relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
}

/// Which record field a text primitive renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextField {
    CableId,
    Specification,
    Origin,
    Destination,
}

/// Single line of text, vertically centered on its anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub field: TextField,
    pub anchor: Point,
    pub height: f64,
    pub align: TextAlign,
    pub content: String,
}

/// A drawable shape. The layer is implied by the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Closed label outline.
    Outline(Rect),
    /// Rectangular mounting hole.
    Hole(Rect),
    /// Text line.
    Text(TextItem),
}

impl Primitive {
    pub fn layer(&self) -> Layer {
        match self {
            Primitive::Outline(_) => Layer::Cutting,
            Primitive::Hole(_) => Layer::Hole,
            Primitive::Text(_) => Layer::Text,
        }
    }

    /// Copy of this primitive moved by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        match self {
            Primitive::Outline(rect) => Primitive::Outline(rect.translate(dx, dy)),
            Primitive::Hole(rect) => Primitive::Hole(rect.translate(dx, dy)),
            Primitive::Text(text) => Primitive::Text(TextItem {
                anchor: text.anchor.translate(dx, dy),
                ..text.clone()
            }),
        }
    }

    pub fn is_outline(&self) -> bool {
        matches!(self, Primitive::Outline(_))
    }

    pub fn is_hole(&self) -> bool {
        matches!(self, Primitive::Hole(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Primitive::Text(_))
    }

    /// Text payload, if this is a text primitive.
    pub fn as_text(&self) -> Option<&TextItem> {
        match self {
            Primitive::Text(text) => Some(text),
            _ => None,
        }
    }
}
