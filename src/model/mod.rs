//! Data model types for cable labels.

mod primitive;
mod record;

pub use primitive::{
    Color, Layer, Point, Primitive, Rect, TextAlign, TextField, TextItem, LAYER_SPEC,
};
pub use record::{specification_parts, CableRecord, SpecificationParts};
