//! Drawing file generation.

mod dxf;

pub use dxf::{encode_text, format_coord, render_label, render_page, render_primitives, DxfWriter};
