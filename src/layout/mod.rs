//! Label layout and sheet packing.

mod label;
mod sheet;

pub use label::{hole_centers, layout_label, truncate, DESTINATION_PREFIX, ORIGIN_PREFIX};
pub use sheet::{pack, page_count, slot_for_index, slot_offset, Page, PlacedLabel, Slot};
