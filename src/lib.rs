//! cable-label - Generate laser-cut cable labels from cable schedules.
//!
//! Each cable record becomes one rectangular label with a cut outline, four
//! mounting holes and engraved text. Labels are written either one per DXF
//! file or packed into fixed-size grid sheets.
//!
//! # Example
//!
//! ```no_run
//! use cable_label::{parse_csv_file, pack, render_page, LayoutParameters};
//! use std::path::Path;
//!
//! let records = parse_csv_file(Path::new("schedule.csv")).unwrap();
//! let pages = pack(&records, &LayoutParameters::default()).unwrap();
//! for page in &pages {
//!     println!("{}", render_page(page));
//! }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod layout;
pub mod model;
pub mod output;
pub mod parser;

// Re-exports for convenience
pub use config::{LayoutParameters, RowOrder, TextHeights, TruncationLimits};
pub use error::{LabelError, Result};
pub use generator::{render_label, render_page};
pub use layout::{layout_label, pack, truncate, Page, PlacedLabel, Slot};
pub use model::{CableRecord, Layer, Primitive, LAYER_SPEC};
pub use output::{generate_files, OutputOptions};
pub use parser::{parse_csv_file, parse_csv_str};

/// Generate label files from a CSV cable schedule.
///
/// This is the main high-level function that performs the full pipeline:
/// 1. Parse the CSV file
/// 2. Lay out and pack the labels
/// 3. Write the DXF files
///
/// Returns the paths of the written files in generation order.
pub fn generate_from_csv(
    csv_path: &std::path::Path,
    params: &LayoutParameters,
    options: &OutputOptions,
) -> Result<Vec<std::path::PathBuf>> {
    let records = parse_csv_file(csv_path)?;
    tracing::info!("Found {} cable(s) in {}", records.len(), csv_path.display());
    generate_files(&records, params, options)
}
