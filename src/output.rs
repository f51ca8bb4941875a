//! Output file naming and writing.

use crate::config::LayoutParameters;
use crate::error::{LabelError, Result};
use crate::generator::{render_label, render_page};
use crate::layout::{layout_label, pack};
use crate::model::CableRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which files to generate and where.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub output_dir: PathBuf,
    /// One DXF file per cable.
    pub individual: bool,
    /// Cables packed into sheet files.
    pub combined: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            individual: false,
            combined: true,
        }
    }
}

/// File name for a single-label drawing.
///
/// Characters that cannot appear in file names are replaced with `_`.
pub fn individual_file_name(cable_id: &str) -> String {
    let safe: String = cable_id
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("cable_{}.dxf", safe)
}

/// File name for the `number`-th (1-based) sheet.
pub fn sheet_file_name(number: usize) -> String {
    format!("cable_labels_sheet_{:02}.dxf", number)
}

/// Lay out and render every requested file, returning `(file name, content)`.
///
/// Nothing is returned if any record fails validation. The sheet grid is
/// only checked when combined sheets are requested.
pub fn render_files(
    records: &[CableRecord],
    params: &LayoutParameters,
    options: &OutputOptions,
) -> Result<Vec<(String, String)>> {
    let mut files = Vec::new();

    if options.individual {
        params.validate_label()?;
        for (idx, record) in records.iter().enumerate() {
            let primitives = layout_label(record, params).map_err(|e| e.at_record(idx))?;
            files.push((
                individual_file_name(&record.id),
                render_label(&primitives, params.label_width, params.label_height),
            ));
        }
        debug!("Rendered {} individual label(s)", records.len());
    }

    if options.combined {
        let pages = pack(records, params)?;
        let (width, height) = params.sheet_size();
        info!(
            "Sheet {:.0}mm x {:.0}mm, {} x {} labels",
            width, height, params.columns, params.rows
        );
        for page in &pages {
            info!("Sheet {}: {} label(s)", page.number, page.label_count());
            files.push((sheet_file_name(page.number), render_page(page)));
        }
    }

    Ok(files)
}

/// Generate all requested DXF files under `options.output_dir`.
///
/// Layout runs to completion before anything is written, so a validation
/// failure leaves the output directory untouched.
pub fn generate_files(
    records: &[CableRecord],
    params: &LayoutParameters,
    options: &OutputOptions,
) -> Result<Vec<PathBuf>> {
    if records.is_empty() {
        return Err(LabelError::NoRecords);
    }

    let files = render_files(records, params, options)?;
    write_files(&options.output_dir, &files)
}

fn write_files(dir: &Path, files: &[(String, String)]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        std::fs::write(&path, content)?;
        debug!("Wrote {}", path.display());
        paths.push(path);
    }
    Ok(paths)
}
