//! Configuration constants and layout parameters.

use crate::error::{LabelError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Default label width in mm.
pub const DEFAULT_LABEL_WIDTH: f64 = 80.0;

/// Default label height in mm.
pub const DEFAULT_LABEL_HEIGHT: f64 = 40.0;

/// Default mounting hole width in mm.
pub const DEFAULT_HOLE_WIDTH: f64 = 5.0;

/// Default mounting hole height in mm.
pub const DEFAULT_HOLE_HEIGHT: f64 = 2.5;

/// Default distance from a label corner to the nearest hole center.
pub const DEFAULT_HOLE_INSET: f64 = 5.0;

/// Default labels per sheet row.
pub const DEFAULT_COLUMNS: usize = 6;

/// Default label rows per sheet.
pub const DEFAULT_ROWS: usize = 7;

/// Default gap between neighbouring labels.
pub const DEFAULT_GAP: f64 = 2.0;

/// Default margin around the label grid.
pub const DEFAULT_SHEET_MARGIN: f64 = 2.0;

/// Default character limit for the specification line.
pub const DEFAULT_SPEC_MAX_CHARS: usize = 25;

/// Default character limit for origin/destination values.
pub const DEFAULT_LOCATION_MAX_CHARS: usize = 20;

/// Marker appended to truncated text.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Text rows as `(field, fraction of the label height)`, top to bottom.
///
/// Each row owns the band halfway to its neighbours; the top and bottom
/// rows extend to the label edge.
pub const TEXT_ROWS: [(&str, f64); 4] = [
    ("cable id", 0.75),
    ("specification", 0.5),
    ("origin", 0.3),
    ("destination", 0.15),
];

/// Vertical order in which grid rows are filled on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrder {
    /// Row 0 is the top row (reading order).
    #[default]
    TopToBottom,
    /// Row 0 is the bottom row.
    BottomToTop,
}

/// Text heights in mm for each label field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextHeights {
    pub cable_id: f64,
    pub specification: f64,
    pub location: f64,
}

impl Default for TextHeights {
    fn default() -> Self {
        Self {
            cable_id: 7.0,
            specification: 4.0,
            location: 3.5,
        }
    }
}

/// Hard character-count cutoffs for variable-length fields.
///
/// Limits include the ellipsis marker, so a truncated value never exceeds
/// its limit and truncating it again is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncationLimits {
    pub specification: usize,
    pub location: usize,
    pub ellipsis: String,
}

impl Default for TruncationLimits {
    fn default() -> Self {
        Self {
            specification: DEFAULT_SPEC_MAX_CHARS,
            location: DEFAULT_LOCATION_MAX_CHARS,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

/// Label, hole and sheet geometry. All lengths are millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
    pub label_width: f64,
    pub label_height: f64,
    pub hole_width: f64,
    pub hole_height: f64,
    /// Distance from each label corner to the nearest hole center.
    pub hole_inset: f64,
    pub columns: usize,
    pub rows: usize,
    pub column_gap: f64,
    pub row_gap: f64,
    pub sheet_margin: f64,
    pub row_order: RowOrder,
    pub text_heights: TextHeights,
    pub truncation: TruncationLimits,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            label_width: DEFAULT_LABEL_WIDTH,
            label_height: DEFAULT_LABEL_HEIGHT,
            hole_width: DEFAULT_HOLE_WIDTH,
            hole_height: DEFAULT_HOLE_HEIGHT,
            hole_inset: DEFAULT_HOLE_INSET,
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            column_gap: DEFAULT_GAP,
            row_gap: DEFAULT_GAP,
            sheet_margin: DEFAULT_SHEET_MARGIN,
            row_order: RowOrder::default(),
            text_heights: TextHeights::default(),
            truncation: TruncationLimits::default(),
        }
    }
}

impl LayoutParameters {
    /// Load parameters from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LabelError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse parameters from a JSON string. Missing keys keep their defaults.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(content)?;
        params.validate()?;
        Ok(params)
    }

    /// Hole center-to-center spacing `(x, y)`.
    ///
    /// Always derived from the label size and inset, never stored.
    pub fn hole_spacing(&self) -> (f64, f64) {
        (
            self.label_width - 2.0 * self.hole_inset,
            self.label_height - 2.0 * self.hole_inset,
        )
    }

    /// Number of label slots on one sheet.
    ///
    /// Saturates instead of overflowing; `validate` rejects such grids.
    pub fn labels_per_sheet(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    /// Overall sheet size `(width, height)` including margins.
    pub fn sheet_size(&self) -> (f64, f64) {
        let cols = self.columns as f64;
        let rows = self.rows as f64;
        let width = 2.0 * self.sheet_margin
            + cols * self.label_width
            + (cols - 1.0).max(0.0) * self.column_gap;
        let height = 2.0 * self.sheet_margin
            + rows * self.label_height
            + (rows - 1.0).max(0.0) * self.row_gap;
        (width, height)
    }

    /// Check that the label geometry is self-consistent.
    pub fn validate_label(&self) -> Result<()> {
        let positive = [
            ("label width", self.label_width),
            ("label height", self.label_height),
            ("hole width", self.hole_width),
            ("hole height", self.hole_height),
            ("hole inset", self.hole_inset),
            ("cable id text height", self.text_heights.cable_id),
            ("specification text height", self.text_heights.specification),
            ("location text height", self.text_heights.location),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LabelError::invalid_parameters(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if 2.0 * self.hole_inset >= self.label_width || 2.0 * self.hole_inset >= self.label_height
        {
            return Err(LabelError::invalid_parameters(format!(
                "hole inset {} is too large for a {} x {} label",
                self.hole_inset, self.label_width, self.label_height
            )));
        }

        if self.hole_inset <= self.hole_width / 2.0 || self.hole_inset <= self.hole_height / 2.0 {
            return Err(LabelError::invalid_parameters(format!(
                "{} x {} hole at inset {} would cut through the label outline",
                self.hole_width, self.hole_height, self.hole_inset
            )));
        }

        self.validate_text_heights()?;

        let marker_len = self.truncation.ellipsis.chars().count();
        for (name, limit) in [
            ("specification", self.truncation.specification),
            ("location", self.truncation.location),
        ] {
            if limit <= marker_len {
                return Err(LabelError::invalid_parameters(format!(
                    "{} character limit {} must exceed the ellipsis length {}",
                    name, limit, marker_len
                )));
            }
        }

        Ok(())
    }

    /// Check that the cable id is the tallest text and that every text row
    /// fits inside its band on the label.
    fn validate_text_heights(&self) -> Result<()> {
        let heights = &self.text_heights;
        if heights.cable_id <= heights.specification || heights.cable_id <= heights.location {
            return Err(LabelError::invalid_parameters(format!(
                "cable id text height {} must exceed specification {} and location {}",
                heights.cable_id, heights.specification, heights.location
            )));
        }

        let row_heights = [
            heights.cable_id,
            heights.specification,
            heights.location,
            heights.location,
        ];
        let h = self.label_height;
        for (i, ((name, row), text_height)) in TEXT_ROWS.iter().zip(row_heights).enumerate() {
            let top = match i {
                0 => 1.0,
                _ => (TEXT_ROWS[i - 1].1 + row) / 2.0,
            };
            let bottom = match TEXT_ROWS.get(i + 1) {
                Some((_, below)) => (row + below) / 2.0,
                None => 0.0,
            };
            let room = (top - row).min(row - bottom) * h * 2.0;
            if text_height > room + EPS {
                return Err(LabelError::invalid_parameters(format!(
                    "{} text height {} does not fit its {:.2}mm row on a {}mm label",
                    name, text_height, room, h
                )));
            }
        }

        Ok(())
    }

    /// Check the label geometry and the sheet grid.
    pub fn validate(&self) -> Result<()> {
        self.validate_label()?;

        if self.columns == 0 || self.rows == 0 {
            return Err(LabelError::invalid_parameters(format!(
                "sheet grid must have at least one slot, got {} x {}",
                self.columns, self.rows
            )));
        }

        if self.columns.checked_mul(self.rows).is_none() {
            return Err(LabelError::invalid_parameters(format!(
                "sheet grid {} x {} has too many slots",
                self.columns, self.rows
            )));
        }

        for (name, value) in [
            ("column gap", self.column_gap),
            ("row gap", self.row_gap),
            ("sheet margin", self.sheet_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LabelError::invalid_parameters(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a is in range [min, max] with epsilon tolerance.
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min - EPS && a <= max + EPS
    }
}
