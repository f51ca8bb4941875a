//! Single label layout.
//!
//! Produces the primitives of one label in label-local coordinates: origin
//! at the lower-left corner of the outline, millimeters.

use crate::config::{float_cmp, LayoutParameters, TEXT_ROWS};
use crate::error::{LabelError, Result};
use crate::model::{CableRecord, Point, Primitive, Rect, TextAlign, TextField, TextItem};

/// Prefix rendered before the origin value.
pub const ORIGIN_PREFIX: &str = "FROM: ";

/// Prefix rendered before the destination value.
pub const DESTINATION_PREFIX: &str = "TO: ";

/// Horizontal clearance between a hole edge and left-aligned text.
const TEXT_CLEARANCE: f64 = 1.5;

const CABLE_ID_ROW: f64 = TEXT_ROWS[0].1;
const SPECIFICATION_ROW: f64 = TEXT_ROWS[1].1;
const ORIGIN_ROW: f64 = TEXT_ROWS[2].1;
const DESTINATION_ROW: f64 = TEXT_ROWS[3].1;

/// Cut `text` to at most `limit` characters, ending in `marker` when cut.
///
/// A hard character cutoff, not word-aware. The marker counts against the
/// limit, so the result of a truncation is never truncated again.
pub fn truncate(text: &str, limit: usize, marker: &str) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(marker.chars().count());
    let head: String = text.chars().take(keep).collect();
    format!("{}{}", head.trim_end(), marker)
}

/// Trim `text` and replace control characters (line breaks, tabs) with a
/// space so every field engraves as a single line.
fn clean_text(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    flat.trim().to_string()
}

/// Centers of the four mounting holes: lower-left, lower-right, upper-left, upper-right.
pub fn hole_centers(params: &LayoutParameters) -> [Point; 4] {
    let inset = params.hole_inset;
    let w = params.label_width;
    let h = params.label_height;
    [
        Point::new(inset, inset),
        Point::new(w - inset, inset),
        Point::new(inset, h - inset),
        Point::new(w - inset, h - inset),
    ]
}

/// Confirm the hole centers sit exactly one spacing apart on both axes.
fn verify_hole_spacing(centers: &[Point; 4], params: &LayoutParameters) -> Result<()> {
    let (spacing_x, spacing_y) = params.hole_spacing();
    let [ll, lr, ul, ur] = centers;
    let consistent = float_cmp::approx_eq(lr.x - ll.x, spacing_x)
        && float_cmp::approx_eq(ur.x - ul.x, spacing_x)
        && float_cmp::approx_eq(ul.y - ll.y, spacing_y)
        && float_cmp::approx_eq(ur.y - lr.y, spacing_y);
    if !consistent {
        return Err(LabelError::invalid_parameters(format!(
            "hole centers do not match spacing {} x {}",
            spacing_x, spacing_y
        )));
    }
    Ok(())
}

fn validate_record(record: &CableRecord) -> Result<()> {
    if record.id.trim().is_empty() {
        return Err(LabelError::InvalidRecord {
            record: None,
            field: "id",
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Lay out one label.
///
/// Emits, in order: the outline, the four holes, then text for the cable id,
/// specification, origin and destination. Text fields that are empty after
/// trimming are left out.
pub fn layout_label(record: &CableRecord, params: &LayoutParameters) -> Result<Vec<Primitive>> {
    params.validate_label()?;
    validate_record(record)?;

    let w = params.label_width;
    let h = params.label_height;
    let mut primitives = Vec::with_capacity(9);

    primitives.push(Primitive::Outline(Rect::new(
        Point::new(0.0, 0.0),
        Point::new(w, h),
    )));

    let centers = hole_centers(params);
    verify_hole_spacing(&centers, params)?;
    for center in centers {
        primitives.push(Primitive::Hole(Rect::centered(
            center,
            params.hole_width,
            params.hole_height,
        )));
    }

    let heights = &params.text_heights;
    let limits = &params.truncation;
    let left = (params.hole_inset + params.hole_width / 2.0 + TEXT_CLEARANCE).min(w / 2.0);

    let mut push_text = |field, anchor, height, align, content: String| {
        primitives.push(Primitive::Text(TextItem {
            field,
            anchor,
            height,
            align,
            content,
        }));
    };

    push_text(
        TextField::CableId,
        Point::new(w / 2.0, h * CABLE_ID_ROW),
        heights.cable_id,
        TextAlign::Center,
        clean_text(&record.id),
    );

    let specification = clean_text(&record.specification);
    if !specification.is_empty() {
        push_text(
            TextField::Specification,
            Point::new(w / 2.0, h * SPECIFICATION_ROW),
            heights.specification,
            TextAlign::Center,
            truncate(&specification, limits.specification, &limits.ellipsis),
        );
    }

    let origin = clean_text(&record.origin);
    if !origin.is_empty() {
        push_text(
            TextField::Origin,
            Point::new(left, h * ORIGIN_ROW),
            heights.location,
            TextAlign::Left,
            format!(
                "{}{}",
                ORIGIN_PREFIX,
                truncate(&origin, limits.location, &limits.ellipsis)
            ),
        );
    }

    let destination = clean_text(&record.destination);
    if !destination.is_empty() {
        push_text(
            TextField::Destination,
            Point::new(left, h * DESTINATION_ROW),
            heights.location,
            TextAlign::Left,
            format!(
                "{}{}",
                DESTINATION_PREFIX,
                truncate(&destination, limits.location, &limits.ellipsis)
            ),
        );
    }

    Ok(primitives)
}
