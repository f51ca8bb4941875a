//! Sheet packing: tiles labels into fixed-size grid pages.

use crate::config::{LayoutParameters, RowOrder};
use crate::error::Result;
use crate::model::{CableRecord, Point, Primitive};
use serde::Serialize;

use super::label::layout_label;

/// Grid position of a label on its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub column: usize,
    pub row: usize,
}

/// A label placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLabel {
    /// Index of the source record in the packed input.
    pub record_index: usize,
    pub slot: Slot,
    /// Lower-left corner of the label in sheet coordinates.
    pub offset: Point,
    /// Number of primitives this label contributed.
    pub primitive_count: usize,
}

/// One output sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    /// Sheet extent, margins included.
    pub width: f64,
    pub height: f64,
    /// Labels in slot order.
    pub labels: Vec<PlacedLabel>,
    /// All primitives of the page in sheet coordinates, label by label.
    pub primitives: Vec<Primitive>,
}

impl Page {
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}

/// Number of pages needed for `record_count` labels.
///
/// An empty grid is treated as one slot per page.
pub fn page_count(record_count: usize, params: &LayoutParameters) -> usize {
    record_count.div_ceil(params.labels_per_sheet().max(1))
}

/// Grid slot for the `index`-th label of a page (row-major).
pub fn slot_for_index(index: usize, params: &LayoutParameters) -> Slot {
    Slot {
        column: index % params.columns,
        row: index / params.columns,
    }
}

/// Lower-left corner of a slot in sheet coordinates.
pub fn slot_offset(slot: Slot, params: &LayoutParameters) -> Point {
    let x = params.sheet_margin + slot.column as f64 * (params.label_width + params.column_gap);
    let grid_row = match params.row_order {
        RowOrder::TopToBottom => params.rows - 1 - slot.row,
        RowOrder::BottomToTop => slot.row,
    };
    let y = params.sheet_margin + grid_row as f64 * (params.label_height + params.row_gap);
    Point::new(x, y)
}

/// Pack records into pages of `columns x rows` labels.
///
/// The last page may be partially filled and is never padded. Fails on the
/// first invalid record, reporting its index; no pages are returned then.
pub fn pack(records: &[CableRecord], params: &LayoutParameters) -> Result<Vec<Page>> {
    params.validate()?;

    let per_page = params.labels_per_sheet();
    let (width, height) = params.sheet_size();
    let mut pages = Vec::with_capacity(page_count(records.len(), params));

    for (page_idx, chunk) in records.chunks(per_page).enumerate() {
        let mut page = Page {
            number: page_idx + 1,
            width,
            height,
            labels: Vec::with_capacity(chunk.len()),
            primitives: Vec::new(),
        };

        for (slot_idx, record) in chunk.iter().enumerate() {
            let record_index = page_idx * per_page + slot_idx;
            let slot = slot_for_index(slot_idx, params);
            let offset = slot_offset(slot, params);

            let label = layout_label(record, params).map_err(|e| e.at_record(record_index))?;
            page.primitives
                .extend(label.iter().map(|p| p.translate(offset.x, offset.y)));
            page.labels.push(PlacedLabel {
                record_index,
                slot,
                offset,
                primitive_count: label.len(),
            });
        }

        tracing::debug!(
            "Page {}: {} label(s), {} primitive(s)",
            page.number,
            page.label_count(),
            page.primitives.len()
        );
        pages.push(page);
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;
    use crate::error::LabelError;
    use crate::model::Rect;

    fn records(n: usize) -> Vec<CableRecord> {
        (0..n)
            .map(|i| CableRecord::new(format!("C-{:03}", i + 1), "4mm² 2C", "MSB", "DB-1"))
            .collect()
    }

    // ==================== Pagination tests ====================

    #[test]
    fn test_pack_empty_input() {
        let pages = pack(&[], &LayoutParameters::default()).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_pack_full_sheet() {
        let params = LayoutParameters::default();
        let pages = pack(&records(42), &params).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].label_count(), 42);

        let last = pages[0].labels.last().unwrap();
        assert_eq!(last.record_index, 41);
        assert_eq!(last.slot, Slot { column: 5, row: 6 });
    }

    #[test]
    fn test_pack_one_over_full_sheet() {
        let params = LayoutParameters::default();
        let pages = pack(&records(43), &params).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[1].label_count(), 1);
        assert_eq!(pages[1].labels[0].slot, Slot { column: 0, row: 0 });
        assert_eq!(pages[1].labels[0].record_index, 42);
    }

    #[test]
    fn test_pack_totals() {
        let params = LayoutParameters {
            columns: 3,
            rows: 2,
            ..Default::default()
        };
        for n in [0, 1, 5, 6, 7, 12, 13, 100] {
            let pages = pack(&records(n), &params).unwrap();
            assert_eq!(pages.len(), n.div_ceil(6));
            assert_eq!(pages.len(), page_count(n, &params));
            assert_eq!(pages.iter().map(Page::label_count).sum::<usize>(), n);
            if n > 0 && n % 6 == 0 {
                assert!(pages.iter().all(|p| p.label_count() == 6));
            }
        }
    }

    #[test]
    fn test_pack_primitive_count_per_page() {
        let mut input = records(3);
        input[1] = CableRecord::new("C-SPARE", "", "", "");
        let pages = pack(&input, &LayoutParameters::default()).unwrap();
        let counts: Vec<usize> = pages[0].labels.iter().map(|l| l.primitive_count).collect();
        assert_eq!(counts, vec![9, 6, 9]);
        assert_eq!(pages[0].primitives.len(), 24);
    }

    // ==================== Placement tests ====================

    #[test]
    fn test_slot_offset_top_to_bottom() {
        let params = LayoutParameters::default();
        let first = slot_offset(Slot { column: 0, row: 0 }, &params);
        assert!(approx_eq(first.x, 2.0));
        // Row 0 sits at the top: margin + 6 * (40 + 2)
        assert!(approx_eq(first.y, 254.0));

        let last = slot_offset(Slot { column: 5, row: 6 }, &params);
        assert!(approx_eq(last.x, 2.0 + 5.0 * 82.0));
        assert!(approx_eq(last.y, 2.0));
    }

    #[test]
    fn test_slot_offset_bottom_to_top() {
        let params = LayoutParameters {
            row_order: RowOrder::BottomToTop,
            ..Default::default()
        };
        let first = slot_offset(Slot { column: 0, row: 0 }, &params);
        assert!(approx_eq(first.y, 2.0));
        let upper = slot_offset(Slot { column: 1, row: 6 }, &params);
        assert!(approx_eq(upper.x, 84.0));
        assert!(approx_eq(upper.y, 254.0));
    }

    #[test]
    fn test_pack_translates_primitives() {
        let params = LayoutParameters::default();
        let pages = pack(&records(2), &params).unwrap();
        let page = &pages[0];
        let second = &page.labels[1];
        let outline = &page.primitives[page.labels[0].primitive_count];
        assert_eq!(
            *outline,
            Primitive::Outline(Rect::new(
                second.offset,
                Point::new(second.offset.x + 80.0, second.offset.y + 40.0)
            ))
        );
        assert!(approx_eq(second.offset.x, 84.0));
    }

    #[test]
    fn test_labels_stay_on_sheet() {
        let params = LayoutParameters::default();
        let pages = pack(&records(42), &params).unwrap();
        let page = &pages[0];
        for p in &page.primitives {
            if let Primitive::Outline(rect) = p {
                assert!(rect.min.x >= 0.0 && rect.min.y >= 0.0);
                assert!(rect.max.x <= page.width + 1e-9);
                assert!(rect.max.y <= page.height + 1e-9);
            }
        }
    }

    #[test]
    fn test_pack_is_deterministic() {
        let params = LayoutParameters::default();
        let input = records(50);
        let a = pack(&input, &params).unwrap();
        let b = pack(&input, &params).unwrap();
        assert_eq!(a, b);
    }

    // ==================== Error tests ====================

    #[test]
    fn test_pack_reports_failing_record_index() {
        let mut input = records(45);
        input[43] = CableRecord::new("", "spec", "a", "b");
        let err = pack(&input, &LayoutParameters::default()).unwrap_err();
        assert!(matches!(
            err,
            LabelError::InvalidRecord {
                record: Some(43),
                field: "id",
                ..
            }
        ));
    }

    #[test]
    fn test_pack_rejects_invalid_parameters() {
        let params = LayoutParameters {
            rows: 0,
            ..Default::default()
        };
        let err = pack(&records(1), &params).unwrap_err();
        assert!(matches!(err, LabelError::InvalidParameters { .. }));
    }

    #[test]
    fn test_pack_rejects_overflowing_grid() {
        let params = LayoutParameters {
            columns: usize::MAX / 2 + 1,
            rows: 2,
            ..Default::default()
        };
        assert_eq!(page_count(10, &params), 1);
        let err = pack(&records(3), &params).unwrap_err();
        assert!(matches!(err, LabelError::InvalidParameters { .. }));

        let empty = LayoutParameters {
            columns: 0,
            ..Default::default()
        };
        assert_eq!(page_count(3, &empty), 3);
    }
}
