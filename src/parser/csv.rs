//! Cable schedule CSV reader.
//!
//! Handles header detection, column-name normalisation, quoted fields and
//! the `ORIGIN:` / `DESTINATION:` prefixes some schedules carry in their
//! values. Rows without a cable id are skipped.

use crate::error::{LabelError, Result};
use crate::model::CableRecord;
use std::path::Path;
use tracing::{debug, warn};

/// Value prefixes stripped from origin/destination cells.
const ORIGIN_PREFIXES: [&str; 1] = ["ORIGIN:"];
const DESTINATION_PREFIXES: [&str; 2] = ["DESTINATION:", "DEST:"];

/// Column positions of the four record fields. `None` reads as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub id: Option<usize>,
    pub specification: Option<usize>,
    pub origin: Option<usize>,
    pub destination: Option<usize>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            id: Some(0),
            specification: Some(1),
            origin: Some(2),
            destination: Some(3),
        }
    }
}

impl ColumnMap {
    /// Build a column map from header names.
    ///
    /// Unrecognised fields fall back to their positional default unless a
    /// recognised field already claimed that column, in which case they
    /// stay unmapped.
    pub fn from_header(header: &[String]) -> Self {
        let mut slots: [Option<usize>; 4] = [None; 4];

        for (idx, name) in header.iter().enumerate() {
            if let Some(slot) = column_slot(name) {
                if slots[slot].is_none() {
                    slots[slot] = Some(idx);
                }
            }
        }

        let claimed = slots;
        for (slot, column) in slots.iter_mut().enumerate() {
            if column.is_none() && !claimed.contains(&Some(slot)) {
                *column = Some(slot);
            }
        }

        let [id, specification, origin, destination] = slots;
        Self {
            id,
            specification,
            origin,
            destination,
        }
    }
}

/// Lowercase and drop everything but letters and digits,
/// so `CABLE_ID`, `Cable ID` and `cable-id` all read `cableid`.
pub fn normalize_column_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Field slot (id, specification, origin, destination) a header name refers to.
fn column_slot(name: &str) -> Option<usize> {
    match normalize_column_name(name).as_str() {
        "cableid" | "cable" | "id" | "cabletag" | "tag" | "cableno" | "cablenumber" => Some(0),
        "specification" | "spec" | "cablespec" | "cablespecification" | "description" => {
            Some(1)
        }
        "origin" | "from" | "source" => Some(2),
        "destination" | "dest" | "to" => Some(3),
        _ => None,
    }
}

/// Word stems that mark a cell as a column title.
const HEADER_KEYWORDS: [&str; 4] = ["cable", "origin", "destination", "spec"];

/// Whether a cell reads like a column title: a known column name, or a
/// word starting with one of the header keywords (or the word `id`).
/// Cells with a `:` are labelled values such as `ORIGIN: MSB`, never titles.
fn is_header_cell(cell: &str) -> bool {
    if cell.contains(':') {
        return false;
    }
    if column_slot(cell).is_some() {
        return true;
    }
    cell.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .any(|word| word == "id" || HEADER_KEYWORDS.iter().any(|k| word.starts_with(k)))
}

/// Whether a row looks like a header rather than data.
fn is_header(row: &[String]) -> bool {
    row.iter().any(|cell| is_header_cell(cell))
}

/// Remove the first matching label prefix (case-insensitive) and trim.
fn strip_prefix<'a>(value: &'a str, prefixes: &[&str]) -> &'a str {
    let value = value.trim();
    for prefix in prefixes {
        if value.len() >= prefix.len()
            && value.is_char_boundary(prefix.len())
            && value[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return value[prefix.len()..].trim();
        }
    }
    value
}

/// Split CSV text into rows of fields, each tagged with its 1-based
/// starting line.
///
/// Quoted fields may hold commas, doubled quotes and line breaks. Rows
/// end at `\n` or `\r\n` outside quotes; blank rows are dropped.
pub fn split_csv_rows(content: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut quote_start = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
                quote_start = line;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                push_row(&mut rows, row_start, std::mem::take(&mut fields));
                line += 1;
                row_start = line;
            }
            _ => {
                if c == '\n' {
                    line += 1;
                }
                current.push(c);
            }
        }
    }

    if in_quotes {
        return Err(LabelError::ParseError {
            line: quote_start,
            message: "unterminated quoted field".to_string(),
        });
    }

    fields.push(current);
    push_row(&mut rows, row_start, fields);
    Ok(rows)
}

fn push_row(rows: &mut Vec<(usize, Vec<String>)>, line: usize, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        rows.push((line, fields));
    }
}

/// Decode file bytes: UTF-8 with optional BOM, falling back to Latin-1.
fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            debug!("Input is not valid UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

fn cell(row: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i))
        .map(|s| s.trim())
        .unwrap_or("")
        .to_string()
}

/// Parse cable records from CSV text.
pub fn parse_csv_str(content: &str) -> Result<Vec<CableRecord>> {
    let mut rows = split_csv_rows(content)?.into_iter();

    let Some((first_line, first_row)) = rows.next() else {
        return Ok(Vec::new());
    };

    let (columns, pending) = if is_header(&first_row) {
        let map = ColumnMap::from_header(&first_row);
        debug!("Header detected at line {}: {:?}", first_line, map);
        (map, None)
    } else {
        (ColumnMap::default(), Some((first_line, first_row)))
    };

    let mut records = Vec::new();
    for (line, row) in pending.into_iter().chain(rows) {
        if row.len() < 2 {
            warn!("Line {}: expected at least 2 columns, skipping", line);
            continue;
        }

        let id = cell(&row, columns.id);
        if id.is_empty() {
            warn!("Line {}: missing cable id, skipping", line);
            continue;
        }

        records.push(CableRecord {
            id,
            specification: cell(&row, columns.specification),
            origin: strip_prefix(&cell(&row, columns.origin), &ORIGIN_PREFIXES).to_string(),
            destination: strip_prefix(&cell(&row, columns.destination), &DESTINATION_PREFIXES)
                .to_string(),
        });
    }

    Ok(records)
}

/// Parse a cable schedule CSV file.
pub fn parse_csv_file(path: &Path) -> Result<Vec<CableRecord>> {
    if !path.exists() {
        return Err(LabelError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(LabelError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let records = parse_csv_str(&decode(&bytes))?;
    if records.is_empty() {
        return Err(LabelError::NoRecords);
    }
    Ok(records)
}
