//! Cable schedule record.

use serde::{Deserialize, Serialize};

/// One row of a cable schedule.
///
/// Plain data: produced by the CSV reader, read-only afterwards. Validation
/// happens when the record is laid out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CableRecord {
    /// Cable identifier (required).
    pub id: String,
    /// Cable specification, e.g. `500mm² 110 XLPE CU FLEX 20-OF`.
    pub specification: String,
    /// Where the cable starts.
    pub origin: String,
    /// Where the cable ends.
    pub destination: String,
}

impl CableRecord {
    /// Create a new record.
    pub fn new(
        id: impl Into<String>,
        specification: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            specification: specification.into(),
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

/// Conductor size and cable type split out of a specification string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecificationParts<'a> {
    /// Leading size token such as `500mm²`, empty if absent.
    pub size: &'a str,
    /// Remaining tokens such as `110 XLPE CU FLEX 20-OF`.
    pub cable_type: String,
}

/// Split a specification into conductor size and cable type.
///
/// The first token is the size only when it mentions `mm`; the type is
/// always everything after the first token.
pub fn specification_parts(specification: &str) -> SpecificationParts<'_> {
    let mut tokens = specification.split_whitespace();
    let Some(first) = tokens.next() else {
        return SpecificationParts::default();
    };
    SpecificationParts {
        size: if first.contains("mm") { first } else { "" },
        cable_type: tokens.collect::<Vec<_>>().join(" "),
    }
}
