use serde::{Deserialize, Serialize};

/// One inferred route: a distance attached to a spreadsheet cell, read
/// together with the origin named in the column headers above it and a
/// destination named in the cell comment.
///
/// The serialized field names keep the wire format of the route matrix
/// extracts consumed downstream, which is Spanish-keyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Canonical place name inferred from the nearest column header.
    #[serde(rename = "origen")]
    pub origin: String,
    /// Canonical place name matched inside the cell comment.
    #[serde(rename = "destino")]
    pub destination: String,
    /// Distance in kilometres extracted from the cell value.
    #[serde(rename = "kilometraje")]
    pub kilometers: f64,
    /// The processed comment segment the destination was matched in.
    #[serde(rename = "comentario")]
    pub comment: String,
    /// Label of the column the cell sits in (first-row value, or a
    /// synthesized `Columna N` when the first row is blank).
    #[serde(rename = "columna")]
    pub column: String,
}

/// Outcome of one extraction run, surfaced to the caller so an empty
/// result can be told apart from both success-with-data and failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Number of records written to the output file.
    pub records: usize,
    /// Number of sheets that contributed to the output.
    pub sheets: usize,
}

impl ExtractSummary {
    /// True when the run produced no records at all.
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }
}
