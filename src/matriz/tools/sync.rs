use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, instrument};

use crate::matriz::tools::error::Result;
use crate::matriz::tools::io::excel_read;
use crate::matriz::tools::model::ExtractSummary;
use crate::matriz::tools::reference::PlaceList;
use crate::matriz::tools::routes;
use crate::matriz::tools::tabular::{self, BlankCells};

/// Analyses one sheet's cell comments and writes the sorted route records
/// as a JSON array.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn routes_to_json(
    input: &Path,
    output: &Path,
    sheet: Option<&str>,
    places: &PlaceList,
) -> Result<ExtractSummary> {
    let grid = excel_read::read_grid(input, sheet)?;
    debug!(
        sheet = grid.name(),
        commented_cells = grid.comment_count(),
        places = places.len(),
        "sheet loaded"
    );
    let records = routes::extract_routes(&grid, places);
    info!(record_count = records.len(), "routes extracted from cell comments");
    write_pretty_json(output, &records)?;
    Ok(ExtractSummary {
        records: records.len(),
        sheets: 1,
    })
}

/// Converts one sheet into a JSON array of row records.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn sheet_to_json(input: &Path, output: &Path, sheet: Option<&str>) -> Result<ExtractSummary> {
    let (name, range) = excel_read::read_range(input, sheet)?;
    let records = tabular::sheet_to_records(&range, BlankCells::Null, false);
    info!(sheet = %name, record_count = records.len(), "sheet flattened to records");
    write_pretty_json(output, &records)?;
    Ok(ExtractSummary {
        records: records.len(),
        sheets: 1,
    })
}

/// Flattens every sheet of the workbook into one JSON array and writes it
/// to a plain-text file. Fully-empty rows are dropped and blank cells
/// render as empty strings.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn workbook_to_text(input: &Path, output: &Path) -> Result<ExtractSummary> {
    let sheets = excel_read::read_all_ranges(input)?;
    let sheet_count = sheets.len();

    let mut records = Vec::new();
    for (name, range) in &sheets {
        let mut sheet_records = tabular::sheet_to_records(range, BlankCells::EmptyString, true);
        debug!(sheet = %name, record_count = sheet_records.len(), "sheet flattened");
        records.append(&mut sheet_records);
    }
    info!(
        record_count = records.len(),
        sheet_count, "workbook flattened to text dump"
    );
    write_pretty_json(output, &records)?;
    Ok(ExtractSummary {
        records: records.len(),
        sheets: sheet_count,
    })
}

/// Serialises the value as UTF-8 JSON with 4-space indentation, truncating
/// any existing file at the output path. Non-ASCII text is written as-is.
fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}
