//! Route extraction from commented distance cells.
//!
//! A route matrix encodes distances as numeric cells whose comments name
//! the destination; the origin is named in a header cell a few rows above
//! in the same column.

use calamine::DataType;

use crate::matriz::tools::io::excel_read::{SheetGrid, cell_to_string};
use crate::matriz::tools::model::RouteRecord;
use crate::matriz::tools::normalize::{extract_number, normalize, second_segment};
use crate::matriz::tools::reference::PlaceList;

/// How many rows above a commented cell are searched for an origin header.
pub const ORIGIN_SCAN_ROWS: u32 = 5;

/// Walks every commented cell of the grid and assembles the sorted route
/// records.
///
/// A cell contributes records only when its value contains a number (the
/// distance in kilometres), an origin header is found above it, and the
/// processed comment names at least one place other than the origin. A
/// comment naming several such places fans out to one record per place.
/// Records sort ascending by (origin, destination); duplicates are kept.
pub fn extract_routes(grid: &SheetGrid, places: &PlaceList) -> Vec<RouteRecord> {
    let mut records = Vec::new();

    for cell in grid.commented_cells() {
        let Some(kilometers) = extract_number(&cell_to_string(Some(cell.value))) else {
            continue;
        };

        let comment = second_segment(cell.comment.trim());
        let mentioned = places.matches_in(&normalize(&comment));

        let Some(origin) = infer_origin(grid, cell.row, cell.col, places) else {
            continue;
        };

        for destination in mentioned.into_iter().filter(|place| *place != origin) {
            records.push(RouteRecord {
                origin: origin.to_string(),
                destination: destination.to_string(),
                kilometers,
                comment: comment.clone(),
                column: column_label(grid, cell.col),
            });
        }
    }

    records.sort_by(|lhs, rhs| {
        lhs.origin
            .cmp(&rhs.origin)
            .then_with(|| lhs.destination.cmp(&rhs.destination))
    });
    records
}

/// Scans up to [`ORIGIN_SCAN_ROWS`] rows above the cell, nearest first,
/// and returns the first reference place named in a header cell. Cells
/// that are non-empty but name no place do not stop the scan.
fn infer_origin<'a>(
    grid: &SheetGrid,
    row: u32,
    col: u32,
    places: &'a PlaceList,
) -> Option<&'a str> {
    let start = row.saturating_sub(ORIGIN_SCAN_ROWS);
    for header_row in (start..row).rev() {
        let Some(value) = grid.value(header_row, col) else {
            continue;
        };
        if matches!(value, DataType::Empty) {
            continue;
        }
        let header = normalize(&cell_to_string(Some(value)));
        if let Some(place) = places.matches_in(&header).into_iter().next() {
            return Some(place);
        }
    }
    None
}

/// First-row value of the column, or a synthesized `Columna N` label
/// (1-based) when the first row is blank there.
fn column_label(grid: &SheetGrid, col: u32) -> String {
    let header = cell_to_string(grid.value(0, col));
    if header.is_empty() {
        format!("Columna {}", col + 1)
    } else {
        header
    }
}
