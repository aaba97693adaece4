use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};

use crate::matriz::tools::error::{Result, ToolError};
use crate::matriz::tools::io::comments::{self, CommentMap};

static EMPTY_CELL: DataType = DataType::Empty;

/// One sheet's cell values coupled with its cell comments.
///
/// Coordinates are 0-based and absolute, so comment positions read from
/// the workbook archive line up with the value range.
pub struct SheetGrid {
    name: String,
    range: Range<DataType>,
    comments: CommentMap,
}

/// A single cell carrying both a value and a comment, as yielded by
/// [`SheetGrid::commented_cells`].
pub struct CommentedCell<'a> {
    pub row: u32,
    pub col: u32,
    pub value: &'a DataType,
    pub comment: &'a str,
}

impl SheetGrid {
    /// Name of the sheet this grid was read from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of commented cells on the sheet.
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Value at the given absolute (row, column), when inside the used
    /// range.
    pub fn value(&self, row: u32, col: u32) -> Option<&DataType> {
        self.range.get_value((row, col))
    }

    /// Lazy sequence of (row, column, value, comment) tuples in row-major
    /// order, decoupling sheet traversal from the matching logic layered
    /// on top. Commented cells outside the value range yield an empty
    /// value.
    pub fn commented_cells(&self) -> impl Iterator<Item = CommentedCell<'_>> {
        let mut cells: Vec<(&(u32, u32), &String)> = self.comments.iter().collect();
        cells.sort_unstable_by_key(|(coord, _)| **coord);
        cells.into_iter().map(|(&(row, col), comment)| CommentedCell {
            row,
            col,
            value: self.range.get_value((row, col)).unwrap_or(&EMPTY_CELL),
            comment,
        })
    }
}

/// Reads one sheet's values and comments. `sheet` selects by name; the
/// workbook's first sheet is used when it is `None`.
pub fn read_grid(path: &Path, sheet: Option<&str>) -> Result<SheetGrid> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let name = select_sheet(&workbook, sheet)?;
    let range = read_required_sheet(&mut workbook, &name)?;

    let mut workbook_comments = comments::read_comments(path)?;
    let comments = workbook_comments.remove(&name).unwrap_or_default();

    Ok(SheetGrid {
        name,
        range,
        comments,
    })
}

/// Reads one sheet's value range, selected like [`read_grid`].
pub fn read_range(path: &Path, sheet: Option<&str>) -> Result<(String, Range<DataType>)> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let name = select_sheet(&workbook, sheet)?;
    let range = read_required_sheet(&mut workbook, &name)?;
    Ok((name, range))
}

/// Reads every sheet's value range in workbook order.
pub fn read_all_ranges(path: &Path) -> Result<Vec<(String, Range<DataType>)>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let names: Vec<String> = workbook.sheet_names().to_vec();

    let mut ranges = Vec::with_capacity(names.len());
    for name in names {
        let range = read_required_sheet(&mut workbook, &name)?;
        ranges.push((name, range));
    }
    Ok(ranges)
}

fn select_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &Xlsx<R>,
    requested: Option<&str>,
) -> Result<String> {
    let names = workbook.sheet_names();
    match requested {
        Some(name) => names
            .iter()
            .find(|candidate| candidate.as_str() == name)
            .cloned()
            .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'"))),
        None => names
            .first()
            .cloned()
            .ok_or_else(|| ToolError::InvalidWorkbook("workbook has no sheets".to_string())),
    }
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

/// Renders a cell value the way it reads in the spreadsheet; `None` and
/// empty cells become the empty string.
pub fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
