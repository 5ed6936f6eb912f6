//! Cell content and the grids returned by bulk range reads

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display prefixes of spreadsheet error values. A displayed value starting
/// with one of these marks the cell as broken (a `#REF!` from a deleted row,
/// a `#DIV/0!` from an empty denominator, and so on).
pub const ERROR_MARKERS: [&str; 8] = [
    "#REF!", "#VALUE!", "#NAME?", "#DIV/0!", "#N/A", "#NULL!", "#NUM!", "#ERROR!",
];

/// Content of a single cell as returned by a range read
///
/// A values read yields the displayed form; a formulas read yields formula
/// text (leading `=`) for formula cells and the literal content otherwise.
/// Content is opaque here: nothing in this crate parses or evaluates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// No content (JSON `null`, or a position past the end of a short row)
    Empty,
    /// Boolean display value
    Bool(bool),
    /// Numeric display value
    Number(f64),
    /// Text content: a display string, formula text, or an error marker
    Text(String),
}

impl Cell {
    /// Text cell from anything string-like
    pub fn text<S: Into<String>>(s: S) -> Self {
        Cell::Text(s.into())
    }

    /// True for [`Cell::Empty`] and for empty text
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// True when the cell holds anything at all, including `0` and `FALSE`
    pub fn has_content(&self) -> bool {
        !self.is_empty()
    }

    /// Text content, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number cell
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True when the content is formula text (starts with `=`)
    pub fn is_formula(&self) -> bool {
        matches!(self, Cell::Text(s) if s.starts_with('='))
    }

    /// Formula text including the leading `=`, if this is a formula cell
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) if s.starts_with('=') => Some(s),
            _ => None,
        }
    }

    /// Displayed form: empty string for [`Cell::Empty`], spreadsheet-style
    /// `TRUE`/`FALSE` for booleans
    pub fn to_display(&self) -> String {
        self.to_string()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Bool(true) => write!(f, "TRUE"),
            Cell::Bool(false) => write!(f, "FALSE"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

static EMPTY: Cell = Cell::Empty;

/// Rows of cells as returned by a bulk read
///
/// Grids are ragged: sources trim trailing empty cells from each row and
/// trailing empty rows from the result, so positional access treats anything
/// out of range as empty rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Empty grid
    pub fn new() -> Self {
        Grid::default()
    }

    /// Grid from pre-built rows, kept as given (possibly ragged)
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Grid { rows }
    }

    /// Number of rows actually present
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Widest row actually present
    pub fn column_count(&self) -> u32 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }

    /// True when no rows are present
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows as stored
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// One row; out-of-range rows read as empty
    pub fn row(&self, row: u32) -> &[Cell] {
        self.rows.get(row as usize).map_or(&[], Vec::as_slice)
    }

    /// One cell; positions past a row's end or past the last row read as
    /// [`Cell::Empty`]
    pub fn cell(&self, row: u32, col: u32) -> &Cell {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .unwrap_or(&EMPTY)
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Set one cell, growing the grid with empties as needed
    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        let row = row as usize;
        let col = col as usize;
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let r = &mut self.rows[row];
        if r.len() <= col {
            r.resize(col + 1, Cell::Empty);
        }
        r[col] = cell;
    }

    /// Empty every stored cell inside the inclusive region. Positions the
    /// grid never materialized are already empty and stay untouched.
    pub fn clear_region(&mut self, row0: u32, row1: u32, col0: u32, col1: u32) {
        let lo = row0 as usize;
        let hi = (row1 as usize).min(self.rows.len().saturating_sub(1));
        for row in self.rows.iter_mut().take(hi + 1).skip(lo) {
            let c_lo = (col0 as usize).min(row.len());
            let c_hi = ((col1 as usize) + 1).min(row.len());
            for cell in &mut row[c_lo..c_hi] {
                *cell = Cell::Empty;
            }
        }
    }

    /// Iterate rows
    pub fn iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl From<Vec<Vec<Cell>>> for Grid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Grid::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_and_blank_text_have_no_content() {
        assert!(Cell::Empty.is_empty());
        assert!(Cell::text("").is_empty());
        assert!(Cell::text("x").has_content());
        assert!(Cell::Number(0.0).has_content());
        assert!(Cell::Bool(false).has_content());
    }

    #[test]
    fn formula_detection_requires_leading_equals() {
        assert!(Cell::text("=SUM(B2:B10)").is_formula());
        assert!(!Cell::text("SUM(B2:B10)").is_formula());
        assert!(!Cell::Number(42.0).is_formula());
        assert_eq!(Cell::text("=A1").formula_text(), Some("=A1"));
    }

    #[test]
    fn display_matches_spreadsheet_conventions() {
        assert_eq!(Cell::Empty.to_display(), "");
        assert_eq!(Cell::Bool(true).to_display(), "TRUE");
        assert_eq!(Cell::Number(42.0).to_display(), "42");
        assert_eq!(Cell::Number(42.5).to_display(), "42.5");
        assert_eq!(Cell::text("#REF!").to_display(), "#REF!");
    }

    #[test]
    fn cells_deserialize_from_json_scalars() {
        let row: Vec<Cell> = serde_json::from_str(r#"["Revenue", 120.5, true, null, ""]"#).unwrap();
        assert_eq!(
            row,
            vec![
                Cell::text("Revenue"),
                Cell::Number(120.5),
                Cell::Bool(true),
                Cell::Empty,
                Cell::text(""),
            ]
        );
    }

    #[test]
    fn cells_serialize_back_to_json_scalars() {
        let json = serde_json::to_string(&vec![Cell::Empty, Cell::Number(1.0), Cell::text("x")]).unwrap();
        assert_eq!(json, r#"[null,1.0,"x"]"#);
    }

    #[test]
    fn grid_reads_out_of_range_as_empty() {
        let grid = Grid::from_rows(vec![
            vec![Cell::text("a"), Cell::text("b")],
            vec![Cell::text("c")],
        ]);
        assert_eq!(grid.cell(0, 1), &Cell::text("b"));
        assert_eq!(grid.cell(1, 1), &Cell::Empty);
        assert_eq!(grid.cell(9, 9), &Cell::Empty);
        assert_eq!(grid.row(5), &[] as &[Cell]);
    }

    #[test]
    fn set_cell_grows_the_grid() {
        let mut grid = Grid::new();
        grid.set_cell(2, 3, Cell::text("x"));
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.cell(2, 3), &Cell::text("x"));
        assert_eq!(grid.cell(2, 2), &Cell::Empty);
        assert_eq!(grid.cell(0, 0), &Cell::Empty);
    }

    #[test]
    fn grid_serde_is_transparent() {
        let grid = Grid::from_rows(vec![vec![Cell::text("a")], vec![]]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"[["a"],[]]"#);
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
