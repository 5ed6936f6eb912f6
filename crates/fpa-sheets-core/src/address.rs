//! Cell and range addressing in A1 notation
//!
//! Rows and columns are 0-based everywhere in this crate; the 1-based form
//! only ever appears inside A1 strings. `$` anchors are accepted on parse and
//! ignored, since absolute/relative distinctions do not matter for reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::MAX_COLS;

/// Convert a 0-based column index to letters (0 = A, 25 = Z, 26 = AA)
pub fn column_to_letters(col: u32) -> String {
    let mut letters = String::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        letters.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters
}

/// Convert column letters to a 0-based index (A = 0, Z = 25, AA = 26)
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidCellRef("empty column letters".into()));
    }
    let mut n: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidCellRef(format!(
                "invalid column letter '{c}' in '{letters}'"
            )));
        }
        n = n * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        if n > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(n - 1, MAX_COLS - 1));
        }
    }
    Ok(n - 1)
}

/// A single cell position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// 0-based row index
    pub row: u32,
    /// 0-based column index
    pub col: u32,
}

impl CellRef {
    /// Create a cell reference from 0-based row and column indices
    pub fn new(row: u32, col: u32) -> Self {
        CellRef { row, col }
    }

    /// Parse an A1-style reference like `B2` or `$B$2`
    pub fn parse(s: &str) -> Result<Self> {
        let (col, row) = split_a1(s)?;
        match (col, row) {
            (Some(col), Some(row)) => Ok(CellRef { row, col }),
            _ => Err(Error::InvalidCellRef(s.to_string())),
        }
    }

    /// A1 form of this reference, e.g. `B2`
    pub fn to_a1(&self) -> String {
        format!("{}{}", column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_to_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CellRef::parse(s)
    }
}

/// One endpoint of a range: a column, a row, or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct Endpoint {
    col: Option<u32>,
    row: Option<u32>,
}

impl Endpoint {
    fn write_a1(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(col) = self.col {
            write!(f, "{}", column_to_letters(col))?;
        }
        if let Some(row) = self.row {
            write!(f, "{}", row + 1)?;
        }
        Ok(())
    }
}

/// An A1-style range
///
/// Supports the forms a range read accepts: a single cell (`B2`), a
/// rectangle (`A1:D10`), open-ended columns (`B:D`), open-ended rows
/// (`2:5`), and mixed endpoints (`A2:A`). Open edges resolve against the
/// target sheet's extents at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeRef {
    start: Endpoint,
    end: Endpoint,
}

impl RangeRef {
    /// Parse an A1 range like `A1:D10`, `B:D`, `2:5`, or a single cell
    pub fn parse(s: &str) -> Result<Self> {
        let (start, end) = match s.split_once(':') {
            Some((a, b)) => (parse_endpoint(a, s)?, parse_endpoint(b, s)?),
            None => {
                let cell = parse_endpoint(s, s)?;
                (cell, cell)
            }
        };
        Ok(RangeRef { start, end }.normalized())
    }

    /// Rectangle from inclusive 0-based corners
    pub fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        RangeRef {
            start: Endpoint {
                col: Some(start_col),
                row: Some(start_row),
            },
            end: Endpoint {
                col: Some(end_col),
                row: Some(end_row),
            },
        }
        .normalized()
    }

    /// Single-cell range
    pub fn cell(row: u32, col: u32) -> Self {
        Self::from_indices(row, col, row, col)
    }

    /// Whole columns, inclusive (`B:D` is `columns(1, 3)`)
    pub fn columns(start_col: u32, end_col: u32) -> Self {
        RangeRef {
            start: Endpoint {
                col: Some(start_col.min(end_col)),
                row: None,
            },
            end: Endpoint {
                col: Some(start_col.max(end_col)),
                row: None,
            },
        }
    }

    /// Whole rows, inclusive (`2:5` is `rows(1, 4)`)
    pub fn rows(start_row: u32, end_row: u32) -> Self {
        RangeRef {
            start: Endpoint {
                col: None,
                row: Some(start_row.min(end_row)),
            },
            end: Endpoint {
                col: None,
                row: Some(start_row.max(end_row)),
            },
        }
    }

    fn normalized(mut self) -> Self {
        if let (Some(a), Some(b)) = (self.start.col, self.end.col) {
            if a > b {
                self.start.col = Some(b);
                self.end.col = Some(a);
            }
        }
        if let (Some(a), Some(b)) = (self.start.row, self.end.row) {
            if a > b {
                self.start.row = Some(b);
                self.end.row = Some(a);
            }
        }
        self
    }

    /// First row, if the range binds rows
    pub fn start_row(&self) -> Option<u32> {
        self.start.row
    }

    /// Last row (inclusive), if the range binds rows on its end edge
    pub fn end_row(&self) -> Option<u32> {
        self.end.row
    }

    /// First column, if the range binds columns
    pub fn start_col(&self) -> Option<u32> {
        self.start.col
    }

    /// Last column (inclusive), if the range binds columns on its end edge
    pub fn end_col(&self) -> Option<u32> {
        self.end.col
    }

    /// True when both endpoints name the same single cell
    pub fn is_single_cell(&self) -> bool {
        self.start == self.end && self.start.col.is_some() && self.start.row.is_some()
    }

    /// Resolve against a sheet of `rows` x `cols`, producing inclusive
    /// 0-based bounds `(row0, row1, col0, col1)`. Open edges extend to the
    /// sheet extents; bounds are clipped. `None` means the range lies
    /// entirely outside the sheet.
    pub fn resolve(&self, rows: u32, cols: u32) -> Option<(u32, u32, u32, u32)> {
        if rows == 0 || cols == 0 {
            return None;
        }
        let row0 = self.start.row.unwrap_or(0);
        let col0 = self.start.col.unwrap_or(0);
        if row0 >= rows || col0 >= cols {
            return None;
        }
        let row1 = self.end.row.unwrap_or(rows - 1).min(rows - 1);
        let col1 = self.end.col.unwrap_or(cols - 1).min(cols - 1);
        Some((row0, row1, col0, col1))
    }

    /// Convert to the 0-based half-open [`GridRange`] form used by
    /// structural requests. Unbound edges stay absent.
    pub fn to_grid_range(&self, sheet_id: i64) -> GridRange {
        GridRange {
            sheet_id,
            start_row_index: self.start.row,
            end_row_index: self.end.row.map(|r| r + 1),
            start_column_index: self.start.col,
            end_column_index: self.end.col.map(|c| c + 1),
        }
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            return self.start.write_a1(f);
        }
        self.start.write_a1(f)?;
        write!(f, ":")?;
        self.end.write_a1(f)
    }
}

impl FromStr for RangeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RangeRef::parse(s)
    }
}

impl From<CellRef> for RangeRef {
    fn from(cell: CellRef) -> Self {
        RangeRef::cell(cell.row, cell.col)
    }
}

/// 0-based, half-open grid coordinates with the numeric sheet id, in the
/// shape structural batch requests use on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<u32>,
}

/// Split an A1 token into optional column letters and an optional 1-based
/// row number, converting both to 0-based indices. `$` anchors are skipped.
fn split_a1(s: &str) -> Result<(Option<u32>, Option<u32>)> {
    let mut letters = String::new();
    let mut digits = String::new();
    for c in s.chars() {
        if c == '$' && digits.is_empty() {
            continue;
        }
        if c.is_ascii_alphabetic() && digits.is_empty() {
            letters.push(c);
        } else if c.is_ascii_digit() {
            digits.push(c);
        } else {
            return Err(Error::InvalidCellRef(s.to_string()));
        }
    }
    let col = if letters.is_empty() {
        None
    } else {
        Some(letters_to_column(&letters)?)
    };
    let row = if digits.is_empty() {
        None
    } else {
        let n: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidCellRef(s.to_string()))?;
        if n == 0 {
            return Err(Error::InvalidCellRef(s.to_string()));
        }
        Some(n - 1)
    };
    Ok((col, row))
}

fn parse_endpoint(token: &str, whole: &str) -> Result<Endpoint> {
    let (col, row) = split_a1(token).map_err(|_| Error::InvalidRange(whole.to_string()))?;
    if col.is_none() && row.is_none() {
        return Err(Error::InvalidRange(whole.to_string()));
    }
    Ok(Endpoint { col, row })
}
