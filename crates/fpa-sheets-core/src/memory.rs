//! In-memory workbook: the offline [`TabularSource`] used by tests, saved
//! fixtures, and dry runs
//!
//! A workbook is plain data and serializes to a single JSON file, so a
//! captured model can be replayed through every analysis pass without
//! touching a live spreadsheet.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::address::{GridRange, RangeRef};
use crate::cell::{Cell, Grid};
use crate::error::{Error, Result};
use crate::meta::{SheetInfo, SpreadsheetInfo};
use crate::source::{RangeFormat, TabularSource, WriteSummary};

/// Default grid size for a freshly created sheet
const DEFAULT_ROWS: u32 = 1000;
const DEFAULT_COLS: u32 = 26;

/// A formatting request recorded against a sheet region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFormat {
    pub range: GridRange,
    pub format: RangeFormat,
}

/// One sheet held in memory: parallel display and formula grids
///
/// The declared `row_count`/`column_count` play the role of the grid extents
/// a live spreadsheet reports; the effective extent is the declared size or
/// the stored data, whichever is larger, so fixtures may omit the counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySheet {
    pub name: String,
    #[serde(default)]
    pub sheet_id: i64,
    #[serde(default)]
    pub row_count: u32,
    #[serde(default)]
    pub column_count: u32,
    #[serde(default)]
    pub values: Grid,
    #[serde(default)]
    pub formulas: Grid,
    #[serde(default)]
    pub frozen_rows: u32,
    #[serde(default)]
    pub frozen_columns: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<AppliedFormat>,
}

impl MemorySheet {
    /// New empty sheet with the default 1000 x 26 grid
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_size(name, DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// New empty sheet with an explicit grid size
    pub fn with_size<S: Into<String>>(name: S, rows: u32, cols: u32) -> Self {
        MemorySheet {
            name: name.into(),
            sheet_id: 0,
            row_count: rows,
            column_count: cols,
            values: Grid::new(),
            formulas: Grid::new(),
            frozen_rows: 0,
            frozen_columns: 0,
            formats: Vec::new(),
        }
    }

    /// Set a literal cell: both the displayed value and the formula-text
    /// view show the same content
    pub fn set(&mut self, row: u32, col: u32, value: impl Into<Cell>) {
        let value = value.into();
        self.values.set_cell(row, col, value.clone());
        self.formulas.set_cell(row, col, value);
    }

    /// Set a formula cell: the formula-text view shows `formula`, the value
    /// view shows `shown` (nothing here evaluates anything)
    pub fn set_formula(&mut self, row: u32, col: u32, formula: &str, shown: impl Into<Cell>) {
        self.formulas.set_cell(row, col, Cell::text(formula));
        self.values.set_cell(row, col, shown.into());
    }

    /// Effective grid extent: declared size or stored data, whichever is
    /// larger
    pub fn dims(&self) -> (u32, u32) {
        let rows = self
            .row_count
            .max(self.values.row_count())
            .max(self.formulas.row_count());
        let cols = self
            .column_count
            .max(self.values.column_count())
            .max(self.formulas.column_count());
        (rows, cols)
    }

    /// Last 0-based row holding any content in either grid
    pub fn last_content_row(&self) -> Option<u32> {
        let scan = |grid: &Grid| {
            grid.rows()
                .iter()
                .enumerate()
                .filter(|(_, row)| row.iter().any(Cell::has_content))
                .map(|(i, _)| i as u32)
                .max()
        };
        scan(&self.values).max(scan(&self.formulas))
    }

    fn info(&self) -> SheetInfo {
        let (rows, cols) = self.dims();
        SheetInfo {
            name: self.name.clone(),
            sheet_id: self.sheet_id,
            row_count: rows,
            column_count: cols,
        }
    }

    fn write_cell(&mut self, row: u32, col: u32, cell: &Cell) {
        if cell.is_formula() {
            self.formulas.set_cell(row, col, cell.clone());
            self.values.set_cell(row, col, Cell::Empty);
        } else {
            self.values.set_cell(row, col, cell.clone());
            self.formulas.set_cell(row, col, cell.clone());
        }
    }
}

/// A whole spreadsheet held in memory, serving [`TabularSource`] for exactly
/// the one spreadsheet id it was built with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryWorkbook {
    pub spreadsheet_id: String,
    pub title: String,
    #[serde(default)]
    pub sheets: Vec<MemorySheet>,
}

impl MemoryWorkbook {
    /// New workbook with no sheets
    pub fn new<I: Into<String>, T: Into<String>>(spreadsheet_id: I, title: T) -> Self {
        MemoryWorkbook {
            spreadsheet_id: spreadsheet_id.into(),
            title: title.into(),
            sheets: Vec::new(),
        }
    }

    /// Add a sheet. A colliding sheet id is reassigned to the next free one,
    /// so the first sheet keeps id 0 and later defaults get 1, 2, ...
    pub fn add_sheet(&mut self, mut sheet: MemorySheet) -> &mut Self {
        if self.sheets.iter().any(|s| s.sheet_id == sheet.sheet_id) {
            let next = self.sheets.iter().map(|s| s.sheet_id).max().unwrap_or(-1) + 1;
            sheet.sheet_id = next;
        }
        self.sheets.push(sheet);
        self
    }

    /// Look up a sheet by name
    pub fn sheet(&self, name: &str) -> Option<&MemorySheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    fn require(&self, name: &str) -> Result<&MemorySheet> {
        self.sheet(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    fn require_mut(&mut self, name: &str) -> Result<&mut MemorySheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Load a workbook from a JSON file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let book: MemoryWorkbook = serde_json::from_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            sheets = book.sheets.len(),
            "loaded workbook"
        );
        Ok(book)
    }

    /// Save the workbook as pretty-printed JSON
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        tracing::debug!(path = %path.display(), "saved workbook");
        Ok(())
    }

    fn read_grid(&self, sheet: &str, range: &RangeRef, formulas: bool) -> Result<Grid> {
        let sheet = self.require(sheet)?;
        let (rows, cols) = sheet.dims();
        let Some((row0, row1, col0, col1)) = range.resolve(rows, cols) else {
            return Ok(Grid::new());
        };
        let src = if formulas { &sheet.formulas } else { &sheet.values };
        let mut out: Vec<Vec<Cell>> = Vec::with_capacity((row1 - row0 + 1) as usize);
        for r in row0..=row1 {
            let mut row: Vec<Cell> = (col0..=col1).map(|c| src.cell(r, c).clone()).collect();
            // sources trim trailing empties per row, then trailing empty rows
            while row.last().is_some_and(Cell::is_empty) {
                row.pop();
            }
            out.push(row);
        }
        while out.last().is_some_and(Vec::is_empty) {
            out.pop();
        }
        Ok(Grid::from_rows(out))
    }
}

impl TabularSource for MemoryWorkbook {
    fn connect(&mut self, spreadsheet_id: &str) -> Result<SpreadsheetInfo> {
        if spreadsheet_id != self.spreadsheet_id {
            return Err(Error::SpreadsheetUnavailable(spreadsheet_id.to_string()));
        }
        self.metadata()
    }

    fn metadata(&self) -> Result<SpreadsheetInfo> {
        Ok(SpreadsheetInfo {
            spreadsheet_id: self.spreadsheet_id.clone(),
            title: self.title.clone(),
            sheets: self.sheets.iter().map(MemorySheet::info).collect(),
        })
    }

    fn read_values(&self, sheet: &str, range: &RangeRef) -> Result<Grid> {
        self.read_grid(sheet, range, false)
    }

    fn read_formulas(&self, sheet: &str, range: &RangeRef) -> Result<Grid> {
        self.read_grid(sheet, range, true)
    }

    fn write_values(
        &mut self,
        sheet: &str,
        range: &RangeRef,
        rows: &[Vec<Cell>],
    ) -> Result<WriteSummary> {
        let target = self.require_mut(sheet)?;
        let (sheet_rows, sheet_cols) = target.dims();
        let row0 = range.start_row().unwrap_or(0);
        let col0 = range.start_col().unwrap_or(0);
        let height = rows.len() as u32;
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        if row0 + height > sheet_rows || col0 + width > sheet_cols {
            return Err(Error::InvalidRange(format!(
                "write of {height}x{width} at {} exceeds grid limits ({sheet_rows}x{sheet_cols})",
                RangeRef::cell(row0, col0)
            )));
        }
        let mut cells = 0u32;
        for (dr, row) in rows.iter().enumerate() {
            for (dc, cell) in row.iter().enumerate() {
                target.write_cell(row0 + dr as u32, col0 + dc as u32, cell);
                cells += 1;
            }
        }
        Ok(WriteSummary {
            updated_rows: height,
            updated_columns: width,
            updated_cells: cells,
        })
    }

    fn append_rows(
        &mut self,
        sheet: &str,
        rows: &[Vec<Cell>],
        start_col: u32,
    ) -> Result<WriteSummary> {
        let target = self.require_mut(sheet)?;
        let row0 = target.last_content_row().map_or(0, |r| r + 1);
        let mut cells = 0u32;
        for (dr, row) in rows.iter().enumerate() {
            for (dc, cell) in row.iter().enumerate() {
                target.write_cell(row0 + dr as u32, start_col + dc as u32, cell);
                cells += 1;
            }
        }
        // appends extend the grid, unlike plain writes
        let (rows_now, _) = target.dims();
        target.row_count = target.row_count.max(rows_now);
        Ok(WriteSummary {
            updated_rows: rows.len() as u32,
            updated_columns: rows.iter().map(Vec::len).max().unwrap_or(0) as u32,
            updated_cells: cells,
        })
    }

    fn clear_range(&mut self, sheet: &str, range: &RangeRef) -> Result<WriteSummary> {
        let target = self.require_mut(sheet)?;
        let (rows, cols) = target.dims();
        let Some((row0, row1, col0, col1)) = range.resolve(rows, cols) else {
            return Ok(WriteSummary::default());
        };
        target.values.clear_region(row0, row1, col0, col1);
        target.formulas.clear_region(row0, row1, col0, col1);
        Ok(WriteSummary {
            updated_rows: row1 - row0 + 1,
            updated_columns: col1 - col0 + 1,
            updated_cells: (row1 - row0 + 1) * (col1 - col0 + 1),
        })
    }

    fn format_range(&mut self, sheet: &str, range: &RangeRef, format: &RangeFormat) -> Result<()> {
        let target = self.require_mut(sheet)?;
        let grid_range = range.to_grid_range(target.sheet_id);
        target.formats.push(AppliedFormat {
            range: grid_range,
            format: format.clone(),
        });
        Ok(())
    }

    fn set_freeze(&mut self, sheet: &str, rows: u32, columns: u32) -> Result<()> {
        let target = self.require_mut(sheet)?;
        target.frozen_rows = rows;
        target.frozen_columns = columns;
        Ok(())
    }
}
