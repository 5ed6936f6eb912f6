//! Structural sheet inspection
//!
//! A cheap triage pass used before deeper analysis: sample the top of a
//! sheet, report its headers and row labels, and classify which columns
//! carry formulas versus hard data. Unlike [`scan_sheet`], this never reads
//! the full extent.
//!
//! [`scan_sheet`]: crate::scan_sheet

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use fpa_sheets_core::{Cell, Grid, RangeRef, Result, TabularSource};

/// Column cap for inspection reads
pub const INSPECT_COL_CAP: u32 = 50;

/// Rows sampled by [`inspect_sheet`]
pub const DEFAULT_SAMPLE_ROWS: u32 = 20;

/// Depth of the extended column-A probe used when the sample came back full
const EXTENDED_PROBE_ROWS: u32 = 500;

/// Structural summary of one sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectReport {
    pub sheet_name: String,
    /// First-row content, raw
    pub headers: Vec<Cell>,
    /// First-column content of the sampled rows, in display form
    pub row_labels: Vec<String>,
    pub sample_values: Grid,
    pub sample_formulas: Grid,
    /// 0-based columns holding at least one formula below the header row
    pub formula_columns: Vec<u32>,
    /// 0-based columns holding static content below the header row
    pub data_columns: Vec<u32>,
    /// Count of populated column-A rows, probed past the sample when the
    /// sample came back full
    pub estimated_row_count: u32,
    /// Width of the header row actually read
    pub column_count: u32,
}

/// Inspect a sheet's structure using the default sample depth
pub fn inspect_sheet<S: TabularSource + ?Sized>(
    source: &S,
    sheet_name: &str,
) -> Result<InspectReport> {
    inspect_sheet_with(source, sheet_name, DEFAULT_SAMPLE_ROWS)
}

/// Inspect a sheet's structure, sampling the first `sample_rows` rows.
///
/// Fails with [`Error::SheetNotFound`] when the sheet is absent from the
/// source's metadata.
///
/// [`Error::SheetNotFound`]: fpa_sheets_core::Error::SheetNotFound
pub fn inspect_sheet_with<S: TabularSource + ?Sized>(
    source: &S,
    sheet_name: &str,
    sample_rows: u32,
) -> Result<InspectReport> {
    let info = source.metadata()?;
    let sheet = info.require_sheet(sheet_name)?;
    let col_count = sheet.column_count.min(INSPECT_COL_CAP).max(1);
    let sample_rows = sample_rows.max(1);

    let header_range = RangeRef::from_indices(0, 0, 0, col_count - 1);
    let headers: Vec<Cell> = source
        .read_values(sheet_name, &header_range)?
        .rows()
        .first()
        .cloned()
        .unwrap_or_default();

    let sample_range = RangeRef::from_indices(0, 0, sample_rows - 1, col_count - 1);
    let sample_values = source.read_values(sheet_name, &sample_range)?;
    let sample_formulas = source.read_formulas(sheet_name, &sample_range)?;

    let mut formula_columns = BTreeSet::new();
    let mut data_columns = BTreeSet::new();
    for row in sample_formulas.rows().iter().skip(1) {
        for (col_idx, cell) in row.iter().enumerate() {
            if cell.is_formula() {
                formula_columns.insert(col_idx as u32);
            } else if cell.has_content() {
                data_columns.insert(col_idx as u32);
            }
        }
    }

    let row_labels: Vec<String> = sample_values
        .rows()
        .iter()
        .map(|row| row.first().map_or_else(String::new, Cell::to_display))
        .collect();

    // count populated label rows; a full sample means the data may continue,
    // so probe deeper
    let estimated_row_count = if sample_values.row_count() >= sample_rows {
        let probe = RangeRef::from_indices(0, 0, EXTENDED_PROBE_ROWS - 1, 0);
        count_labeled_rows(&source.read_values(sheet_name, &probe)?)
    } else {
        count_labeled_rows(&sample_values)
    };

    Ok(InspectReport {
        sheet_name: sheet_name.to_string(),
        column_count: headers.len() as u32,
        headers,
        row_labels,
        sample_values,
        sample_formulas,
        formula_columns: formula_columns.into_iter().collect(),
        data_columns: data_columns.into_iter().collect(),
        estimated_row_count,
    })
}

fn count_labeled_rows(grid: &Grid) -> u32 {
    grid.rows()
        .iter()
        .filter(|row| row.first().is_some_and(|c| c.has_content()))
        .count() as u32
}
