//! The full-sheet scan

use ahash::AHashMap;
use fpa_sheets_core::{CellRef, Grid, RangeRef, Result, TabularSource, ERROR_MARKERS};

use crate::pattern::formula_pattern;
use crate::report::{ErrorFinding, PatternBreakFinding, ScanReport, StaticFinding};

/// Scan width cap: column AZ. Models put months across the top; anything
/// past four years of months is noise for anomaly purposes.
pub const MAX_SCAN_COLS: u32 = 52;

/// How deep the column-A extent probe looks
pub const EXTENT_PROBE_ROWS: u32 = 1000;

/// Minimum formula cells in a row before static-value detection applies
const STATIC_MIN_FORMULAS: usize = 3;

/// Minimum formula cells in a row before pattern-break detection applies
const PATTERN_MIN_FORMULAS: usize = 4;

/// Scan one sheet of `source` with the default error markers
pub fn scan_sheet<S: TabularSource + ?Sized>(source: &S, sheet_name: &str) -> Result<ScanReport> {
    Scanner::new(source).scan(sheet_name)
}

/// Full-sheet anomaly scanner
///
/// Borrows a [`TabularSource`] and issues at most three reads per scan: a
/// column-A extent probe, then one bulk formula read and one bulk value
/// read over the detected extent.
pub struct Scanner<'a, S: ?Sized> {
    source: &'a S,
    error_markers: Vec<String>,
}

impl<'a, S: TabularSource + ?Sized> Scanner<'a, S> {
    /// Scanner with the standard spreadsheet error markers
    pub fn new(source: &'a S) -> Self {
        Scanner {
            source,
            error_markers: ERROR_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Replace the error marker set. Markers are matched as display-value
    /// prefixes.
    pub fn with_error_markers<I, M>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        self.error_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Scan an entire sheet for formula anomalies.
    ///
    /// Fails with [`Error::SheetNotFound`] when the sheet is absent from the
    /// source's metadata. A sheet whose column A is empty down the probe
    /// depth yields an empty report without any further reads.
    ///
    /// [`Error::SheetNotFound`]: fpa_sheets_core::Error::SheetNotFound
    pub fn scan(&self, sheet_name: &str) -> Result<ScanReport> {
        let info = self.source.metadata()?;
        let sheet = info.require_sheet(sheet_name)?;
        let col_count = sheet.column_count.min(MAX_SCAN_COLS).max(1);

        // data extent: deepest non-empty column-A cell
        let probe = RangeRef::from_indices(0, 0, EXTENT_PROBE_ROWS - 1, 0);
        let col_a = self.source.read_values(sheet_name, &probe)?;
        let last_row = col_a
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.first().is_some_and(|c| c.has_content()))
            .map(|(i, _)| i as u32 + 1)
            .max()
            .unwrap_or(0);

        if last_row == 0 {
            return Ok(ScanReport::empty(sheet_name, col_count));
        }

        // two bulk reads cover the whole extent
        let range = RangeRef::from_indices(0, 0, last_row - 1, col_count - 1);
        let formulas = self.source.read_formulas(sheet_name, &range)?;
        let values = self.source.read_values(sheet_name, &range)?;

        let mut report = ScanReport::empty(sheet_name, col_count);
        report.rows_scanned = last_row;

        for row_idx in 0..last_row {
            self.scan_row(row_idx, col_count, &formulas, &values, &mut report);
        }

        tracing::debug!(
            sheet = sheet_name,
            rows = report.rows_scanned,
            findings = report.finding_count(),
            "sheet scan complete"
        );
        Ok(report)
    }

    fn scan_row(
        &self,
        row_idx: u32,
        col_count: u32,
        formulas: &Grid,
        values: &Grid,
        report: &mut ScanReport,
    ) {
        let label_cell = formulas.cell(row_idx, 0);
        let row_label = if label_cell.has_content() {
            label_cell.to_display().trim().to_string()
        } else {
            String::new()
        };

        let mut formula_cols: Vec<(u32, String)> = Vec::new();
        let mut static_cols: Vec<(u32, String)> = Vec::new();

        // column A holds labels, never data
        for col_idx in 1..col_count {
            let formula = formulas.cell(row_idx, col_idx);
            let value = values.cell(row_idx, col_idx);

            if let Some(text) = formula.formula_text() {
                formula_cols.push((col_idx, text.to_string()));
                if let Some(display) = value.as_text() {
                    if self.error_markers.iter().any(|m| display.starts_with(m.as_str())) {
                        report.errors.push(ErrorFinding {
                            cell: CellRef::new(row_idx, col_idx).to_a1(),
                            row_label: row_label.clone(),
                            error: display.to_string(),
                            formula: text.to_string(),
                        });
                    }
                }
            } else if formula.has_content() || value.has_content() {
                let literal = if formula.has_content() {
                    formula.to_display()
                } else {
                    value.to_display()
                };
                static_cols.push((col_idx, literal));
            }
        }

        // a static value between the first and last formula column of a
        // formula-heavy row is most likely an overwritten formula
        if formula_cols.len() >= STATIC_MIN_FORMULAS {
            let first_fc = formula_cols[0].0;
            let last_fc = formula_cols[formula_cols.len() - 1].0;
            for (col_idx, value) in &static_cols {
                if (first_fc..=last_fc).contains(col_idx) {
                    report.static_in_formula_rows.push(StaticFinding {
                        cell: CellRef::new(row_idx, *col_idx).to_a1(),
                        row_label: row_label.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        if formula_cols.len() >= PATTERN_MIN_FORMULAS {
            self.find_pattern_breaks(row_idx, &row_label, &formula_cols, report);
        }
    }

    fn find_pattern_breaks(
        &self,
        row_idx: u32,
        row_label: &str,
        formula_cols: &[(u32, String)],
        report: &mut ScanReport,
    ) {
        let patterns: Vec<(String, u32, &str)> = formula_cols
            .iter()
            .map(|(col, formula)| (formula_pattern(formula), *col, formula.as_str()))
            .collect();

        let mut counts: AHashMap<&str, u32> = AHashMap::new();
        for (pattern, _, _) in &patterns {
            *counts.entry(pattern.as_str()).or_insert(0) += 1;
        }

        // dominant pattern: highest count, earliest-seen on ties
        let mut dominant = "";
        let mut best = 0u32;
        for (pattern, _, _) in &patterns {
            let n = counts[pattern.as_str()];
            if n > best {
                best = n;
                dominant = pattern.as_str();
            }
        }

        // a lone deviation only means something when another shape repeats
        if best < 2 {
            return;
        }
        for (pattern, col_idx, formula) in &patterns {
            if counts[pattern.as_str()] == 1 {
                report.pattern_breaks.push(PatternBreakFinding {
                    cell: CellRef::new(row_idx, *col_idx).to_a1(),
                    row_label: row_label.to_string(),
                    formula: (*formula).to_string(),
                    dominant_pattern: dominant.to_string(),
                });
            }
        }
    }
}
