//! Scan findings and the per-sheet report

use serde::{Deserialize, Serialize};

/// A formula whose displayed value is a spreadsheet error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFinding {
    /// A1 address of the broken cell
    pub cell: String,
    /// Column-A text of the row, best-effort annotation only
    pub row_label: String,
    /// The displayed error text, e.g. `#REF!`
    pub error: String,
    /// The formula that produced it
    pub formula: String,
}

/// A hard-coded value sitting inside a row of formulas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticFinding {
    pub cell: String,
    pub row_label: String,
    /// The literal content found where a formula was expected
    pub value: String,
}

/// A formula whose structure deviates from the rest of its row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternBreakFinding {
    pub cell: String,
    pub row_label: String,
    /// The divergent formula
    pub formula: String,
    /// The pattern the rest of the row follows
    pub dominant_pattern: String,
}

/// Everything one full-sheet scan produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub sheet_name: String,
    /// Rows covered by the bulk reads (the detected data extent)
    pub rows_scanned: u32,
    /// Columns covered, after the scan-width cap
    pub cols_scanned: u32,
    pub errors: Vec<ErrorFinding>,
    pub static_in_formula_rows: Vec<StaticFinding>,
    pub pattern_breaks: Vec<PatternBreakFinding>,
}

impl ScanReport {
    /// Report for a sheet with no data rows
    pub fn empty(sheet_name: impl Into<String>, cols_scanned: u32) -> Self {
        ScanReport {
            sheet_name: sheet_name.into(),
            rows_scanned: 0,
            cols_scanned,
            errors: Vec::new(),
            static_in_formula_rows: Vec::new(),
            pattern_breaks: Vec::new(),
        }
    }

    /// Total findings across all three categories
    pub fn finding_count(&self) -> usize {
        self.errors.len() + self.static_in_formula_rows.len() + self.pattern_breaks.len()
    }

    /// True when nothing was flagged
    pub fn is_clean(&self) -> bool {
        self.finding_count() == 0
    }
}
