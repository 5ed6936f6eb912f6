//! # fpa-sheets-scan
//!
//! Full-sheet formula anomaly scanner for financial models.
//!
//! The scanner reads a sheet's formula grid and display grid side by side
//! and reports three kinds of trouble:
//! - [`ErrorFinding`] - a formula whose displayed value is a spreadsheet
//!   error (`#REF!`, `#DIV/0!`, ...)
//! - [`StaticFinding`] - a hard-coded value sitting inside a row of
//!   formulas, the classic accidentally-overwritten formula
//! - [`PatternBreakFinding`] - a formula whose structure deviates from the
//!   pattern the rest of its row follows
//!
//! Formulas are compared structurally via [`formula_pattern`], which
//! replaces every cell reference with a placeholder so `=B2*1.1` and
//! `=C2*1.1` count as the same shape.
//!
//! ## Example
//!
//! ```rust
//! use fpa_sheets_core::{MemorySheet, MemoryWorkbook};
//! use fpa_sheets_scan::scan_sheet;
//!
//! let mut sheet = MemorySheet::new("P&L");
//! sheet.set(0, 0, "Metric");
//! sheet.set(1, 0, "Revenue");
//! for col in 1..=4 {
//!     sheet.set_formula(1, col, "=SUM(B2:B9)", 100.0);
//! }
//! sheet.set_formula(1, 3, "=SUM(B2:B9)", "#REF!");
//!
//! let mut book = MemoryWorkbook::new("m", "Model");
//! book.add_sheet(sheet);
//!
//! let report = scan_sheet(&book, "P&L").unwrap();
//! assert_eq!(report.errors.len(), 1);
//! assert_eq!(report.errors[0].cell, "D2");
//! ```

pub mod inspect;
pub mod pattern;
pub mod report;
pub mod scanner;

pub use inspect::{inspect_sheet, inspect_sheet_with, InspectReport, DEFAULT_SAMPLE_ROWS, INSPECT_COL_CAP};
pub use pattern::{formula_pattern, REF_PLACEHOLDER};
pub use report::{ErrorFinding, PatternBreakFinding, ScanReport, StaticFinding};
pub use scanner::{scan_sheet, Scanner, EXTENT_PROBE_ROWS, MAX_SCAN_COLS};

pub use fpa_sheets_core::{Error, Result};
