//! # fpa-sheets-core
//!
//! Core data structures for the fpa-sheets analysis toolkit.
//!
//! This crate provides the fundamental types used throughout fpa-sheets:
//! - [`CellRef`] and [`RangeRef`] - A1-style cell and range addressing
//! - [`Cell`] and [`Grid`] - cell content as returned by bulk range reads
//! - [`SpreadsheetInfo`] and [`SheetInfo`] - spreadsheet metadata
//! - [`TabularSource`] - the backend trait the analysis passes consume
//! - [`MemoryWorkbook`] - an in-memory backend for tests and saved fixtures
//!
//! ## Example
//!
//! ```rust
//! use fpa_sheets_core::{Cell, MemorySheet, MemoryWorkbook, RangeRef, TabularSource};
//!
//! let mut sheet = MemorySheet::new("Model");
//! sheet.set(0, 0, "Revenue");
//! sheet.set_formula(0, 1, "=B2*12", 1200.0);
//!
//! let mut book = MemoryWorkbook::new("demo-model", "Demo Model");
//! book.add_sheet(sheet);
//!
//! let range: RangeRef = "A1:B1".parse().unwrap();
//! let values = book.read_values("Model", &range).unwrap();
//! assert_eq!(values.cell(0, 0), &Cell::text("Revenue"));
//! assert_eq!(values.cell(0, 1), &Cell::Number(1200.0));
//! ```

pub mod address;
pub mod cell;
pub mod error;
pub mod memory;
pub mod meta;
pub mod source;
pub mod url;

// Re-exports for convenience
pub use address::{column_to_letters, letters_to_column, CellRef, GridRange, RangeRef};
pub use cell::{Cell, Grid, ERROR_MARKERS};
pub use error::{Error, Result};
pub use memory::{AppliedFormat, MemorySheet, MemoryWorkbook};
pub use meta::{SheetInfo, SpreadsheetInfo};
pub use source::{
    NumberFormat, NumberFormatKind, RangeFormat, TabularSource, TextFormat, WriteSummary,
};
pub use url::extract_spreadsheet_id;

/// Maximum number of columns in a sheet (Google Sheets limit, column ZZZ)
pub const MAX_COLS: u32 = 18_278;

/// Maximum number of rows in a sheet (Google Sheets cell limit at one column)
pub const MAX_ROWS: u32 = 10_000_000;
