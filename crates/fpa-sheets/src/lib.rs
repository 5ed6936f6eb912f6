//! # fpa-sheets
//!
//! Analysis toolkit for FP&A spreadsheet models: find broken or
//! hand-edited formulas, summarize sheet structure, and track how model
//! metrics move between saved snapshots.
//!
//! ## Features
//!
//! - Full-sheet anomaly scan: error values, hard-coded cells inside
//!   formula rows, formulas that break their row's pattern
//! - Structural inspection: headers, row labels, formula vs data columns
//! - Metric snapshots persisted as JSON, with month-aligned diffing
//! - A closed tool-call protocol for driving everything from an agent
//! - An in-memory workbook backend for tests and saved fixtures
//!
//! ## Example
//!
//! ```rust
//! use fpa_sheets::prelude::*;
//!
//! let mut sheet = MemorySheet::new("P&L");
//! sheet.set(0, 0, "Metric");
//! sheet.set(1, 0, "Revenue");
//! sheet.set_formula(1, 1, "=B9*1.1", 100.0);
//! sheet.set_formula(1, 2, "=C9*1.1", 110.0);
//! sheet.set_formula(1, 3, "=D9*1.1", "#REF!");
//!
//! let mut book = MemoryWorkbook::new("model-1", "FY26 Plan");
//! book.add_sheet(sheet);
//!
//! let audit = book.audit().unwrap();
//! assert_eq!(audit.finding_count(), 1);
//! assert_eq!(audit.sheets[0].errors[0].cell, "D2");
//! ```

pub mod audit;
pub mod prelude;

// Re-export audit types
pub use audit::{AuditReport, SourceAuditExt};

// Re-export core types
pub use fpa_sheets_core::{
    column_to_letters,
    extract_spreadsheet_id,
    letters_to_column,
    AppliedFormat,
    // Cell types
    Cell,
    // Addressing
    CellRef,
    // Error types
    Error,
    Grid,
    GridRange,
    // In-memory backend
    MemorySheet,
    MemoryWorkbook,
    NumberFormat,
    NumberFormatKind,
    RangeFormat,
    RangeRef,
    Result,
    // Metadata
    SheetInfo,
    SpreadsheetInfo,
    // The backend trait
    TabularSource,
    TextFormat,
    WriteSummary,
    // Constants
    ERROR_MARKERS,
    MAX_COLS,
    MAX_ROWS,
};

// Re-export scanner types
pub use fpa_sheets_scan::{
    formula_pattern, inspect_sheet, inspect_sheet_with, scan_sheet, ErrorFinding, InspectReport,
    PatternBreakFinding, ScanReport, Scanner, StaticFinding, DEFAULT_SAMPLE_ROWS, MAX_SCAN_COLS,
    REF_PLACEHOLDER,
};

// Re-export snapshot types
pub use fpa_sheets_snapshot::{
    diff_snapshots, Error as SnapshotError, LineSeries, Metric, Metrics, SeriesDiff, Snapshot,
    SnapshotDiff, SnapshotRef, SnapshotStore, SnapshotSummary,
};

// Re-export the tool-call surface
pub use fpa_sheets_tools::{
    serve, Error as ToolError, Request, Response, ToolCall, ToolData, ToolExecutor, ToolResult,
};
