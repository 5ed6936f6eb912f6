//! Error types for fpa-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when addressing, reading, or mutating sheet data
#[derive(Debug, Error)]
pub enum Error {
    /// A cell reference could not be parsed as A1 notation
    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    /// A range could not be parsed, or does not fit the target sheet
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Column letters resolve past the supported column span
    #[error("Column {0} out of bounds (max {1})")]
    ColumnOutOfBounds(u32, u32),

    /// No sheet with the given name exists in the spreadsheet
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The source cannot serve the requested spreadsheet id
    #[error("Spreadsheet not available: {0}")]
    SpreadsheetUnavailable(String),

    /// Input was not recognizable as a spreadsheet URL or bare id
    #[error("Not a spreadsheet URL or id: {0}")]
    InvalidSpreadsheetId(String),

    /// The backing source failed after exhausting its own retries
    #[error("Source error: {0}")]
    Source(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while reading or writing a workbook file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
