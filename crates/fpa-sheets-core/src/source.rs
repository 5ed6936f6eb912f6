//! The tabular data source trait consumed by every analysis pass

use serde::{Deserialize, Serialize};

use crate::address::RangeRef;
use crate::cell::{Cell, Grid};
use crate::error::Result;
use crate::meta::SpreadsheetInfo;

/// Write acknowledgement for range mutations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteSummary {
    pub updated_rows: u32,
    pub updated_columns: u32,
    pub updated_cells: u32,
}

/// Number format categories understood by [`RangeFormat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberFormatKind {
    Text,
    Number,
    Percent,
    Currency,
    Date,
    Time,
    DateTime,
    Scientific,
}

/// A number format: category plus an optional pattern like `$#,##0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    #[serde(rename = "type")]
    pub kind: NumberFormatKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Text styling for a range; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

/// Formatting to apply across a range, mirroring the `userEnteredFormat`
/// shape; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<NumberFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_format: Option<TextFormat>,
}

impl RangeFormat {
    /// True when no field would change anything
    pub fn is_noop(&self) -> bool {
        self.number_format.is_none()
            && self
                .text_format
                .as_ref()
                .map_or(true, |t| *t == TextFormat::default())
    }
}

/// An external spreadsheet backend
///
/// Implementations own transport concerns entirely: transient failures
/// (rate limits, server hiccups) are retried with backoff inside the source,
/// and only terminal failures surface, as [`Error::Source`]. Addressing is
/// A1 notation against named sheets; grids come back ragged, with trailing
/// empty cells and rows trimmed.
///
/// [`Error::Source`]: crate::Error::Source
pub trait TabularSource {
    /// Bind the source to a spreadsheet and return its metadata
    fn connect(&mut self, spreadsheet_id: &str) -> Result<SpreadsheetInfo>;

    /// Metadata of the connected spreadsheet
    fn metadata(&self) -> Result<SpreadsheetInfo>;

    /// Read displayed values from a range
    fn read_values(&self, sheet: &str, range: &RangeRef) -> Result<Grid>;

    /// Read formula text from a range; non-formula cells yield their
    /// literal content
    fn read_formulas(&self, sheet: &str, range: &RangeRef) -> Result<Grid>;

    /// Write rows starting at the top-left of `range`
    fn write_values(&mut self, sheet: &str, range: &RangeRef, rows: &[Vec<Cell>])
        -> Result<WriteSummary>;

    /// Append rows after the last row with content, starting at `start_col`
    fn append_rows(&mut self, sheet: &str, rows: &[Vec<Cell>], start_col: u32)
        -> Result<WriteSummary>;

    /// Clear values in a range, keeping formatting
    fn clear_range(&mut self, sheet: &str, range: &RangeRef) -> Result<WriteSummary>;

    /// Apply formatting across a range
    fn format_range(&mut self, sheet: &str, range: &RangeRef, format: &RangeFormat) -> Result<()>;

    /// Freeze the first `rows` rows and `columns` columns
    fn set_freeze(&mut self, sheet: &str, rows: u32, columns: u32) -> Result<()>;
}
