//! Spreadsheet and sheet metadata

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Metadata for one sheet (tab) of a spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetInfo {
    /// Sheet name as shown on the tab
    pub name: String,
    /// Numeric sheet id used by structural requests
    pub sheet_id: i64,
    /// Declared row extent of the grid
    pub row_count: u32,
    /// Declared column extent of the grid
    pub column_count: u32,
}

/// Spreadsheet-level metadata: title plus per-sheet grid dimensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetInfo {
    pub spreadsheet_id: String,
    pub title: String,
    pub sheets: Vec<SheetInfo>,
}

impl SpreadsheetInfo {
    /// Look up a sheet by name
    pub fn sheet(&self, name: &str) -> Option<&SheetInfo> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Look up a sheet by name, failing with [`Error::SheetNotFound`]
    pub fn require_sheet(&self, name: &str) -> Result<&SheetInfo> {
        self.sheet(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Numeric id of a named sheet
    pub fn sheet_id(&self, name: &str) -> Result<i64> {
        Ok(self.require_sheet(name)?.sheet_id)
    }

    /// Sheet names in tab order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }
}
