//! Tool dispatch errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`ToolExecutor`]
///
/// [`ToolExecutor`]: crate::ToolExecutor
#[derive(Debug, Error)]
pub enum Error {
    /// A sheet tool ran before `connect_to_spreadsheet`
    #[error("No spreadsheet connected. Use connect_to_spreadsheet tool with a Google Sheets URL first.")]
    NotConnected,

    /// `format_range` ran with every option unset
    #[error("No formatting options provided")]
    NoFormatOptions,

    #[error("{0}")]
    Sheet(#[from] fpa_sheets_core::Error),

    #[error("{0}")]
    Snapshot(#[from] fpa_sheets_snapshot::Error),
}
