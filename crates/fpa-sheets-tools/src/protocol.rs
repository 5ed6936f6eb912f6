//! Wire types for tool calls
//!
//! A request is one JSON object carrying a caller-chosen `id`, the tool
//! name, and a `params` object; the reply echoes the `id` with either an
//! `ok` payload or an `error` message:
//!
//! ```json
//! {"id": 7, "tool": "read_range", "params": {"sheet_name": "P&L", "range": "A1:F4"}}
//! {"id": 7, "status": "ok", "data": [["Revenue", 100, 110]]}
//! ```
//!
//! The tool set is closed: [`ToolCall`] names every operation, and a request
//! naming anything else fails to parse instead of reaching dispatch.

use serde::{Deserialize, Serialize};

use fpa_sheets_core::{Cell, Grid, NumberFormat, SpreadsheetInfo, WriteSummary};
use fpa_sheets_scan::{InspectReport, ScanReport, DEFAULT_SAMPLE_ROWS};
use fpa_sheets_snapshot::{Metrics, Snapshot, SnapshotDiff, SnapshotSummary};

/// One tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Caller-chosen id, echoed back in the reply
    pub id: u64,
    #[serde(flatten)]
    pub call: ToolCall,
}

/// Every tool the agent may call, tagged by wire name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "params", rename_all = "snake_case")]
pub enum ToolCall {
    /// Bind the executor to a spreadsheet given a full URL or a bare id
    ConnectToSpreadsheet { url_or_id: String },

    /// Title, id and grid dimensions of every sheet
    GetSpreadsheetInfo,

    /// Structural triage of one sheet: headers, row labels, column roles
    InspectSheet {
        sheet_name: String,
        #[serde(default = "default_sample_rows")]
        sample_rows: u32,
    },

    /// Displayed values from a range
    ReadRange { sheet_name: String, range: String },

    /// Formula text from a range; non-formula cells yield their content
    ReadFormulas { sheet_name: String, range: String },

    /// Write rows starting at the top-left of `range`
    WriteRange {
        sheet_name: String,
        range: String,
        values: Vec<Vec<Cell>>,
    },

    /// Append rows after the last row with content
    AppendRows {
        sheet_name: String,
        values: Vec<Vec<Cell>>,
    },

    /// Clear values in a range, keeping formatting
    ClearRange { sheet_name: String, range: String },

    /// Apply number and text formatting across a range
    FormatRange {
        sheet_name: String,
        range: String,
        #[serde(default)]
        number_format: Option<NumberFormat>,
        #[serde(default)]
        bold: Option<bool>,
        #[serde(default)]
        font_family: Option<String>,
        #[serde(default)]
        font_size: Option<u32>,
    },

    /// Freeze header rows and label columns
    SetFreeze {
        sheet_name: String,
        #[serde(default)]
        rows: u32,
        #[serde(default)]
        columns: u32,
    },

    /// Full-sheet anomaly scan: error values, overwritten formulas,
    /// pattern breaks
    ScanSheet { sheet_name: String },

    /// Persist the given metrics as a snapshot of the connected spreadsheet
    SaveSnapshot { label: String, metrics: Metrics },

    /// Summaries of every stored snapshot, newest first
    ListSnapshots,

    /// Load one stored snapshot in full
    LoadSnapshot { snapshot_id: String },

    /// Month-aligned diff of two stored snapshots
    DiffSnapshots { from_id: String, to_id: String },
}

fn default_sample_rows() -> u32 {
    DEFAULT_SAMPLE_ROWS
}

impl ToolCall {
    /// The wire name of this tool
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::ConnectToSpreadsheet { .. } => "connect_to_spreadsheet",
            ToolCall::GetSpreadsheetInfo => "get_spreadsheet_info",
            ToolCall::InspectSheet { .. } => "inspect_sheet",
            ToolCall::ReadRange { .. } => "read_range",
            ToolCall::ReadFormulas { .. } => "read_formulas",
            ToolCall::WriteRange { .. } => "write_range",
            ToolCall::AppendRows { .. } => "append_rows",
            ToolCall::ClearRange { .. } => "clear_range",
            ToolCall::FormatRange { .. } => "format_range",
            ToolCall::SetFreeze { .. } => "set_freeze",
            ToolCall::ScanSheet { .. } => "scan_sheet",
            ToolCall::SaveSnapshot { .. } => "save_snapshot",
            ToolCall::ListSnapshots => "list_snapshots",
            ToolCall::LoadSnapshot { .. } => "load_snapshot",
            ToolCall::DiffSnapshots { .. } => "diff_snapshots",
        }
    }
}

/// Reply to one [`Request`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Echoed request id
    pub id: u64,
    #[serde(flatten)]
    pub result: ToolResult,
}

/// Success or failure of one tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ToolResult {
    #[serde(rename = "ok")]
    Ok {
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<ToolData>,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

impl ToolResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ToolResult::Ok { .. })
    }
}

/// Payload of a successful tool call
///
/// Untagged: the payload shape alone identifies the variant, so replies stay
/// plain JSON. `Grid` must sit before `Snapshots` so an empty array reads as
/// an empty grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolData {
    Info(SpreadsheetInfo),
    Inspect(InspectReport),
    Scan(ScanReport),
    Write(WriteSummary),
    Snapshot(Snapshot),
    Diff(SnapshotDiff),
    Grid(Grid),
    Snapshots(Vec<SnapshotSummary>),
}

impl From<SpreadsheetInfo> for ToolData {
    fn from(info: SpreadsheetInfo) -> Self {
        ToolData::Info(info)
    }
}

impl From<InspectReport> for ToolData {
    fn from(report: InspectReport) -> Self {
        ToolData::Inspect(report)
    }
}

impl From<ScanReport> for ToolData {
    fn from(report: ScanReport) -> Self {
        ToolData::Scan(report)
    }
}

impl From<WriteSummary> for ToolData {
    fn from(summary: WriteSummary) -> Self {
        ToolData::Write(summary)
    }
}

impl From<Snapshot> for ToolData {
    fn from(snapshot: Snapshot) -> Self {
        ToolData::Snapshot(snapshot)
    }
}

impl From<SnapshotDiff> for ToolData {
    fn from(diff: SnapshotDiff) -> Self {
        ToolData::Diff(diff)
    }
}

impl From<Grid> for ToolData {
    fn from(grid: Grid) -> Self {
        ToolData::Grid(grid)
    }
}

impl From<Vec<SnapshotSummary>> for ToolData {
    fn from(summaries: Vec<SnapshotSummary>) -> Self {
        ToolData::Snapshots(summaries)
    }
}
