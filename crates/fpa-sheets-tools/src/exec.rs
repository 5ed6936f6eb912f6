//! Tool dispatch against a spreadsheet backend and a snapshot store

use std::io::{BufRead, Write};

use tracing::debug;

use fpa_sheets_core::{
    extract_spreadsheet_id, RangeFormat, RangeRef, SpreadsheetInfo, TabularSource, TextFormat,
};
use fpa_sheets_scan::{inspect_sheet_with, scan_sheet};
use fpa_sheets_snapshot::{diff_snapshots, SnapshotStore};

use crate::error::{Error, Result};
use crate::protocol::{Request, Response, ToolCall, ToolData, ToolResult};

/// Runs tool calls against a [`TabularSource`] and a [`SnapshotStore`].
///
/// Sheet tools require a prior `connect_to_spreadsheet`; listing, loading
/// and diffing snapshots work unconnected. The executor is deliberately
/// sequential, one call at a time, matching how an agent drives it.
pub struct ToolExecutor<S> {
    source: S,
    store: SnapshotStore,
    connected: Option<SpreadsheetInfo>,
}

impl<S: TabularSource> ToolExecutor<S> {
    pub fn new(source: S, store: SnapshotStore) -> Self {
        ToolExecutor {
            source,
            store,
            connected: None,
        }
    }

    /// Metadata cached by the last `connect_to_spreadsheet`, if any
    pub fn connected(&self) -> Option<&SpreadsheetInfo> {
        self.connected.as_ref()
    }

    /// The underlying spreadsheet backend
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one tool call, surfacing failures as [`Error`]
    pub fn execute(&mut self, call: ToolCall) -> Result<Option<ToolData>> {
        debug!(tool = call.name(), "executing tool call");
        match call {
            ToolCall::ConnectToSpreadsheet { url_or_id } => {
                let id = extract_spreadsheet_id(&url_or_id)?;
                let info = self.source.connect(&id)?;
                self.connected = Some(info.clone());
                Ok(Some(info.into()))
            }
            ToolCall::GetSpreadsheetInfo => {
                self.require_connected()?;
                Ok(Some(self.source.metadata()?.into()))
            }
            ToolCall::InspectSheet {
                sheet_name,
                sample_rows,
            } => {
                self.require_connected()?;
                Ok(Some(
                    inspect_sheet_with(&self.source, &sheet_name, sample_rows)?.into(),
                ))
            }
            ToolCall::ReadRange { sheet_name, range } => {
                self.require_connected()?;
                let range: RangeRef = range.parse()?;
                Ok(Some(self.source.read_values(&sheet_name, &range)?.into()))
            }
            ToolCall::ReadFormulas { sheet_name, range } => {
                self.require_connected()?;
                let range: RangeRef = range.parse()?;
                Ok(Some(self.source.read_formulas(&sheet_name, &range)?.into()))
            }
            ToolCall::WriteRange {
                sheet_name,
                range,
                values,
            } => {
                self.require_connected()?;
                let range: RangeRef = range.parse()?;
                Ok(Some(
                    self.source.write_values(&sheet_name, &range, &values)?.into(),
                ))
            }
            ToolCall::AppendRows { sheet_name, values } => {
                self.require_connected()?;
                Ok(Some(self.source.append_rows(&sheet_name, &values, 0)?.into()))
            }
            ToolCall::ClearRange { sheet_name, range } => {
                self.require_connected()?;
                let range: RangeRef = range.parse()?;
                Ok(Some(self.source.clear_range(&sheet_name, &range)?.into()))
            }
            ToolCall::FormatRange {
                sheet_name,
                range,
                number_format,
                bold,
                font_family,
                font_size,
            } => {
                self.require_connected()?;
                let format = RangeFormat {
                    number_format,
                    text_format: Some(TextFormat {
                        bold,
                        font_family,
                        font_size,
                    }),
                };
                if format.is_noop() {
                    return Err(Error::NoFormatOptions);
                }
                let range: RangeRef = range.parse()?;
                self.source.format_range(&sheet_name, &range, &format)?;
                Ok(None)
            }
            ToolCall::SetFreeze {
                sheet_name,
                rows,
                columns,
            } => {
                self.require_connected()?;
                self.source.set_freeze(&sheet_name, rows, columns)?;
                Ok(None)
            }
            ToolCall::ScanSheet { sheet_name } => {
                self.require_connected()?;
                Ok(Some(scan_sheet(&self.source, &sheet_name)?.into()))
            }
            ToolCall::SaveSnapshot { label, metrics } => {
                let info = self.require_connected()?;
                let spreadsheet_id = info.spreadsheet_id.clone();
                let title = info.title.clone();
                Ok(Some(
                    self.store.save(&label, &spreadsheet_id, &title, metrics)?.into(),
                ))
            }
            ToolCall::ListSnapshots => Ok(Some(self.store.list()?.into())),
            ToolCall::LoadSnapshot { snapshot_id } => {
                Ok(Some(self.store.load(&snapshot_id)?.into()))
            }
            ToolCall::DiffSnapshots { from_id, to_id } => {
                let from = self.store.load(&from_id)?;
                let to = self.store.load(&to_id)?;
                Ok(Some(diff_snapshots(&from, &to).into()))
            }
        }
    }

    /// Run one request and package the outcome as a reply; never fails
    pub fn handle(&mut self, request: Request) -> Response {
        let result = match self.execute(request.call) {
            Ok(data) => ToolResult::Ok { data },
            Err(err) => ToolResult::Error {
                message: err.to_string(),
            },
        };
        Response {
            id: request.id,
            result,
        }
    }

    fn require_connected(&self) -> Result<&SpreadsheetInfo> {
        self.connected.as_ref().ok_or(Error::NotConnected)
    }
}

/// Serve newline-delimited JSON tool calls until the input ends.
///
/// Each line is parsed as a [`Request`] and answered with one [`Response`]
/// line. A line that fails to parse produces an error reply with id 0
/// instead of terminating the loop; blank lines are skipped.
pub fn serve<S, R, W>(executor: &mut ToolExecutor<S>, input: R, mut output: W) -> std::io::Result<()>
where
    S: TabularSource,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => executor.handle(request),
            Err(err) => Response {
                id: 0,
                result: ToolResult::Error {
                    message: format!("Malformed request: {err}"),
                },
            },
        };
        let json = serde_json::to_string(&response).map_err(std::io::Error::from)?;
        writeln!(output, "{json}")?;
        output.flush()?;
    }
    Ok(())
}
