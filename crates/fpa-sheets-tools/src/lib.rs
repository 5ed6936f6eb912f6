//! # fpa-sheets-tools
//!
//! The agent-facing tool surface: a tagged wire protocol naming every
//! operation an assistant may invoke against a financial model, and an
//! executor dispatching those calls onto a [`TabularSource`] and a
//! [`SnapshotStore`].
//!
//! The protocol is line-oriented JSON. Each [`Request`] names a tool and its
//! parameters; [`ToolExecutor::handle`] answers with a [`Response`] that
//! either carries the tool's payload or an error message, never a panic and
//! never a dropped request. [`serve`] runs that exchange over any
//! reader/writer pair until the input ends.
//!
//! ## Example
//!
//! ```rust
//! use fpa_sheets_core::{MemorySheet, MemoryWorkbook};
//! use fpa_sheets_snapshot::SnapshotStore;
//! use fpa_sheets_tools::{ToolCall, ToolData, ToolExecutor};
//!
//! let mut sheet = MemorySheet::new("P&L");
//! sheet.set(0, 0, "Metric");
//! let mut book = MemoryWorkbook::new("model-1", "FY26 Plan");
//! book.add_sheet(sheet);
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut executor = ToolExecutor::new(book, SnapshotStore::new(dir.path()));
//!
//! executor
//!     .execute(ToolCall::ConnectToSpreadsheet { url_or_id: "model-1".into() })
//!     .unwrap();
//! let data = executor.execute(ToolCall::GetSpreadsheetInfo).unwrap();
//! match data {
//!     Some(ToolData::Info(info)) => assert_eq!(info.title, "FY26 Plan"),
//!     other => panic!("expected spreadsheet info, got {other:?}"),
//! }
//! ```
//!
//! [`TabularSource`]: fpa_sheets_core::TabularSource
//! [`SnapshotStore`]: fpa_sheets_snapshot::SnapshotStore

pub mod error;
pub mod exec;
pub mod protocol;

pub use error::{Error, Result};
pub use exec::{serve, ToolExecutor};
pub use protocol::{Request, Response, ToolCall, ToolData, ToolResult};
