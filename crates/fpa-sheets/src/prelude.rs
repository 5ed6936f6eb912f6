//! Prelude module - common imports for fpa-sheets users
//!
//! ```rust
//! use fpa_sheets::prelude::*;
//! ```

pub use crate::{
    // Audit types
    AuditReport,
    // Cell types
    Cell,
    // Addressing
    CellRef,
    diff_snapshots,
    // Error types
    Error,
    Grid,
    inspect_sheet,
    InspectReport,
    LineSeries,
    // In-memory backend
    MemorySheet,
    MemoryWorkbook,
    Metric,
    Metrics,
    RangeRef,
    Result,
    scan_sheet,
    // Scanner types
    Scanner,
    ScanReport,
    serve,
    // Metadata
    SheetInfo,
    // Snapshot types
    Snapshot,
    SnapshotDiff,
    SnapshotStore,
    SourceAuditExt,
    SpreadsheetInfo,
    // The backend trait
    TabularSource,
    // Tool-call surface
    ToolCall,
    ToolExecutor,
};
