//! Whole-spreadsheet auditing built on the per-sheet scanner

use serde::{Deserialize, Serialize};

use fpa_sheets_core::{Result, TabularSource};
use fpa_sheets_scan::{scan_sheet, ScanReport};

/// Scan results for every sheet of a spreadsheet, in tab order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub spreadsheet_title: String,
    pub sheets: Vec<ScanReport>,
}

impl AuditReport {
    /// Total findings across all sheets
    pub fn finding_count(&self) -> usize {
        self.sheets.iter().map(ScanReport::finding_count).sum()
    }

    /// True when every sheet came back clean
    pub fn is_clean(&self) -> bool {
        self.sheets.iter().all(ScanReport::is_clean)
    }
}

/// Extension trait running the anomaly scan over every sheet of a source
pub trait SourceAuditExt {
    /// Scan each sheet named in the source's metadata and collect the
    /// per-sheet reports
    fn audit(&self) -> Result<AuditReport>;
}

impl<S: TabularSource> SourceAuditExt for S {
    fn audit(&self) -> Result<AuditReport> {
        let info = self.metadata()?;
        let mut sheets = Vec::with_capacity(info.sheets.len());
        for name in info.sheet_names() {
            sheets.push(scan_sheet(self, name)?);
        }
        Ok(AuditReport {
            spreadsheet_title: info.title,
            sheets,
        })
    }
}
