//! Snapshot records and their metric payload

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four fixed per-line metrics, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Revenue
    Rev,
    /// Cost of goods sold
    Cogs,
    /// Customer acquisition cost
    Cac,
    /// CAC-adjusted gross margin
    GmAdj,
}

impl Metric {
    /// All metrics in reporting order
    pub const ALL: [Metric; 4] = [Metric::Rev, Metric::Cogs, Metric::Cac, Metric::GmAdj];

    /// The snake_case name used in snapshot files
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Rev => "rev",
            Metric::Cogs => "cogs",
            Metric::Cac => "cac",
            Metric::GmAdj => "gm_adj",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One line's four metric series, each positionally aligned to the snapshot's
/// month sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    #[serde(default)]
    pub rev: Vec<f64>,
    #[serde(default)]
    pub cogs: Vec<f64>,
    #[serde(default)]
    pub cac: Vec<f64>,
    #[serde(default)]
    pub gm_adj: Vec<f64>,
}

impl LineSeries {
    /// The series for one metric
    pub fn series(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Rev => &self.rev,
            Metric::Cogs => &self.cogs,
            Metric::Cac => &self.cac,
            Metric::GmAdj => &self.gm_adj,
        }
    }
}

/// The metrics payload of a snapshot
///
/// `months` carries its own significant order (fiscal sequence, not
/// alphabetical); every series is positionally aligned to it. All fields
/// default when absent from a stored file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub months: Vec<String>,
    #[serde(default)]
    pub by_line: BTreeMap<String, LineSeries>,
    #[serde(default)]
    pub total_gm_adj: Vec<f64>,
    /// Month label at which the model crosses breakeven, if it does
    #[serde(default)]
    pub breakeven: Option<String>,
    #[serde(default)]
    pub breakeven_threshold: Option<f64>,
}

/// An immutable captured snapshot
///
/// `id`, `label`, and `created_at` are required identity fields; a stored
/// file missing any of them fails to load. Everything else defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub label: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub spreadsheet_title: String,
    #[serde(default)]
    pub metrics: Metrics,
}

/// Listing entry for one stored snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub id: String,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub spreadsheet_title: String,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metric_names_match_the_file_schema() {
        let names: Vec<_> = Metric::ALL.iter().map(Metric::name).collect();
        assert_eq!(names, vec!["rev", "cogs", "cac", "gm_adj"]);
        assert_eq!(serde_json::to_string(&Metric::GmAdj).unwrap(), "\"gm_adj\"");
    }

    #[test]
    fn metric_order_is_reporting_order() {
        let mut map: BTreeMap<Metric, u32> = BTreeMap::new();
        for (i, m) in Metric::ALL.into_iter().enumerate() {
            map.insert(m, i as u32);
        }
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, Metric::ALL.to_vec());
    }

    #[test]
    fn snapshot_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "20260825_120000_0000",
            "label": "base case",
            "created_at": "2026-08-25T12:00:00Z"
        }"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.label, "base case");
        assert!(snap.metrics.months.is_empty());
        assert!(snap.metrics.by_line.is_empty());
        assert_eq!(snap.metrics.breakeven, None);
    }

    #[test]
    fn snapshot_requires_identity_fields() {
        let json = r#"{"label": "no id", "created_at": "2026-08-25T12:00:00Z"}"#;
        assert!(serde_json::from_str::<Snapshot>(json).is_err());
    }

    #[test]
    fn line_series_tolerates_partial_metrics() {
        let line: LineSeries = serde_json::from_str(r#"{"gm_adj": [1.0, 2.0]}"#).unwrap();
        assert_eq!(line.gm_adj, vec![1.0, 2.0]);
        assert!(line.rev.is_empty());
        assert_eq!(line.series(Metric::GmAdj), &[1.0, 2.0]);
        assert_eq!(line.series(Metric::Cac), &[] as &[f64]);
    }
}
