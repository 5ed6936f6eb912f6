//! # fpa-sheets-snapshot
//!
//! Capture model metrics as immutable snapshots and diff them later.
//!
//! A [`Snapshot`] records, per named line and month, four metric series
//! (revenue, COGS, CAC, CAC-adjusted gross margin) plus a total series and
//! an optional breakeven month. [`SnapshotStore`] persists each snapshot as
//! one JSON file named by a timestamp-derived id; [`diff_snapshots`] aligns
//! two snapshots on their common months and reports what changed.
//!
//! ## Example
//!
//! ```rust
//! use fpa_sheets_snapshot::{diff_snapshots, LineSeries, Metrics, SnapshotStore};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = SnapshotStore::new(dir.path());
//!
//! let mut metrics = Metrics::default();
//! metrics.months = vec!["Jan'26".into(), "Feb'26".into()];
//! metrics.by_line.insert(
//!     "SaaS".into(),
//!     LineSeries {
//!         gm_adj: vec![100.0, 200.0],
//!         ..LineSeries::default()
//!     },
//! );
//!
//! let before = store.save("base case", "sheet-id", "Model", metrics.clone()).unwrap();
//! metrics.by_line.get_mut("SaaS").unwrap().gm_adj[1] = 250.0;
//! let after = store.save("after CAC cut", "sheet-id", "Model", metrics).unwrap();
//!
//! let diff = diff_snapshots(&before, &after);
//! assert!(diff.line_diffs.contains_key("SaaS"));
//! ```

pub mod diff;
pub mod error;
pub mod model;
pub mod store;

pub use diff::{diff_snapshots, SeriesDiff, SnapshotDiff, SnapshotRef};
pub use error::{Error, Result};
pub use model::{LineSeries, Metric, Metrics, Snapshot, SnapshotSummary};
pub use store::SnapshotStore;
