//! On-disk snapshot storage
//!
//! One JSON file per snapshot, named `<id>.json`, under a fixed per-user
//! directory (`~/.fpa-sheets/snapshots` by default). Ids are derived from
//! the creation timestamp, so lexical filename order is creation order.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::model::{Metrics, Snapshot, SnapshotSummary};

/// Directory under the home directory holding snapshot files
const DEFAULT_SUBDIR: &str = ".fpa-sheets/snapshots";

/// Length of a snapshot id: date, time, and four fractional-second digits
const ID_LEN: usize = 20;

/// A directory of snapshot files
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Store rooted at an explicit directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SnapshotStore { dir: dir.into() }
    }

    /// Store rooted at the per-user default, `~/.fpa-sheets/snapshots`
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
        Ok(SnapshotStore {
            dir: home.join(DEFAULT_SUBDIR),
        })
    }

    /// The directory this store reads and writes
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path a given id maps to
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Capture and persist a snapshot, creating the storage directory on
    /// first use. Returns the stored record, whose id names the file.
    ///
    /// Ids are timestamp-derived and sortable, not guaranteed unique: two
    /// saves within the same fraction of a second collide, last writer wins.
    pub fn save(
        &self,
        label: &str,
        spreadsheet_id: &str,
        spreadsheet_title: &str,
        metrics: Metrics,
    ) -> Result<Snapshot> {
        fs::create_dir_all(&self.dir)?;

        let now = Utc::now();
        let snapshot = Snapshot {
            id: generate_id(now),
            label: label.to_string(),
            created_at: now,
            spreadsheet_id: spreadsheet_id.to_string(),
            spreadsheet_title: spreadsheet_title.to_string(),
            metrics,
        };

        let path = self.path_for(&snapshot.id);
        fs::write(&path, serde_json::to_string_pretty(&snapshot)?)?;
        tracing::debug!(id = %snapshot.id, path = %path.display(), "snapshot saved");
        Ok(snapshot)
    }

    /// Summaries of every stored snapshot, newest first
    pub fn list(&self) -> Result<Vec<SnapshotSummary>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") {
                names.push(name);
            }
        }
        names.sort_unstable_by(|a, b| b.cmp(a));

        let mut summaries = Vec::with_capacity(names.len());
        for name in names {
            let path = self.dir.join(&name);
            let snapshot: Snapshot = serde_json::from_str(&fs::read_to_string(&path)?)?;
            summaries.push(SnapshotSummary {
                id: snapshot.id,
                label: snapshot.label,
                created_at: snapshot.created_at,
                spreadsheet_title: snapshot.spreadsheet_title,
                path,
            });
        }
        Ok(summaries)
    }

    /// Load a snapshot by id
    pub fn load(&self, id: &str) -> Result<Snapshot> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(Error::NotFound {
                id: id.to_string(),
                dir: self.dir.clone(),
            });
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

/// Timestamp-derived id: `YYYYmmdd_HHMMSS_` plus four fractional digits
fn generate_id(now: DateTime<Utc>) -> String {
    let mut id = now.format("%Y%m%d_%H%M%S_%f").to_string();
    id.truncate(ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineSeries;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample_metrics() -> Metrics {
        let mut metrics = Metrics {
            months: vec!["Jan'26".into(), "Feb'26".into()],
            total_gm_adj: vec![50.0, 150.0],
            breakeven: Some("Feb'26".into()),
            breakeven_threshold: Some(175_000.0),
            ..Metrics::default()
        };
        metrics.by_line.insert(
            "SaaS".into(),
            LineSeries {
                rev: vec![100.0, 200.0],
                cogs: vec![30.0, 60.0],
                cac: vec![20.0, 20.0],
                gm_adj: vec![50.0, 120.0],
            },
        );
        metrics
    }

    #[test]
    fn id_is_twenty_chars_and_sortable() {
        let t = Utc.with_ymd_and_hms(2026, 8, 25, 14, 35, 12).unwrap()
            + chrono::Duration::microseconds(264_901);
        let id = generate_id(t);
        assert_eq!(id, "20260825_143512_2649");
        assert_eq!(id.len(), ID_LEN);

        let later = generate_id(t + chrono::Duration::seconds(1));
        assert!(later > id);
    }

    #[test]
    fn save_creates_the_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path().join("nested/snapshots"));
        let snap = store
            .save("base case", "sheet-1", "Model", sample_metrics())
            .unwrap();
        assert!(store.path_for(&snap.id).is_file());
    }

    #[test]
    fn load_round_trips_the_record() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        let saved = store
            .save("base case", "sheet-1", "Model", sample_metrics())
            .unwrap();

        let loaded = store.load(&saved.id).unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.metrics.by_line["SaaS"].rev, vec![100.0, 200.0]);
    }

    #[test]
    fn load_missing_id_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        assert!(matches!(
            store.load("20990101_000000_0000"),
            Err(Error::NotFound { id, .. }) if id == "20990101_000000_0000"
        ));
    }

    #[test]
    fn list_is_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        // write fixed-id files directly so ordering does not depend on clock
        // resolution between rapid saves
        for (id, label) in [
            ("20260101_090000_0000", "first"),
            ("20260301_090000_0000", "third"),
            ("20260201_090000_0000", "second"),
        ] {
            let snap = Snapshot {
                id: id.into(),
                label: label.into(),
                created_at: Utc::now(),
                spreadsheet_id: "s".into(),
                spreadsheet_title: "Model".into(),
                metrics: Metrics::default(),
            };
            fs::write(
                store.path_for(id),
                serde_json::to_string_pretty(&snap).unwrap(),
            )
            .unwrap();
        }

        let labels: Vec<_> = store.list().unwrap().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["third", "second", "first"]);
    }

    #[test]
    fn list_on_missing_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path().join("never-created"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn list_ignores_non_json_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        store.save("only", "s", "Model", Metrics::default()).unwrap();
        fs::write(tmp.path().join("notes.txt"), "scratch").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].label, "only");
    }
}
