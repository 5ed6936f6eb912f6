//! Month-aligned snapshot diffing
//!
//! Two snapshots rarely cover the same month span, so the diff aligns both
//! sides on the months they share before comparing anything. Alignment is
//! positional: a value is looked up through its own snapshot's month order,
//! and anything a side cannot supply becomes a null placeholder rather than
//! an error.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{Metric, Snapshot};

/// Identity of one side of a diff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRef {
    pub id: String,
    pub label: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Snapshot> for SnapshotRef {
    fn from(snapshot: &Snapshot) -> Self {
        SnapshotRef {
            id: snapshot.id.clone(),
            label: snapshot.label.clone(),
            created_at: snapshot.created_at,
        }
    }
}

/// Before/after/delta for one series over the common months
///
/// `delta` is after minus before, rounded to 2 decimal places; a null on
/// either side propagates to a null delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDiff {
    pub before: Vec<Option<f64>>,
    pub after: Vec<Option<f64>>,
    pub delta: Vec<Option<f64>>,
}

impl SeriesDiff {
    fn new(before: Vec<Option<f64>>, after: Vec<Option<f64>>) -> Self {
        let delta = before
            .iter()
            .zip(&after)
            .map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => Some(round2(b - a)),
                _ => None,
            })
            .collect();
        SeriesDiff { before, after, delta }
    }
}

/// What changed between two snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    pub from: SnapshotRef,
    pub to: SnapshotRef,
    /// Months common to both snapshots, in the `from` snapshot's order
    pub months: Vec<String>,
    /// Only lines where some metric actually changed, and under each line
    /// only the changed metrics
    pub line_diffs: BTreeMap<String, BTreeMap<Metric, SeriesDiff>>,
    /// Always present, changed or not
    pub total_gm_adj: SeriesDiff,
    pub breakeven_before: Option<String>,
    pub breakeven_after: Option<String>,
    /// Carried from the `from` snapshot only; the `to` side's threshold is
    /// never consulted
    pub breakeven_threshold: Option<f64>,
}

/// Compare two snapshots month by month.
///
/// Pure and total: any pair of snapshots diffs without error. Lines are the
/// union of both sides' line names; a line missing from one side aligns to
/// all-null on that side.
pub fn diff_snapshots(from: &Snapshot, to: &Snapshot) -> SnapshotDiff {
    let months_b: BTreeSet<&str> = to.metrics.months.iter().map(String::as_str).collect();
    let months: Vec<String> = from
        .metrics
        .months
        .iter()
        .filter(|m| months_b.contains(m.as_str()))
        .cloned()
        .collect();

    let index_a = month_index(&from.metrics.months);
    let index_b = month_index(&to.metrics.months);
    let align_a = |values: &[f64]| align(values, &index_a, &months);
    let align_b = |values: &[f64]| align(values, &index_b, &months);

    let empty = &[] as &[f64];
    let line_names: BTreeSet<&String> = from
        .metrics
        .by_line
        .keys()
        .chain(to.metrics.by_line.keys())
        .collect();

    let mut line_diffs = BTreeMap::new();
    for line in line_names {
        let la = from.metrics.by_line.get(line);
        let lb = to.metrics.by_line.get(line);

        let mut changed = BTreeMap::new();
        for metric in Metric::ALL {
            let before = align_a(la.map_or(empty, |l| l.series(metric)));
            let after = align_b(lb.map_or(empty, |l| l.series(metric)));
            if before != after {
                changed.insert(metric, SeriesDiff::new(before, after));
            }
        }
        if !changed.is_empty() {
            line_diffs.insert(line.clone(), changed);
        }
    }

    let total_gm_adj = SeriesDiff::new(
        align_a(&from.metrics.total_gm_adj),
        align_b(&to.metrics.total_gm_adj),
    );

    SnapshotDiff {
        from: SnapshotRef::from(from),
        to: SnapshotRef::from(to),
        months,
        line_diffs,
        total_gm_adj,
        breakeven_before: from.metrics.breakeven.clone(),
        breakeven_after: to.metrics.breakeven.clone(),
        breakeven_threshold: from.metrics.breakeven_threshold,
    }
}

fn month_index(months: &[String]) -> AHashMap<&str, usize> {
    months
        .iter()
        .enumerate()
        .map(|(i, m)| (m.as_str(), i))
        .collect()
}

/// Reposition a snapshot-ordered series onto the common-month order; months
/// the series cannot supply become null
fn align(values: &[f64], index: &AHashMap<&str, usize>, common: &[String]) -> Vec<Option<f64>> {
    common
        .iter()
        .map(|month| {
            index
                .get(month.as_str())
                .and_then(|&i| values.get(i).copied())
        })
        .collect()
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
