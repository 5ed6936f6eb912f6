//! Save, list, load, diff as one flow against a real directory

use fpa_sheets_snapshot::{diff_snapshots, LineSeries, Metric, Metrics, SnapshotStore};

fn base_metrics() -> Metrics {
    let mut metrics = Metrics {
        months: vec!["Jan'26".into(), "Feb'26".into(), "Mar'26".into()],
        total_gm_adj: vec![-50_000.0, 10_000.0, 90_000.0],
        breakeven: Some("Feb'26".into()),
        breakeven_threshold: Some(175_000.0),
        ..Metrics::default()
    };
    metrics.by_line.insert(
        "SaaS".into(),
        LineSeries {
            rev: vec![100_000.0, 120_000.0, 150_000.0],
            cogs: vec![20_000.0, 24_000.0, 30_000.0],
            cac: vec![130_000.0, 86_000.0, 30_000.0],
            gm_adj: vec![-50_000.0, 10_000.0, 90_000.0],
        },
    );
    metrics
}

#[test]
fn captured_snapshots_diff_after_a_reload() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());

    let before = store
        .save("base case", "sheet-1", "FY26 Model", base_metrics())
        .unwrap();

    // ids have 100us resolution; keep the second save on a later tick
    std::thread::sleep(std::time::Duration::from_millis(2));

    let mut adjusted = base_metrics();
    let saas = adjusted.by_line.get_mut("SaaS").unwrap();
    saas.cac[2] = 20_000.0;
    saas.gm_adj[2] = 100_000.0;
    adjusted.total_gm_adj[2] = 100_000.0;
    let after = store
        .save("after CAC cut", "sheet-1", "FY26 Model", adjusted)
        .unwrap();

    // both ids resolve through the store again
    let before = store.load(&before.id).unwrap();
    let after = store.load(&after.id).unwrap();

    let diff = diff_snapshots(&before, &after);
    assert_eq!(diff.from.label, "base case");
    assert_eq!(diff.to.label, "after CAC cut");
    assert_eq!(diff.months, vec!["Jan'26", "Feb'26", "Mar'26"]);

    let saas = &diff.line_diffs["SaaS"];
    assert_eq!(saas[&Metric::Cac].delta, vec![Some(0.0), Some(0.0), Some(-10_000.0)]);
    assert_eq!(saas[&Metric::GmAdj].delta, vec![Some(0.0), Some(0.0), Some(10_000.0)]);
    assert!(!saas.contains_key(&Metric::Rev));
    assert_eq!(
        diff.total_gm_adj.delta,
        vec![Some(0.0), Some(0.0), Some(10_000.0)]
    );
    assert_eq!(diff.breakeven_threshold, Some(175_000.0));
}

#[test]
fn listing_reflects_saved_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save("base case", "sheet-1", "FY26 Model", base_metrics()).unwrap();

    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].label, "base case");
    assert_eq!(listed[0].spreadsheet_title, "FY26 Model");
    assert!(listed[0].path.is_file());
}

#[test]
fn snapshot_files_follow_the_documented_schema() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let saved = store
        .save("base case", "sheet-1", "FY26 Model", base_metrics())
        .unwrap();

    let raw = std::fs::read_to_string(store.path_for(&saved.id)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["id"], saved.id.as_str());
    assert_eq!(json["label"], "base case");
    assert_eq!(json["spreadsheet_id"], "sheet-1");
    assert_eq!(json["metrics"]["months"][0], "Jan'26");
    assert_eq!(json["metrics"]["by_line"]["SaaS"]["gm_adj"][0], -50_000.0);
    assert_eq!(json["metrics"]["breakeven"], "Feb'26");
    assert_eq!(json["metrics"]["breakeven_threshold"], 175_000.0);
}
