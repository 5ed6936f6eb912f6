//! End-to-end tool dispatch against an in-memory workbook

use std::io::Cursor;
use std::time::Duration;

use pretty_assertions::assert_eq;

use fpa_sheets_core::{Cell, MemorySheet, MemoryWorkbook};
use fpa_sheets_snapshot::{LineSeries, Metrics, SnapshotStore};
use fpa_sheets_tools::{serve, Request, Response, ToolCall, ToolData, ToolExecutor};

fn workbook() -> MemoryWorkbook {
    let mut sheet = MemorySheet::new("P&L");
    sheet.set(0, 0, "Metric");
    sheet.set(0, 1, "Jan'26");
    sheet.set(0, 2, "Feb'26");
    sheet.set(1, 0, "Revenue");
    sheet.set_formula(1, 1, "=Inputs!B2", 100.0);
    sheet.set_formula(1, 2, "=B2*1.1", 110.0);
    let mut book = MemoryWorkbook::new("model-1", "FY26 Plan");
    book.add_sheet(sheet);
    book
}

fn executor_at(dir: &std::path::Path) -> ToolExecutor<MemoryWorkbook> {
    ToolExecutor::new(workbook(), SnapshotStore::new(dir))
}

fn connect(executor: &mut ToolExecutor<MemoryWorkbook>) {
    executor
        .execute(ToolCall::ConnectToSpreadsheet {
            url_or_id: "https://docs.google.com/spreadsheets/d/model-1/edit#gid=0".into(),
        })
        .unwrap();
}

fn metrics(months: &[&str], gm_adj: &[f64]) -> Metrics {
    let mut metrics = Metrics::default();
    metrics.months = months.iter().map(|m| m.to_string()).collect();
    metrics.by_line.insert(
        "SaaS".into(),
        LineSeries {
            gm_adj: gm_adj.to_vec(),
            ..LineSeries::default()
        },
    );
    metrics.total_gm_adj = gm_adj.to_vec();
    metrics
}

#[test]
fn connect_resolves_urls_and_returns_info() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = executor_at(dir.path());

    let data = executor
        .execute(ToolCall::ConnectToSpreadsheet {
            url_or_id: "https://docs.google.com/spreadsheets/d/model-1/edit#gid=0".into(),
        })
        .unwrap();
    match data {
        Some(ToolData::Info(info)) => {
            assert_eq!(info.spreadsheet_id, "model-1");
            assert_eq!(info.title, "FY26 Plan");
        }
        other => panic!("expected spreadsheet info, got {other:?}"),
    }
    assert!(executor.connected().is_some());
}

#[test]
fn sheet_tools_refuse_to_run_unconnected() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = executor_at(dir.path());

    let response = executor.handle(Request {
        id: 11,
        call: ToolCall::ReadRange {
            sheet_name: "P&L".into(),
            range: "A1:C2".into(),
        },
    });
    assert_eq!(response.id, 11);
    match response.result {
        fpa_sheets_tools::ToolResult::Error { message } => {
            assert!(message.contains("No spreadsheet connected"), "{message}");
        }
        other => panic!("expected an error reply, got {other:?}"),
    }
}

#[test]
fn read_range_returns_display_values() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = executor_at(dir.path());
    connect(&mut executor);

    let data = executor
        .execute(ToolCall::ReadRange {
            sheet_name: "P&L".into(),
            range: "A2:C2".into(),
        })
        .unwrap();
    match data {
        Some(ToolData::Grid(grid)) => {
            assert_eq!(
                grid.rows(),
                &[vec![
                    Cell::text("Revenue"),
                    Cell::Number(100.0),
                    Cell::Number(110.0)
                ]]
            );
        }
        other => panic!("expected a grid, got {other:?}"),
    }
}

#[test]
fn read_formulas_returns_formula_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = executor_at(dir.path());
    connect(&mut executor);

    let data = executor
        .execute(ToolCall::ReadFormulas {
            sheet_name: "P&L".into(),
            range: "B2:C2".into(),
        })
        .unwrap();
    match data {
        Some(ToolData::Grid(grid)) => {
            assert_eq!(grid.cell(0, 0), &Cell::text("=Inputs!B2"));
            assert_eq!(grid.cell(0, 1), &Cell::text("=B2*1.1"));
        }
        other => panic!("expected a grid, got {other:?}"),
    }
}

#[test]
fn write_then_read_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = executor_at(dir.path());
    connect(&mut executor);

    let data = executor
        .execute(ToolCall::WriteRange {
            sheet_name: "P&L".into(),
            range: "B3".into(),
            values: vec![vec![Cell::Number(42.0), Cell::text("note")]],
        })
        .unwrap();
    match data {
        Some(ToolData::Write(summary)) => assert_eq!(summary.updated_cells, 2),
        other => panic!("expected a write summary, got {other:?}"),
    }

    let read = executor
        .execute(ToolCall::ReadRange {
            sheet_name: "P&L".into(),
            range: "B3:C3".into(),
        })
        .unwrap();
    match read {
        Some(ToolData::Grid(grid)) => {
            assert_eq!(
                grid.rows(),
                &[vec![Cell::Number(42.0), Cell::text("note")]]
            );
        }
        other => panic!("expected a grid, got {other:?}"),
    }
}

#[test]
fn format_range_with_no_options_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = executor_at(dir.path());
    connect(&mut executor);

    let err = executor
        .execute(ToolCall::FormatRange {
            sheet_name: "P&L".into(),
            range: "B2:C2".into(),
            number_format: None,
            bold: None,
            font_family: None,
            font_size: None,
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "No formatting options provided");
}

#[test]
fn set_freeze_lands_on_the_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = executor_at(dir.path());
    connect(&mut executor);

    let data = executor
        .execute(ToolCall::SetFreeze {
            sheet_name: "P&L".into(),
            rows: 1,
            columns: 1,
        })
        .unwrap();
    assert!(data.is_none());

    let sheet = executor.source().sheet("P&L").unwrap();
    assert_eq!(sheet.frozen_rows, 1);
    assert_eq!(sheet.frozen_columns, 1);
}

#[test]
fn scan_sheet_reports_anomalies_through_the_tool_surface() {
    let mut sheet = MemorySheet::new("Model");
    sheet.set(0, 0, "Metric");
    sheet.set(1, 0, "Margin");
    sheet.set_formula(1, 1, "=B2/B3", 0.4);
    sheet.set_formula(1, 2, "=C2/C3", "#DIV/0!");
    sheet.set_formula(1, 3, "=D2/D3", 0.5);
    let mut book = MemoryWorkbook::new("model-1", "FY26 Plan");
    book.add_sheet(sheet);

    let dir = tempfile::tempdir().unwrap();
    let mut executor = ToolExecutor::new(book, SnapshotStore::new(dir.path()));
    connect(&mut executor);

    let data = executor
        .execute(ToolCall::ScanSheet {
            sheet_name: "Model".into(),
        })
        .unwrap();
    match data {
        Some(ToolData::Scan(report)) => {
            assert_eq!(report.errors.len(), 1);
            assert_eq!(report.errors[0].cell, "C2");
            assert_eq!(report.errors[0].error, "#DIV/0!");
            assert_eq!(report.errors[0].row_label, "Margin");
        }
        other => panic!("expected a scan report, got {other:?}"),
    }
}

#[test]
fn snapshots_save_list_and_diff_through_the_tool_surface() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = executor_at(dir.path());
    connect(&mut executor);

    let first = executor
        .execute(ToolCall::SaveSnapshot {
            label: "base case".into(),
            metrics: metrics(&["Jan'26", "Feb'26"], &[100.0, 200.0]),
        })
        .unwrap();
    let first_id = match first {
        Some(ToolData::Snapshot(snapshot)) => {
            assert_eq!(snapshot.label, "base case");
            assert_eq!(snapshot.spreadsheet_id, "model-1");
            assert_eq!(snapshot.spreadsheet_title, "FY26 Plan");
            snapshot.id
        }
        other => panic!("expected a snapshot, got {other:?}"),
    };

    // ids have 100us resolution; keep the second save on a later tick
    std::thread::sleep(Duration::from_millis(2));

    let second = executor
        .execute(ToolCall::SaveSnapshot {
            label: "after CAC cut".into(),
            metrics: metrics(&["Jan'26", "Feb'26"], &[100.0, 250.0]),
        })
        .unwrap();
    let second_id = match second {
        Some(ToolData::Snapshot(snapshot)) => snapshot.id,
        other => panic!("expected a snapshot, got {other:?}"),
    };

    let listing = executor.execute(ToolCall::ListSnapshots).unwrap();
    match listing {
        Some(ToolData::Snapshots(summaries)) => {
            assert_eq!(summaries.len(), 2);
            assert_eq!(summaries[0].id, second_id);
            assert_eq!(summaries[1].id, first_id);
        }
        other => panic!("expected snapshot summaries, got {other:?}"),
    }

    let diff = executor
        .execute(ToolCall::DiffSnapshots {
            from_id: first_id,
            to_id: second_id,
        })
        .unwrap();
    match diff {
        Some(ToolData::Diff(diff)) => {
            assert_eq!(diff.months, vec!["Jan'26", "Feb'26"]);
            assert_eq!(
                diff.total_gm_adj.delta,
                vec![Some(0.0), Some(50.0)]
            );
            assert!(diff.line_diffs.contains_key("SaaS"));
        }
        other => panic!("expected a diff, got {other:?}"),
    }
}

#[test]
fn loading_a_missing_snapshot_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = executor_at(dir.path());

    let response = executor.handle(Request {
        id: 6,
        call: ToolCall::LoadSnapshot {
            snapshot_id: "20990101_000000_0000".into(),
        },
    });
    match response.result {
        fpa_sheets_tools::ToolResult::Error { message } => {
            assert!(message.contains("not found"), "{message}");
        }
        other => panic!("expected an error reply, got {other:?}"),
    }
}

#[test]
fn serve_answers_each_line_and_survives_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let mut executor = executor_at(dir.path());

    let input = concat!(
        r#"{"id": 1, "tool": "connect_to_spreadsheet", "params": {"url_or_id": "model-1"}}"#,
        "\n",
        "this is not json\n",
        "\n",
        r#"{"id": 2, "tool": "get_spreadsheet_info"}"#,
        "\n",
    );
    let mut output = Vec::new();
    serve(&mut executor, Cursor::new(input), &mut output).unwrap();

    let lines: Vec<Response> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);

    assert_eq!(lines[0].id, 1);
    assert!(lines[0].result.is_ok());

    assert_eq!(lines[1].id, 0);
    match &lines[1].result {
        fpa_sheets_tools::ToolResult::Error { message } => {
            assert!(message.starts_with("Malformed request"), "{message}");
        }
        other => panic!("expected an error reply, got {other:?}"),
    }

    assert_eq!(lines[2].id, 2);
    match &lines[2].result {
        fpa_sheets_tools::ToolResult::Ok {
            data: Some(ToolData::Info(info)),
        } => assert_eq!(info.title, "FY26 Plan"),
        other => panic!("expected spreadsheet info, got {other:?}"),
    }
}
