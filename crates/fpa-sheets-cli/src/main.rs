//! fpa-sheets CLI - audit saved workbooks and manage metric snapshots

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fpa_sheets::prelude::*;
use fpa_sheets::{column_to_letters, inspect_sheet_with, DEFAULT_SAMPLE_ROWS};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fpa")]
#[command(author, version, about = "Audit and snapshot FP&A spreadsheet models")]
struct Cli {
    /// Snapshot directory (default: ~/.fpa-sheets/snapshots)
    #[arg(long, env = "FPA_SHEETS_DIR", global = true)]
    snapshot_dir: Option<PathBuf>,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a saved workbook
    Info {
        /// Workbook JSON file
        workbook: PathBuf,
    },

    /// Summarize one sheet's structure
    Inspect {
        /// Workbook JSON file
        workbook: PathBuf,

        /// Sheet (tab) name
        sheet: String,

        /// Rows to sample from the top
        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_ROWS)]
        rows: u32,
    },

    /// Scan one sheet for formula anomalies
    Scan {
        /// Workbook JSON file
        workbook: PathBuf,

        /// Sheet (tab) name
        sheet: String,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scan every sheet of a workbook
    Audit {
        /// Workbook JSON file
        workbook: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage metric snapshots
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommands,
    },

    /// Answer JSON tool calls on stdin until EOF
    Serve {
        /// Workbook JSON file backing the tool calls
        workbook: PathBuf,
    },
}

#[derive(Subcommand)]
enum SnapshotCommands {
    /// Save metrics from a JSON file as a new snapshot
    Save {
        /// Workbook JSON file the metrics came from
        workbook: PathBuf,

        /// Snapshot label, e.g. "before CAC increase"
        label: String,

        /// Metrics JSON file
        #[arg(short, long)]
        metrics: PathBuf,
    },

    /// List stored snapshots, newest first
    List,

    /// Print one stored snapshot as JSON
    Show {
        /// Snapshot id, as printed by `snapshot list`
        id: String,
    },

    /// Compare two stored snapshots month by month
    Diff {
        /// Snapshot id of the before side
        from_id: String,

        /// Snapshot id of the after side
        to_id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(io::stderr)
            .init();
    }

    match cli.command {
        Commands::Info { workbook } => show_info(&workbook),
        Commands::Inspect {
            workbook,
            sheet,
            rows,
        } => inspect(&workbook, &sheet, rows),
        Commands::Scan {
            workbook,
            sheet,
            json,
        } => scan(&workbook, &sheet, json),
        Commands::Audit { workbook, json } => audit_workbook(&workbook, json),
        Commands::Snapshot { command } => {
            let store = open_store(cli.snapshot_dir)?;
            match command {
                SnapshotCommands::Save {
                    workbook,
                    label,
                    metrics,
                } => snapshot_save(&store, &workbook, &label, &metrics),
                SnapshotCommands::List => snapshot_list(&store),
                SnapshotCommands::Show { id } => snapshot_show(&store, &id),
                SnapshotCommands::Diff { from_id, to_id } => {
                    snapshot_diff(&store, &from_id, &to_id)
                }
            }
        }
        Commands::Serve { workbook } => run_serve(&workbook, open_store(cli.snapshot_dir)?),
    }
}

fn open_store(dir: Option<PathBuf>) -> Result<SnapshotStore> {
    match dir {
        Some(dir) => Ok(SnapshotStore::new(dir)),
        None => SnapshotStore::default_location()
            .context("Failed to resolve the snapshot directory"),
    }
}

fn load_workbook(path: &Path) -> Result<MemoryWorkbook> {
    MemoryWorkbook::load_file(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))
}

fn show_info(input: &Path) -> Result<()> {
    let book = load_workbook(input)?;
    let info = book.metadata()?;

    println!("File: {}", input.display());
    println!("Title: \"{}\"", info.title);
    println!("Spreadsheet id: {}", info.spreadsheet_id);
    println!("Sheets: {}", info.sheets.len());

    for sheet in &info.sheets {
        println!();
        println!("  Sheet \"{}\" (id {})", sheet.name, sheet.sheet_id);
        println!(
            "    Grid: {} rows x {} columns",
            sheet.row_count, sheet.column_count
        );
    }

    Ok(())
}

fn inspect(input: &Path, sheet: &str, rows: u32) -> Result<()> {
    let book = load_workbook(input)?;
    let report = inspect_sheet_with(&book, sheet, rows)?;

    println!("Sheet \"{}\"", report.sheet_name);
    println!("  Columns: {}", report.column_count);
    println!("  Estimated data rows: {}", report.estimated_row_count);
    if !report.headers.is_empty() {
        let headers: Vec<String> = report.headers.iter().map(|c| c.to_display()).collect();
        println!("  Headers: {}", headers.join(" | "));
    }
    println!("  Formula columns: {}", column_list(&report.formula_columns));
    println!("  Data columns: {}", column_list(&report.data_columns));

    Ok(())
}

fn column_list(cols: &[u32]) -> String {
    if cols.is_empty() {
        return "none".to_string();
    }
    let letters: Vec<String> = cols.iter().map(|&c| column_to_letters(c)).collect();
    letters.join(", ")
}

fn scan(input: &Path, sheet: &str, json: bool) -> Result<()> {
    let book = load_workbook(input)?;
    let report = scan_sheet(&book, sheet)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_scan_report(&report);

    Ok(())
}

fn print_scan_report(report: &ScanReport) {
    println!(
        "Sheet \"{}\": scanned {} rows x {} columns",
        report.sheet_name, report.rows_scanned, report.cols_scanned
    );

    if report.is_clean() {
        println!("  No anomalies found");
        return;
    }

    if !report.errors.is_empty() {
        println!("  Errors: {}", report.errors.len());
        for finding in &report.errors {
            println!(
                "    {}  [{}] {} from {}",
                finding.cell, finding.row_label, finding.error, finding.formula
            );
        }
    }

    if !report.static_in_formula_rows.is_empty() {
        println!(
            "  Static values in formula rows: {}",
            report.static_in_formula_rows.len()
        );
        for finding in &report.static_in_formula_rows {
            println!(
                "    {}  [{}] literal {}",
                finding.cell, finding.row_label, finding.value
            );
        }
    }

    if !report.pattern_breaks.is_empty() {
        println!("  Pattern breaks: {}", report.pattern_breaks.len());
        for finding in &report.pattern_breaks {
            println!(
                "    {}  [{}] {} (row follows {})",
                finding.cell, finding.row_label, finding.formula, finding.dominant_pattern
            );
        }
    }
}

fn audit_workbook(input: &Path, json: bool) -> Result<()> {
    let book = load_workbook(input)?;
    let report = book.audit()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Workbook \"{}\": {} finding(s) across {} sheet(s)",
        report.spreadsheet_title,
        report.finding_count(),
        report.sheets.len()
    );
    for sheet in &report.sheets {
        println!();
        print_scan_report(sheet);
    }

    Ok(())
}

fn snapshot_save(
    store: &SnapshotStore,
    input: &Path,
    label: &str,
    metrics_path: &Path,
) -> Result<()> {
    let book = load_workbook(input)?;
    let info = book.metadata()?;

    let raw = std::fs::read_to_string(metrics_path)
        .with_context(|| format!("Failed to read '{}'", metrics_path.display()))?;
    let metrics: Metrics = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse metrics from '{}'", metrics_path.display()))?;

    let snapshot = store.save(label, &info.spreadsheet_id, &info.title, metrics)?;
    println!("Saved snapshot {} (\"{}\")", snapshot.id, snapshot.label);

    Ok(())
}

fn snapshot_list(store: &SnapshotStore) -> Result<()> {
    let summaries = store.list()?;
    if summaries.is_empty() {
        println!("No snapshots in '{}'", store.dir().display());
        return Ok(());
    }

    for summary in summaries {
        println!(
            "{}  {}  \"{}\"  {}",
            summary.id,
            summary.created_at.format("%Y-%m-%d %H:%M:%S"),
            summary.label,
            summary.spreadsheet_title
        );
    }

    Ok(())
}

fn snapshot_show(store: &SnapshotStore, id: &str) -> Result<()> {
    let snapshot = store.load(id)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn snapshot_diff(store: &SnapshotStore, from_id: &str, to_id: &str) -> Result<()> {
    let from = store.load(from_id)?;
    let to = store.load(to_id)?;
    let diff = diff_snapshots(&from, &to);

    println!(
        "{} (\"{}\") -> {} (\"{}\")",
        diff.from.id, diff.from.label, diff.to.id, diff.to.label
    );
    if diff.months.is_empty() {
        println!("No months in common");
        return Ok(());
    }
    println!("Months: {}", diff.months.join(", "));

    if diff.line_diffs.is_empty() {
        println!("No line-level changes");
    }
    for (line, metrics) in &diff.line_diffs {
        println!();
        println!("{line}:");
        for (metric, series) in metrics {
            println!("  {:8} {}", metric.name(), format_deltas(&series.delta));
        }
    }

    println!();
    println!(
        "Total GM (CAC-adj): {}",
        format_deltas(&diff.total_gm_adj.delta)
    );
    match (&diff.breakeven_before, &diff.breakeven_after) {
        (Some(before), Some(after)) if before == after => {
            println!("Breakeven: {before} (unchanged)")
        }
        (Some(before), Some(after)) => println!("Breakeven: {before} -> {after}"),
        (Some(before), None) => println!("Breakeven: {before} -> none"),
        (None, Some(after)) => println!("Breakeven: none -> {after}"),
        (None, None) => {}
    }

    Ok(())
}

fn format_deltas(deltas: &[Option<f64>]) -> String {
    let parts: Vec<String> = deltas
        .iter()
        .map(|d| match d {
            Some(d) => format!("{d:+.2}"),
            None => "-".to_string(),
        })
        .collect();
    parts.join(", ")
}

fn run_serve(input: &Path, store: SnapshotStore) -> Result<()> {
    let book = load_workbook(input)?;
    let mut executor = ToolExecutor::new(book, store);

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(&mut executor, stdin.lock(), stdout.lock()).context("Tool serve loop failed")?;

    Ok(())
}
