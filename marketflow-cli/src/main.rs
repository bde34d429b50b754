//! MarketFlow CLI: evaluate cached snapshots and inspect the monitor universe.
//!
//! Commands:
//! - `evaluate`: compute indicator records and breadth from a `data.json` snapshot
//! - `universe`: print the effective universe configuration as TOML

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use marketflow_core::{CellTier, Column, IndicatorRecord};
use marketflow_runner::{evaluate_snapshot, Breadth, MonitorConfig, Snapshot, SnapshotReport};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "marketflow",
    about = "MarketFlow CLI: market monitor indicator engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a snapshot of chart payloads keyed by symbol.
    Evaluate {
        /// Path to the snapshot JSON (symbol → chart payload).
        #[arg(long)]
        input: PathBuf,

        /// Monitor config (TOML). Defaults to the built-in universe.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write output to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the effective universe as TOML.
    Universe {
        /// Monitor config (TOML). Defaults to the built-in universe.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            input,
            config,
            format,
            output,
        } => run_evaluate(&input, config.as_deref(), format, output.as_deref()),
        Commands::Universe { config } => run_universe(config.as_deref()),
    }
}

fn run_evaluate(
    input: &Path,
    config_path: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let config = MonitorConfig::load_or_default(config_path).context("loading monitor config")?;
    let snapshot = Snapshot::from_file(input)?;
    tracing::info!(
        path = %input.display(),
        symbols = snapshot.len(),
        "snapshot loaded"
    );

    let report = evaluate_snapshot(&snapshot, &config.universe);
    let breadth = report.breadth(&config);

    let rendered = match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "report": report,
                "breadth": breadth,
            });
            serde_json::to_string_pretty(&value)?
        }
        OutputFormat::Table => render_table(&report, &config, breadth.as_ref()),
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Output written to: {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn run_universe(config_path: Option<&Path>) -> Result<()> {
    let config = MonitorConfig::load_or_default(config_path).context("loading monitor config")?;
    println!("{}", config.universe.to_toml()?);
    println!(
        "# {} sections, {} symbols",
        config.universe.sections.len(),
        config.universe.symbol_count()
    );
    Ok(())
}

/// Two decimals, or whole units with thousands separators from 10000 up.
fn fmt_price(price: f64) -> String {
    if price < 10_000.0 {
        return format!("{price:.2}");
    }
    let digits = format!("{price:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Signed percentage, e.g. `+1.23%`; `--` when absent.
fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{v:.2}%"),
        Some(v) => format!("{v:.2}%"),
        None => "--".to_string(),
    }
}

fn tier_marker(tier: CellTier) -> &'static str {
    match tier {
        CellTier::StrongPositive => "^^",
        CellTier::Positive => "^",
        CellTier::Neutral => "",
        CellTier::Negative => "v",
        CellTier::StrongNegative => "vv",
    }
}

/// Percentage cell with its heat-map marker.
fn pct_cell(record: &IndicatorRecord, column: Column) -> String {
    let value = record.value(column);
    format!("{}{}", fmt_pct(value), tier_marker(column.tier(value)))
}

fn render_row(out: &mut String, name: &str, symbol: &str, record: Option<&IndicatorRecord>) {
    let _ = match record {
        Some(r) => writeln!(
            out,
            "  {:<22} {:<9} {:>10} {:>10} {:>10} {:>10} {:>10} {:>3} {:>3}",
            name,
            symbol,
            fmt_price(r.price),
            pct_cell(r, Column::PctChange),
            pct_cell(r, Column::Wtd),
            pct_cell(r, Column::Mtd),
            pct_cell(r, Column::Ytd),
            r.st_flow.label,
            r.lt_flow.label,
        ),
        None => writeln!(out, "  {:<22} {:<9} {:>10}", name, symbol, "no data"),
    };
}

fn render_table(report: &SnapshotReport, config: &MonitorConfig, breadth: Option<&Breadth>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dataset: {}", report.dataset_hash);

    for section in &config.universe.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", section.title);
        let _ = writeln!(
            out,
            "  {:<22} {:<9} {:>10} {:>10} {:>10} {:>10} {:>10} {:>3} {:>3}",
            "Name", "Symbol", "Price", "%Chg", "WTD", "MTD", "YTD", "ST", "LT"
        );
        for item in &section.items {
            render_row(&mut out, &item.name, &item.symbol, report.record(&item.symbol));
        }
    }

    let _ = writeln!(out);
    match breadth {
        Some(b) => {
            let _ = writeln!(
                out,
                "Breadth ({}): {}  adv {:.1}%  decl {:.1}%  STICK {:.2}  STRIN {:.2}",
                config.breadth.section,
                b.label.title(),
                b.adv_pct,
                b.decl_pct,
                b.stick,
                b.strin
            );
        }
        None => {
            let _ = writeln!(out, "Breadth ({}): no data", config.breadth.section);
        }
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(out, "Skipped: {} symbol(s)", report.skipped.len());
    }

    out
}
