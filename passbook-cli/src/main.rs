use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::FmtSubscriber;

use passbook_core::extract::PlainTextExtractor;
use passbook_core::finance::CanonicalTransaction;
use passbook_finance::{CategoryMap, Pipeline, export_cashew_csv};
use passbook_ingest::PdfTextExtractor;

mod config;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "passbook",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PASSBOOK_BUILD_SHA"), ")"),
    about = "Turn payment-app PDF statements into importable transaction CSV"
)]
struct Cli {
    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file (default: ~/.passbook/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a statement PDF and write Cashew-importable CSV
    Convert {
        /// Statement PDF
        pdf: PathBuf,

        /// PDF password (falls back to the env var named in config)
        #[arg(long)]
        password: Option<String>,

        /// Payee -> category CSV (overrides config)
        #[arg(long)]
        categories: Option<PathBuf>,

        /// Output CSV path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse already-extracted statement text
    ParseText {
        /// Text file as produced by a PDF-to-text tool
        text: PathBuf,

        /// Print transactions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = log_filter(cli.verbose, std::env::var("RUST_LOG").ok().as_deref());

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Convert {
            pdf,
            password,
            categories,
            output,
        } => convert(&cfg, &pdf, password, categories, output)?,

        Command::ParseText { text, json } => parse_text(&text, json)?,

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => print!("{}", config::render_config(&cfg)?),
        },
    }

    Ok(())
}

fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `RUST_LOG` directives win over `-v` when present and valid.
fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| {
            EnvFilter::default().add_directive(LevelFilter::from_level(verbosity_level(verbose)).into())
        })
}

fn convert(
    cfg: &Config,
    pdf: &Path,
    password: Option<String>,
    categories: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let data = fs::read(pdf).with_context(|| format!("read {}", pdf.display()))?;
    let password = password.or_else(|| cfg.pdf.password_from_env());

    let category_map = match categories.or_else(|| cfg.export.category_map.clone()) {
        Some(p) => Some(CategoryMap::from_path(&p)?),
        None => None,
    };

    let (txns, report) = Pipeline::default()
        .parse_document(&PdfTextExtractor::new(), &data, password.as_deref())
        .with_context(|| format!("processing {}", pdf.display()))?;

    if txns.is_empty() {
        eprintln!("No transactions found in {} ({} records seen)", pdf.display(), report.records);
        return Ok(());
    }

    let summary = match &output {
        Some(path) => {
            let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
            export_cashew_csv(&txns, category_map.as_ref(), file)?
        }
        None => export_cashew_csv(&txns, category_map.as_ref(), std::io::stdout().lock())?,
    };

    eprintln!(
        "Processed {} transactions from {} ({} rows written, {} skipped)",
        txns.len(),
        pdf.display(),
        summary.written,
        summary.skipped
    );
    if let Some(path) = output {
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}

fn parse_text(path: &Path, json: bool) -> Result<()> {
    let data = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let (txns, report) = Pipeline::default()
        .parse_document(&PlainTextExtractor, &data, None)
        .with_context(|| format!("processing {}", path.display()))?;

    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &txns).context("serialize transactions")?;
        writeln!(out)?;
    } else {
        for t in &txns {
            writeln!(out, "{}", table_row(t))?;
        }
    }

    eprintln!(
        "Parsed {} transactions from {} records ({} dropped)",
        txns.len(),
        report.records,
        report.dropped
    );
    Ok(())
}

fn table_row(t: &CanonicalTransaction) -> String {
    let sign = if t.is_incoming() { "+" } else { "-" };
    format!(
        "{} {} | {}{:>12} | {} | {}",
        t.date, t.time, sign, t.amount, t.payee, t.note
    )
}
