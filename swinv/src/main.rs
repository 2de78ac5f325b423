use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use swinv_inventory::{self, render, PublisherFilter, SystemRegistry};
use tracing_subscriber::EnvFilter;

/// List installed software with optional filtering by publisher.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Only include software whose publisher contains KEYWORD (case-insensitive),
    /// e.g. '-f Microsoft'.
    #[arg(short, long, value_name = "KEYWORD")]
    filter: Option<String>,

    /// Exclude software whose publisher contains KEYWORD (case-insensitive),
    /// e.g. '-e Microsoft'.
    #[arg(short, long, value_name = "KEYWORD")]
    exclude: Option<String>,

    /// Save the list as CSV to PATH instead of printing it.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the list as a JSON array.
    #[arg(long, conflicts_with = "output")]
    json: bool,

    /// Pretty-print the JSON output.
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Log verbosity. RUST_LOG takes precedence when set.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    // stdout carries the inventory itself
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    initialize_tracing(args.log_level);

    // Validate before the registry is touched.
    let filter = PublisherFilter::from_keywords(args.filter, args.exclude)?;
    tracing::debug!(?filter, "publisher filter");

    let registry = SystemRegistry::new();
    let records = swinv_inventory::collect_installed_software(&registry, &filter)
        .context("failed to list installed software")?;

    if let Some(path) = args.output {
        render::write_csv_file(&records, &path)?;
        println!("Output saved to {}", path.display());
    } else if args.json {
        render::write_json(&records, io::stdout().lock(), args.pretty)?;
    } else {
        render::write_console(&records, io::stdout().lock())
            .context("failed to write to stdout")?;
    }

    Ok(())
}
