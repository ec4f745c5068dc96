pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod fingerprint;
pub mod importer;
pub mod io_utils;
pub mod preview;
pub mod rows;
pub mod schema;
pub mod sink;
pub mod store;
pub mod table;
pub mod tokenizer;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{Cli, Commands, SourceArgs},
    config::ImportConfig,
    importer::CsvImport,
    sink::MemorySink,
    store::JsonLinesStore,
};

pub use crate::{
    error::ImportError,
    fingerprint::Fingerprint,
    importer::{ImportState, ImportSummary},
    sink::{ImportRecord, InsertOutcome, TableSink},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_mapper", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Import(args) => handle_import(&args),
        Commands::Preview(args) => preview::execute(&args),
        Commands::Fingerprint(args) => handle_fingerprint(&args),
    }
}

/// Resolves the import options for `args` and parses the source file.
///
/// Command-line values win over the config file, which wins over defaults.
pub(crate) fn load_source(args: &SourceArgs) -> Result<CsvImport> {
    let base = match &args.config {
        Some(path) => {
            ImportConfig::load(path).with_context(|| format!("Loading config from {path:?}"))?
        }
        None => ImportConfig::default(),
    };
    let config = base.with_overrides(args.separator.as_deref(), args.delimiter.as_deref());
    debug!("Resolved import config: {:?}", config);
    info!(
        "Reading '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(&config.delimiter)
    );
    CsvImport::load(&args.input, config).with_context(|| format!("Loading {:?}", args.input))
}

fn handle_import(args: &cli::ImportArgs) -> Result<()> {
    let mut import = load_source(&args.source)?;
    let table = args.table.as_deref();
    let summary = match (&args.store, args.dry_run) {
        (Some(root), false) => {
            let mut store = JsonLinesStore::open(root)?;
            import.execute(&mut store, table)
        }
        _ => {
            info!("Dry run: staging records in memory only");
            let mut sink = MemorySink::new();
            import.execute(&mut sink, table)
        }
    }
    .with_context(|| format!("Importing {:?}", args.source.input))?;
    println!(
        "Imported {} row(s) into '{}' (fingerprint {})",
        summary.rows, summary.table, summary.fingerprint
    );
    Ok(())
}

fn handle_fingerprint(args: &cli::FingerprintArgs) -> Result<()> {
    let import = load_source(&args.source)?;
    println!("{}", import.fingerprint());
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: &str) -> String {
    match delimiter {
        "\t" => "\\t".to_string(),
        "\n" => "\\n".to_string(),
        other => other.to_string(),
    }
}
