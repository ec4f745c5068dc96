use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Stage delimited files for idempotent table imports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import a CSV file into a table store, refusing content that was already imported
    Import(ImportArgs),
    /// Show the inferred schema and the first typed rows of a CSV file
    Preview(PreviewArgs),
    /// Print the content fingerprint of a CSV file
    Fingerprint(FingerprintArgs),
}

// Options shared by every command that parses a source file.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Input CSV file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Field delimiter (literal text, or one of 'comma', 'tab', 'pipe', 'semicolon')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<String>,
    /// Separator used to derive the table name from the file name
    #[arg(long)]
    pub separator: Option<String>,
    /// YAML file providing `delimiter` and `separator` defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Directory holding one `<table>.jsonl` file per table
    #[arg(short = 'd', long = "store", required_unless_present = "dry_run")]
    pub store: Option<PathBuf>,
    /// Target table (derived from the file name when omitted)
    #[arg(short, long)]
    pub table: Option<String>,
    /// Parse and stage in memory without writing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Number of typed rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct FingerprintArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn parse_delimiter(value: &str) -> Result<String, String> {
    let resolved = match value {
        "tab" | "\\t" => "\t",
        "comma" => ",",
        "pipe" => "|",
        "semicolon" => ";",
        other => other,
    };
    if resolved.is_empty() {
        return Err("Delimiter cannot be empty".to_string());
    }
    Ok(resolved.to_string())
}
