//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ikd",
    version,
    about = "Index Kit Studio - Normalize sequencing index kit tables to JSON",
    long_about = "Load an index kit table from CSV, XLSX, or an Illumina index kit\n\
                  definition file, map its columns onto a declarative kit layout,\n\
                  validate the barcode data, and export a normalized JSON description."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert an index table to the normalized JSON description.
    Convert(ConvertArgs),

    /// List the kit types of the layout catalog.
    KitTypes(KitTypesArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Input table (CSV/TSV, XLSX, or Illumina index kit definition).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Kit type from the layout catalog to reconcile against.
    #[arg(long = "kit-type", value_name = "NAME")]
    pub kit_type: String,

    /// Source format (auto-detected from extension and content when omitted).
    #[arg(long = "format", value_enum)]
    pub format: Option<SourceFormatArg>,

    /// Map a canonical field onto a column, as FIELD=COLUMN where COLUMN is
    /// a 0-based index or a current column label. Repeatable.
    #[arg(long = "assign", value_name = "FIELD=COLUMN")]
    pub assign: Vec<String>,

    /// Index kit name (no whitespace).
    #[arg(long)]
    pub name: Option<String>,

    /// Human-readable kit name.
    #[arg(long = "display-name")]
    pub display_name: Option<String>,

    /// Kit version, up to three dot-separated numbers.
    #[arg(long = "kit-version", value_name = "VERSION")]
    pub kit_version: Option<String>,

    /// Free-text kit description.
    #[arg(long)]
    pub description: Option<String>,

    /// Adapter sequence trimmed from read 1.
    #[arg(long = "adapter-read1", value_name = "SEQ")]
    pub adapter_read1: Option<String>,

    /// Adapter sequence trimmed from read 2.
    #[arg(long = "adapter-read2", value_name = "SEQ")]
    pub adapter_read2: Option<String>,

    /// Override-cycles slots as R1,I1,I2,R2 (e.g. Y151,I8,I8,Y151).
    /// Index slots left empty are derived from the mapped sequence columns.
    #[arg(long = "override-cycles", value_name = "R1,I1,I2,R2")]
    pub override_cycles: Option<String>,

    /// Operator recorded in the export document.
    #[arg(long, value_name = "NAME")]
    pub user: Option<String>,

    /// Alternative kit layout catalog file.
    #[arg(long = "layouts", value_name = "PATH")]
    pub layouts: Option<PathBuf>,

    /// Output path (default: INPUT with a .json extension).
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Validate and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct KitTypesArgs {
    /// Alternative kit layout catalog file.
    #[arg(long = "layouts", value_name = "PATH")]
    pub layouts: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceFormatArg {
    Delimited,
    Spreadsheet,
    Illumina,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
