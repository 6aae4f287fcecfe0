//! CLI argument definitions for `blood-report`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "blood-report",
    version,
    about = "Blood report analyzer - extract lab values and flag abnormal findings",
    long_about = "Extract lab parameters from OCR'd blood report text, compare them with \
                  reference ranges, and score disease signatures.\n\n\
                  Output is decision support only, not a diagnosis."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow lab values to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Knowledge directory (default: $LAB_KNOWLEDGE_DIR, then the bundled tables).
    #[arg(long = "knowledge-dir", value_name = "DIR", global = true)]
    pub knowledge_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract lab values from OCR text.
    Extract(ExtractArgs),

    /// Produce the full analysis report.
    Analyze(AnalyzeArgs),

    /// Verify the knowledge tables and print a summary.
    Knowledge(KnowledgeArgs),
}

#[derive(Args)]
pub struct ExtractArgs {
    /// OCR text file; reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// OCR text file; reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT", conflicts_with = "values")]
    pub input: Option<PathBuf>,

    /// JSON object of parameter name to value, used instead of OCR text.
    #[arg(long = "values", value_name = "FILE")]
    pub values: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct KnowledgeArgs {
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
