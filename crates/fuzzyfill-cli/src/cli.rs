//! CLI argument definitions for fuzzyfill.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fuzzyfill_map::{DEFAULT_THRESHOLD, Scorer};

#[derive(Parser)]
#[command(
    name = "fuzzyfill",
    version,
    about = "Fill missing values by fuzzy matching against a reference table",
    long_about = "Fill missing values in a target CSV by fuzzy matching a free-text key \
                  against a reference CSV.\n\n\
                  Also assigns hours to work-list rows from type and keyword rules."
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

    /// Allow match keys and row values in trace/debug logs.
    ///
    /// Keys are often personal or company names; without this flag they are
    /// redacted.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill a target column from the best fuzzy match in a reference table.
    Fill(FillArgs),

    /// Assign hours to rows from type and keyword rules.
    Hours(HoursArgs),

    /// List the distinct values of the type column with row counts.
    Types(TypesArgs),

    /// List the available similarity scorers.
    Scorers,
}

#[derive(Parser)]
pub struct FillArgs {
    /// Table whose missing values get filled.
    #[arg(long = "target", value_name = "CSV")]
    pub target: PathBuf,

    /// Table supplying keys and values.
    #[arg(long = "reference", value_name = "CSV")]
    pub reference: PathBuf,

    /// Match key column in the target table.
    #[arg(long = "target-key", value_name = "COLUMN")]
    pub target_key: String,

    /// Match key column in the reference table.
    #[arg(long = "reference-key", value_name = "COLUMN")]
    pub reference_key: String,

    /// Reference column copied into matched target rows.
    #[arg(long = "value", value_name = "COLUMN")]
    pub value: String,

    /// Target column to fill (default: same name as --value).
    #[arg(long = "fill-column", value_name = "COLUMN")]
    pub fill_column: Option<String>,

    /// Minimum score (0-100) a match needs to fill a row.
    #[arg(
        long = "threshold",
        default_value_t = DEFAULT_THRESHOLD,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub threshold: u8,

    /// Similarity scorer (see `fuzzyfill scorers`).
    #[arg(long = "scorer", default_value = "weighted-ratio")]
    pub scorer: Scorer,

    /// Let each reference key fill at most one row.
    #[arg(long = "prevent-duplicates")]
    pub prevent_duplicates: bool,

    /// Read every column as text instead of inferring numeric types.
    #[arg(long = "no-infer-types")]
    pub no_infer_types: bool,

    /// Output CSV (default: <TARGET>_filled.csv next to the target).
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Also write per-row results and the run summary as JSON.
    #[arg(long = "report", value_name = "JSON")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct HoursArgs {
    /// Work list with type and name columns.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// TOML file with `[types]` hours and `[[keywords]]` rules.
    #[arg(long = "rules", value_name = "TOML")]
    pub rules: Option<PathBuf>,

    /// Hours for one type value; repeatable, overrides the rules file.
    #[arg(long = "type-hours", value_name = "TYPE=HOURS", value_parser = parse_assignment)]
    pub type_hours: Vec<(String, f64)>,

    /// Keyword rule; repeatable, applied after the rules file keywords.
    #[arg(long = "keyword", value_name = "KEYWORD=HOURS", value_parser = parse_assignment)]
    pub keywords: Vec<(String, f64)>,

    #[arg(long = "type-column", value_name = "COLUMN", default_value = "Type")]
    pub type_column: String,

    #[arg(long = "name-column", value_name = "COLUMN", default_value = "Name")]
    pub name_column: String,

    #[arg(long = "hours-column", value_name = "COLUMN", default_value = "Hours")]
    pub hours_column: String,

    /// Output CSV (default: data_with_hours.csv next to the input).
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct TypesArgs {
    /// Work list with type and name columns.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[arg(long = "type-column", value_name = "COLUMN", default_value = "Type")]
    pub type_column: String,

    #[arg(long = "name-column", value_name = "COLUMN", default_value = "Name")]
    pub name_column: String,
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

/// Parses `LABEL=HOURS`, splitting on the last `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, f64), String> {
    let (label, hours) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected LABEL=HOURS, got '{raw}'"))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(format!("missing label in '{raw}'"));
    }
    let hours: f64 = hours
        .trim()
        .parse()
        .map_err(|_| format!("invalid hours '{}' in '{raw}'", hours.trim()))?;
    Ok((label.to_string(), hours))
}
