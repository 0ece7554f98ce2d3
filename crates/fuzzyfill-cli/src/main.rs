//! fuzzyfill command-line tool.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use fuzzyfill_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use fuzzyfill_cli::commands::{run_fill, run_hours, run_types};
use fuzzyfill_cli::logging::{LogConfig, LogFormat, init_logging};
use fuzzyfill_cli::summary::{print_fill_summary, print_hours_summary, print_scorers, print_types};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Fill(args) => run_fill(args).map(|outcome| print_fill_summary(&outcome)),
        Command::Hours(args) => run_hours(args).map(|outcome| print_hours_summary(&outcome)),
        Command::Types(args) => run_types(args).map(|outcome| print_types(&outcome)),
        Command::Scorers => {
            print_scorers();
            Ok(())
        }
    };
    if let Err(error) = result {
        tracing::error!("{error:#}");
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Builds the logging configuration; `--log-level` beats `-v/-q`, and either
/// one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
