//! # goloc
//!
//! A CLI tool for measuring Go source trees: code, error handling, comments,
//! blank lines, and nesting depth.
//!
//! ## Overview
//!
//! goloc is built on top of goloclib and provides a command-line interface
//! for analyzing Go codebases. Besides the usual line buckets it reports how
//! many lines are spent inside `if err != nil` blocks and where the deepest
//! nesting sits.
//!
//! ## Usage
//!
//! ```bash
//! # Measure the current directory
//! goloc
//!
//! # Per-file breakdown, tests included
//! goloc ./service --by-file --include-tests
//!
//! # Per-directory breakdown as JSON
//! goloc . --by-dir --output json
//!
//! # Plain text, no terminal styling
//! goloc . --output text
//!
//! # Filter files with glob patterns
//! goloc . --include "**/pkg/**" --exclude "**/generated/**"
//! ```
//!
//! A `goloc.toml` in the analyzed directory is picked up automatically;
//! command-line flags are layered on top of it.

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use goloclib::{count_directory, Aggregation, Config, MetricsTable};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use render::{parse_output_mode, OUTPUT_MODES};

/// Environment variable that overrides the `-v` log level.
const LOG_ENV: &str = "GOLOC_LOG";

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("goloc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Go source metrics: code, error checks, comments, blanks and nesting depth")
        .arg(
            Arg::new("path")
                .help("Path to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Load this config file instead of <PATH>/goloc.toml"),
        )
        .arg(
            Arg::new("include-tests")
                .long("include-tests")
                .action(ArgAction::SetTrue)
                .help("Count *_test.go files"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files and directories matching glob pattern"),
        )
        .arg(
            Arg::new("exclude-file")
                .long("exclude-file")
                .value_name("PATH")
                .action(ArgAction::Append)
                .help("Skip this file (can be specified multiple times)"),
        )
        .arg(
            Arg::new("exclude-dir")
                .long("exclude-dir")
                .value_name("PATH")
                .action(ArgAction::Append)
                .help("Skip this directory (can be specified multiple times)"),
        )
        .arg(
            Arg::new("by-dir")
                .short('d')
                .long("by-dir")
                .action(ArgAction::SetTrue)
                .conflicts_with("by-file")
                .help("Show breakdown by directory"),
        )
        .arg(
            Arg::new("by-file")
                .short('f')
                .long("by-file")
                .action(ArgAction::SetTrue)
                .help("Show breakdown by file"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(OUTPUT_MODES)
                .default_value("auto")
                .help("Output mode: auto, term, text, term-debug or json"),
        )
        .arg(
            Arg::new("keep-going")
                .short('k')
                .long("keep-going")
                .action(ArgAction::SetTrue)
                .help("Skip files that fail to scan instead of aborting"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
}

/// Install the stderr log subscriber.
///
/// `GOLOC_LOG` wins when set; otherwise the level follows `-v`.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Extract a repeatable string flag
fn extract_many<T: From<String>>(matches: &ArgMatches, id: &str) -> Vec<T> {
    matches
        .get_many::<String>(id)
        .map(|v| v.cloned().map(T::from).collect())
        .unwrap_or_default()
}

/// Load the explicit config, or discover one next to the analyzed path.
fn load_config(matches: &ArgMatches, path: &Path) -> anyhow::Result<Config> {
    if let Some(config_path) = matches.get_one::<String>("config") {
        return Ok(Config::load(config_path)?);
    }

    let dir = if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path
    };
    Ok(Config::discover(dir)?.unwrap_or_default())
}

/// Layer command-line flags over the config: lists append, switches enable.
fn apply_flags(mut config: Config, matches: &ArgMatches) -> Config {
    config.include_tests |= matches.get_flag("include-tests");
    config.keep_going |= matches.get_flag("keep-going");
    config.include.extend(extract_many::<String>(matches, "include"));
    config.exclude.extend(extract_many::<String>(matches, "exclude"));
    config
        .exclude_files
        .extend(extract_many::<PathBuf>(matches, "exclude-file"));
    config
        .exclude_dirs
        .extend(extract_many::<PathBuf>(matches, "exclude-dir"));
    config
}

fn aggregation(matches: &ArgMatches) -> Aggregation {
    if matches.get_flag("by-file") {
        Aggregation::ByFile
    } else if matches.get_flag("by-dir") {
        Aggregation::ByDirectory
    } else {
        Aggregation::Total
    }
}

/// Handler for the count run
fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let path = PathBuf::from(
        matches
            .get_one::<String>("path")
            .map(|s| s.as_str())
            .unwrap_or("."),
    );
    let output_mode = parse_output_mode(
        matches
            .get_one::<String>("output")
            .map(|s| s.as_str())
            .unwrap_or("auto"),
    );

    let config = apply_flags(load_config(matches, &path)?, matches);
    debug!(?config, "effective configuration");

    let aggregation = aggregation(matches);
    let options = config.count_options()?.aggregation(aggregation);

    let result = count_directory(&path, &options)
        .with_context(|| format!("failed to measure {}", path.display()))?;

    let table = MetricsTable::from_count_result(&result, aggregation);
    render::render_table(&table, output_mode)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(matches.get_count("verbose"));

    match run(&matches) {
        Ok(output) => {
            println!("{}", output.trim_end_matches('\n'));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
