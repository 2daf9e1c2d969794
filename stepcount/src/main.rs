//! # stepcount
//!
//! A CLI tool for counting physical lines and code steps in a source tree.
//!
//! ## Overview
//!
//! stepcount is built on top of stepcountlib. For every file under the given
//! path it reports the line count and the step count (lines holding real
//! code rather than only whitespace or comments), in walk order.
//!
//! ## Usage
//!
//! ```bash
//! # Count the current directory
//! stepcount
//!
//! # Output as JSON
//! stepcount src --output json
//!
//! # Per-language totals
//! stepcount . --by-language
//!
//! # Filter files with glob patterns, skip extra extensions
//! stepcount . --exclude "**/build/**" --ignore .log
//!
//! # Try EUC-JP before UTF-8, scan on 4 threads, keep the per-line trace
//! stepcount . --encoding euc-jp,utf-8 --jobs 4 --trace trace.txt
//! ```

mod render;

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use stepcountlib::{count_directory, CountOptions, FilterConfig, ReportTable, ScanConfig};
use tracing::info;

/// Widest cell before truncation
const MAX_CELL_WIDTH: usize = 60;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("stepcount")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count physical lines and code steps in a source tree")
        .arg(
            Arg::new("path")
                .help("File or directory to analyze (defaults to current directory)")
                .default_value("."),
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
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("ignore")
                .long("ignore")
                .value_name("EXT")
                .action(ArgAction::Append)
                .help("Skip files with this extension, e.g. .log (adds to .dat, .ini)"),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .value_name("LABEL")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .help("Candidate encodings in order (default: utf-8,shift_jis,gb2312)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("by-language")
                .long("by-language")
                .action(ArgAction::SetTrue)
                .help("Show totals per language instead of per file"),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .value_name("FILE")
                .help("Write the per-line classification trace to FILE"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_parser(value_parser!(usize))
                .default_value("1")
                .help("Number of worker threads"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> anyhow::Result<FilterConfig> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Build decoding and dispatch settings from matches
fn build_scan_config(matches: &ArgMatches) -> ScanConfig {
    let mut scan = ScanConfig::new();

    if let Some(labels) = matches.get_many::<String>("encoding") {
        scan = scan.encodings(labels.filter(|l| !l.trim().is_empty()).cloned());
    }

    if let Some(extensions) = matches.get_many::<String>("ignore") {
        for extension in extensions {
            scan = scan.ignore(extension.clone());
        }
    }

    scan
}

fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let trace_path = matches.get_one::<String>("trace");
    let jobs = matches.get_one::<usize>("jobs").copied().unwrap_or(1);

    let options = CountOptions::new()
        .filter(build_filter(matches)?)
        .scan_config(build_scan_config(matches))
        .trace(trace_path.is_some())
        .jobs(jobs);

    let result = count_directory(path, &options)?;

    info!(
        files = result.summary.files,
        lines = result.summary.lines,
        steps = result.summary.steps,
        skipped = result.summary.skipped,
        errors = result.summary.errors,
        "count finished"
    );

    if let Some(trace_path) = trace_path {
        fs::write(trace_path, result.trace.as_deref().unwrap_or_default())
            .with_context(|| format!("failed to write trace file '{trace_path}'"))?;
    }

    let by_language = matches.get_flag("by-language");

    if matches.get_one::<String>("output").map(String::as_str) == Some("json") {
        let json = if by_language {
            serde_json::to_string_pretty(&result.by_language())?
        } else {
            serde_json::to_string_pretty(&result)?
        };
        println!("{json}");
    } else {
        let table = if by_language {
            ReportTable::by_language(&result)
        } else {
            ReportTable::from_count_result(&result)
        };
        print!("{}", render::render_table(&table, MAX_CELL_WIDTH));
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
