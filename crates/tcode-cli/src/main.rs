//! `tcode` command line

mod cli;
mod telemetry;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::ArgMatches;
use std::path::PathBuf;
use std::process::ExitCode;
use tcode_mutex::{later_overlapping_cells, scan_for_bad_cells};
use tcode_script::{CodeRule, ScriptConfig, Session};
use tcode_store::{ColumnStore, FileStore};

fn main() -> ExitCode {
    let matches = cli::build().get_matches();
    telemetry::init(matches.get_count("verbose"), matches.get_flag("log-json"));

    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn open_session(matches: &ArgMatches) -> Result<Session<FileStore>> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ScriptConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScriptConfig::default(),
    };
    let project = matches
        .get_one::<PathBuf>("project")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(cli::DEFAULT_PROJECT));
    let store = FileStore::open(&project)
        .with_context(|| format!("opening project {}", project.display()))?;
    Ok(Session::with_config(store, config))
}

/// Required string argument; clap enforces presence
fn required<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a str> {
    args.get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("missing --{id}"))
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let session = open_session(matches)?;

    match matches.subcommand() {
        Some(("list", _)) => {
            for name in session.column_names() {
                let column = session.store().load_column(&name)?;
                println!("{name}\t{}\t{}", column.kind(), column.len());
            }
        }
        Some(("mutex", args)) => {
            let name = required(args, "name")?;
            let outcome = session
                .create_mutually_exclusive(
                    name,
                    required(args, "a")?,
                    required(args, "b")?,
                    args.get_one::<String>("prefix-a").map(String::as_str),
                    args.get_one::<String>("prefix-b").map(String::as_str),
                )
                .with_context(|| format!("creating mutex column '{name}'"))?;
            println!(
                "Created column '{name}' with {} cells",
                outcome.report.cells_created
            );
        }
        Some(("scan", args)) => {
            let mut faulty = false;
            for name in args.get_many::<String>("columns").into_iter().flatten() {
                let column = session.get_column(name)?;
                for diagnostic in scan_for_bad_cells(&column) {
                    faulty = true;
                    println!("{diagnostic}");
                }
                for interval in later_overlapping_cells(&column) {
                    println!(
                        "cell {} in column '{name}' overlaps the previous cell ({}-{})",
                        interval.ordinal(),
                        interval.onset(),
                        interval.offset()
                    );
                }
            }
            if faulty {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(("rel", args)) => {
            let name = required(args, "name")?;
            let every = args.get_one::<u32>("every").copied().unwrap_or(1);
            let keep: Vec<&String> = args.get_many::<String>("keep").into_iter().flatten().collect();
            let rel = session.make_reliability(name, required(args, "source")?, every, keep.as_slice())?;
            println!("Created reliability column '{name}' with {} cells", rel.len());
        }
        Some(("rel-blocks", args)) => {
            let name = required(args, "name")?;
            let out = session.make_duration_block_reliability(
                name,
                required(args, "source")?,
                required(args, "binding")?,
                args.get_one::<u64>("block").copied().unwrap_or(1),
                args.get_one::<u32>("skip").copied().unwrap_or(1),
            )?;
            println!(
                "Created reliability column '{name}' and '{}' with {} blocks",
                out.blocks.name(),
                out.blocks.len()
            );
        }
        Some(("combine", args)) => {
            let name = required(args, "name")?;
            let sources: Vec<&String> = args.get_many::<String>("columns").into_iter().flatten().collect();
            let combined = session
                .combine_columns(name, sources.as_slice())
                .with_context(|| format!("combining into '{name}'"))?;
            println!("Created column '{name}' with {} cells", combined.len());
        }
        Some(("check-rel", args)) => {
            let report = session.check_reliability(
                required(args, "main")?,
                required(args, "rel")?,
                required(args, "match")?,
                args.get_one::<u64>("tolerance").copied(),
            )?;
            print!("{report}");
        }
        Some(("check-codes", args)) => {
            let rules = args
                .get_many::<String>("rule")
                .into_iter()
                .flatten()
                .map(|rule| rule.parse::<CodeRule>())
                .collect::<Result<Vec<_>, _>>()?;
            let violations = session.check_valid_codes(required(args, "column")?, &rules)?;
            for violation in &violations {
                println!("{violation}");
            }
            if violations.is_empty() {
                println!("No errors found.");
            } else {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(("smooth", args)) => {
            let name = required(args, "column")?;
            let moved = session.smooth_column(name, args.get_one::<u64>("tolerance").copied())?;
            println!("Smoothed '{name}': {moved} onsets moved");
        }
        Some(("export", args)) => {
            let column = session.get_column(required(args, "column")?)?;
            print!("{}", column.to_tsv());
        }
        _ => {
            let err = cli::build().error(ErrorKind::MissingSubcommand, "a command is required");
            return Err(err.into());
        }
    }

    Ok(ExitCode::SUCCESS)
}
