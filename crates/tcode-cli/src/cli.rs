//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Default project file
pub(crate) const DEFAULT_PROJECT: &str = "tcode.json";

fn column_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).required(true).value_name("COLUMN").help(help)
}

fn tolerance_arg() -> Arg {
    Arg::new("tolerance")
        .long("tolerance")
        .value_name("MS")
        .value_parser(value_parser!(u64))
        .help("Tolerance in milliseconds (defaults to the configured value)")
}

/// Build the `tcode` command
pub(crate) fn build() -> Command {
    Command::new("tcode")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Time-coded column toolkit")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("project")
                .long("project")
                .short('p')
                .global(true)
                .default_value(DEFAULT_PROJECT)
                .value_parser(value_parser!(PathBuf))
                .help("Project file (.json, .yaml, .yml)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (repeatable)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(Command::new("list").about("List columns with their cell counts"))
        .subcommand(
            Command::new("mutex")
                .about("Merge two columns into a mutually exclusive column")
                .arg(column_arg("name", "Output column"))
                .arg(column_arg("a", "First source column"))
                .arg(column_arg("b", "Second source column"))
                .arg(
                    Arg::new("prefix-a")
                        .long("prefix-a")
                        .help("Argument prefix for the first column, used verbatim"),
                )
                .arg(
                    Arg::new("prefix-b")
                        .long("prefix-b")
                        .help("Argument prefix for the second column, used verbatim"),
                ),
        )
        .subcommand(
            Command::new("scan")
                .about("Report malformed and overlapping cells")
                .arg(
                    Arg::new("columns")
                        .required(true)
                        .num_args(1..)
                        .value_name("COLUMN"),
                ),
        )
        .subcommand(
            Command::new("rel")
                .about("Create a reliability column")
                .arg(column_arg("name", "Reliability column to create"))
                .arg(column_arg("source", "Column to copy"))
                .arg(
                    Arg::new("every")
                        .long("every")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Keep cells whose position is a multiple of this"),
                )
                .arg(
                    Arg::new("keep")
                        .long("keep")
                        .action(ArgAction::Append)
                        .value_name("ARG")
                        .help("Argument (or onset/offset) to keep; repeatable"),
                ),
        )
        .subcommand(
            Command::new("rel-blocks")
                .about("Create an empty reliability column with fixed-length blocks")
                .arg(column_arg("name", "Reliability column to create"))
                .arg(column_arg("source", "Column whose schema is copied"))
                .arg(column_arg("binding", "Column whose cells are cut into blocks"))
                .arg(
                    Arg::new("block")
                        .long("block")
                        .required(true)
                        .value_name("MS")
                        .value_parser(value_parser!(u64).range(1..))
                        .help("Block length in milliseconds"),
                )
                .arg(
                    Arg::new("skip")
                        .long("skip")
                        .default_value("1")
                        .value_parser(value_parser!(u32).range(1..))
                        .help("Keep every n-th block of a long cell"),
                ),
        )
        .subcommand(
            Command::new("combine")
                .about("Merge several columns into one mutually exclusive column")
                .arg(column_arg("name", "Output column"))
                .arg(
                    Arg::new("columns")
                        .required(true)
                        .num_args(2..)
                        .value_name("COLUMN"),
                ),
        )
        .subcommand(
            Command::new("check-rel")
                .about("Compare a column with its reliability column")
                .arg(column_arg("main", "Primary column"))
                .arg(column_arg("rel", "Reliability column"))
                .arg(
                    Arg::new("match")
                        .long("match")
                        .required(true)
                        .value_name("ARG")
                        .help("Argument pairing primary and reliability cells"),
                )
                .arg(tolerance_arg()),
        )
        .subcommand(
            Command::new("check-codes")
                .about("Check argument values against allowed codes")
                .arg(column_arg("column", "Column to check"))
                .arg(
                    Arg::new("rule")
                        .long("rule")
                        .required(true)
                        .action(ArgAction::Append)
                        .value_name("ARG=CODES")
                        .help("Allowed codes, e.g. hand=l,r,b; repeatable"),
                ),
        )
        .subcommand(
            Command::new("smooth")
                .about("Close small gaps between consecutive cells")
                .arg(Arg::new("column").required(true).value_name("COLUMN"))
                .arg(tolerance_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Print a column as tab-separated rows")
                .arg(Arg::new("column").required(true).value_name("COLUMN")),
        )
}
