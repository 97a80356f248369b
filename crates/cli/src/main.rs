use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::{Cli, Command};
use filetab_runtime::logging;

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Query(args) => commands::query::run(args),
        Command::Glob(args) => commands::glob::run(args),
    }
}
