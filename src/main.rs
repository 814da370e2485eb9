mod cli;
mod config;
mod convert;
mod frequency_cmd;
mod idf_cmd;
mod input;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Frequency(args) => frequency_cmd::run(args),
        Command::Idf(args) => idf_cmd::run(args),
    }
}
