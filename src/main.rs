use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rowstore::{Repl, Table};

/// A persistent single-table record store fronted by a line-oriented shell.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the backing database file (created if absent)
    db_path: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let table = match Table::open(&cli.db_path) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut repl = Repl::new(table);
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = repl.run(&mut stdin.lock(), &mut stdout.lock()) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
