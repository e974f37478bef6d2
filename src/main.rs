//! Retheme - Command-line tool for re-theming share-grid emoji game results

use std::process::ExitCode;

use retheme::cli;

fn main() -> ExitCode {
    cli::run()
}
