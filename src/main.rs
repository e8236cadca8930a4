//! hexpanel - Command-line tool for composing opcode icon panels

use std::process::ExitCode;

use hexpanel::cli;

fn main() -> ExitCode {
    cli::run()
}
