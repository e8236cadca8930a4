//! Command-line interface implementation
//!
//! Parses arguments with clap, sets up logging, and hands off to the
//! compose command.

mod compose;

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::panel::Overflow;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;

/// hexpanel - compose a panel of opcode icons from a 16x16 sprite sheet
#[derive(Parser, Debug)]
#[command(name = "hexpanel")]
#[command(about = "Compose a panel of opcode icons from a 16x16 sprite sheet")]
#[command(version)]
pub struct Cli {
    /// Two-digit hex codes, e.g. `3E 01 C3`.
    /// Prompts for a line on stdin when none are given.
    #[arg(value_name = "TOKENS")]
    pub tokens: Vec<String>,

    /// Sprite sheet image (default: 8080_instruction.png)
    #[arg(long)]
    pub sheet: Option<PathBuf>,

    /// Output image (default: 8080_instruction_panel.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// What to do with cells past the right edge of the panel
    #[arg(long, value_enum)]
    pub overflow: Option<Overflow>,

    /// Panel background color (hex or CSS color name)
    #[arg(long)]
    pub background: Option<String>,

    /// Config file (default: nearest hexpanel.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Initialize env_logger. `RUST_LOG` takes precedence over `--verbose`.
fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let mut logger = env_logger::builder();
    logger.format_timestamp(None);
    logger.filter_module("hexpanel", level);
    logger.parse_default_env();
    // A logger may already be installed when embedded
    let _ = logger.try_init();
}

/// Main CLI entry point
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    compose::run_compose(&cli)
}
