//! Compose command implementation

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use thiserror::Error;

use super::{Cli, EXIT_ERROR, EXIT_SUCCESS};
use crate::color::ColorError;
use crate::config::{check_config, load_config, merge_cli_overrides, CliOverrides, ConfigError};
use crate::error::PanelError;
use crate::output::{save_png, OutputError};
use crate::panel::compose;
use crate::sheet::SpriteSheet;
use crate::token::parse_instructions;

const PROMPT: &str = "Enter instructions: ";

/// Any failure that aborts a run
#[derive(Debug, Error)]
pub(crate) enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read instructions: {0}")]
    Prompt(#[source] io::Error),
    #[error("Invalid background color: {0}")]
    Background(#[from] ColorError),
    #[error(transparent)]
    Panel(#[from] PanelError),
    #[error("Failed to save panel: {0}")]
    Output(#[from] OutputError),
}

/// Compose a panel from the CLI tokens (or a prompted line) and save it.
pub fn run_compose(cli: &Cli) -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    match compose_and_save(cli, &mut stdin.lock(), &mut stdout.lock()) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn compose_and_save(
    cli: &Cli,
    input: &mut impl BufRead,
    prompt_out: &mut impl Write,
) -> Result<(), RunError> {
    let mut config = load_config(cli.config.as_deref())?;
    merge_cli_overrides(
        &mut config,
        &CliOverrides {
            sheet: cli.sheet.clone(),
            output: cli.output.clone(),
            overflow: cli.overflow,
            background: cli.background.clone(),
        },
    );
    check_config(&config)?;
    let panel_config = &config.panel;
    let options = panel_config.compose_options()?;

    let sheet = SpriteSheet::open_with_grid(&panel_config.sheet, panel_config.grid)?;

    let line = if cli.tokens.is_empty() {
        read_instructions(input, prompt_out).map_err(RunError::Prompt)?
    } else {
        cli.tokens.join(" ")
    };
    let tokens = parse_instructions(&line).map_err(PanelError::from)?;
    log::info!("Composing {} instruction(s)", tokens.len());

    let panel = compose(&sheet, &tokens, &options)?;
    save_png(&panel, &panel_config.output)?;
    Ok(())
}

/// Prompt for a single line of instructions.
///
/// End of input before any line is an error, so a closed stdin never
/// replaces an existing panel with a blank one.
fn read_instructions(input: &mut impl BufRead, prompt_out: &mut impl Write) -> io::Result<String> {
    write!(prompt_out, "{}", PROMPT)?;
    prompt_out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input at prompt"));
    }
    Ok(line)
}
