//! CLI command implementations
//!
//! Both commands build the same shell: configuration loaded from the
//! configuration directory, an SQLite session, and stdout for output.
//! They differ only in where lines come from.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::config::ShellConfig;
use crate::database::SqliteSession;
use crate::observability::Logger;
use crate::shell::{EditorInput, ScriptedInput, Shell};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    Logger::set_min_severity(cli.log_level.into());
    run_command(&cli.config_dir, cli.command.unwrap_or(Command::Interactive))
}

/// Run the appropriate command based on CLI args
pub fn run_command(config_dir: &Path, cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Interactive => interactive(config_dir),
        Command::Exec { lines } => exec(config_dir, &lines),
    }
}

/// Start an interactive session on the terminal
pub fn interactive(config_dir: &Path) -> CliResult<()> {
    let mut shell = open_shell(config_dir, io::stdout())?;
    let mut input =
        EditorInput::new().map_err(|e| CliError::terminal_error(e.to_string()))?;
    shell.run(&mut input)?;
    Ok(())
}

/// Run `lines` through a session, writing to stdout
pub fn exec(config_dir: &Path, lines: &[String]) -> CliResult<()> {
    exec_to(config_dir, lines, io::stdout())?;
    Ok(())
}

/// Run `lines` through a session, writing to `out`. Returns `out`.
pub fn exec_to<W: Write>(config_dir: &Path, lines: &[String], out: W) -> CliResult<W> {
    let mut shell = open_shell(config_dir, out)?;
    let mut input = ScriptedInput::new(lines.iter().cloned());
    shell.run(&mut input)?;
    Ok(shell.into_output())
}

/// Load configuration and build a shell over an SQLite session.
///
/// The configuration directory is made absolute first: the shell
/// changes the working directory at startup and on `.cwd`.
fn open_shell<W: Write>(config_dir: &Path, out: W) -> CliResult<Shell<SqliteSession, W>> {
    let dir = fs::canonicalize(config_dir).map_err(|e| {
        CliError::config_error(format!(
            "Invalid configuration directory {:?}: {}",
            config_dir, e
        ))
    })?;
    let config = ShellConfig::load_or_create(&dir)?;

    Shell::new(config, SqliteSession::new(), out)
        .map_err(|e| CliError::startup_failed(e.to_string()))
}
