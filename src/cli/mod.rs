//! CLI module for sqlshell
//!
//! Provides command-line interface for:
//! - interactive: Terminal session with line editing and history
//! - exec: Run lines given as arguments, then exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, LogLevel};
pub use commands::{exec, exec_to, interactive, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
