//! CLI argument definitions using clap
//!
//! Commands:
//! - sqlshell [interactive]
//! - sqlshell exec <LINE>...

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::observability::Severity;

/// sqlshell - A simple interactive shell for SQLite databases
#[derive(Parser, Debug)]
#[command(name = "sqlshell")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding sqlshell.json
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    /// Lowest severity written to the JSON log on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Error)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start an interactive session (the default)
    Interactive,

    /// Run lines through the shell without a terminal, then exit
    Exec {
        /// Commands and statements, one per argument
        #[arg(required = true, allow_hyphen_values = true)]
        lines: Vec<String>,
    },
}

/// Log level names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Info,
    Warn,
    Error,
    Fatal,
}

impl From<LogLevel> for Severity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Severity::Trace,
            LogLevel::Info => Severity::Info,
            LogLevel::Warn => Severity::Warn,
            LogLevel::Error => Severity::Error,
            LogLevel::Fatal => Severity::Fatal,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
