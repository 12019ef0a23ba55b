//! Shell loop errors
//!
//! Only terminal I/O, configuration persistence and startup failures
//! end the loop. Command and query errors are printed and never reach
//! this type.

use std::io;

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::command::RegistryError;
use crate::config::ConfigError;

/// Result type for the shell loop
pub type ShellResult<T> = Result<T, ShellError>;

/// Shell loop errors
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("terminal error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("output error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid command registry: {0}")]
    Registry(#[from] RegistryError),
}
