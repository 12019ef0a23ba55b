//! CLI-specific error types
//!
//! A CLI error ends the process with a non-zero exit code. Errors inside
//! a running session never get this far.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::shell::ShellError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration directory or file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Terminal could not be initialized or read
    TerminalError,
    /// Shell could not be started
    StartupFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SHELL_CLI_CONFIG_ERROR",
            Self::IoError => "SHELL_CLI_IO_ERROR",
            Self::TerminalError => "SHELL_CLI_TERMINAL_ERROR",
            Self::StartupFailed => "SHELL_CLI_STARTUP_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Terminal error
    pub fn terminal_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::TerminalError, msg)
    }

    /// Startup failed
    pub fn startup_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StartupFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<ShellError> for CliError {
    fn from(e: ShellError) -> Self {
        match e {
            ShellError::Readline(e) => Self::terminal_error(e.to_string()),
            ShellError::Io(e) => Self::io_error(e.to_string()),
            ShellError::Config(e) => Self::config_error(e.to_string()),
            ShellError::Registry(e) => Self::startup_failed(e.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
