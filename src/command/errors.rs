//! Command error types
//!
//! Every error here is recoverable: the dispatcher prints it as an
//! `Error: ...` diagnostic and the session continues.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::database::DatabaseError;

/// Result type for command operations
pub type CommandResult<T> = Result<T, CommandError>;

/// Ways a parameter list can violate a command's arity contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArityViolation {
    #[error("incorrect number of positional parameters. The current command uses {expected}, and there are {actual} supplied")]
    Positional { expected: usize, actual: usize },

    #[error("incorrect number of named parameters. The current command uses {expected}, and there are {actual} supplied")]
    Named { expected: usize, actual: usize },

    #[error("incorrect number of positional parameters. The current command uses at least one (the script to execute), and there are none supplied")]
    MissingScript,

    #[error("incorrect number of parameters. No parameters are expected after '?'")]
    TrailingAfterQuery,
}

/// Command errors
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("malformed quoting in command - {0}")]
    Syntax(String),

    #[error("{0}")]
    Arity(#[from] ArityViolation),

    #[error("command not found - {0}")]
    UnknownCommand(String),

    /// A named parameter had no `:key` placeholder. `partial` holds the
    /// template text as it stood when substitution stopped.
    #[error("named parameter '{key}' supplied but not required")]
    UnresolvedParameter { key: String, partial: String },

    #[error("{0} positional placeholder(s) in the script have no parameter")]
    UnresolvedPlaceholder(usize),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Environment(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl CommandError {
    /// Stable code used in structured logs
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Syntax(_) => "SHELL_SYNTAX",
            CommandError::Arity(_) => "SHELL_ARITY",
            CommandError::UnknownCommand(_) => "SHELL_UNKNOWN_COMMAND",
            CommandError::UnresolvedParameter { .. } => "SHELL_UNRESOLVED_PARAMETER",
            CommandError::UnresolvedPlaceholder(_) => "SHELL_UNRESOLVED_PLACEHOLDER",
            CommandError::InvalidArgument(_) => "SHELL_INVALID_ARGUMENT",
            CommandError::Environment(_) => "SHELL_ENVIRONMENT",
            CommandError::Database(_) => "SHELL_DATABASE",
        }
    }
}

impl From<io::Error> for CommandError {
    fn from(e: io::Error) -> Self {
        CommandError::Environment(e.to_string())
    }
}

impl From<ConfigError> for CommandError {
    fn from(e: ConfigError) -> Self {
        CommandError::Environment(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_message_names_counts() {
        let e = CommandError::from(ArityViolation::Positional {
            expected: 1,
            actual: 0,
        });
        assert_eq!(
            e.to_string(),
            "incorrect number of positional parameters. The current command uses 1, and there are 0 supplied"
        );
        assert_eq!(e.code(), "SHELL_ARITY");
    }

    #[test]
    fn test_unresolved_parameter_message_hides_partial() {
        let e = CommandError::UnresolvedParameter {
            key: "x".into(),
            partial: "SELECT 1".into(),
        };
        assert_eq!(e.to_string(), "named parameter 'x' supplied but not required");
    }
}
