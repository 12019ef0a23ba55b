//! Observable shell events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in a shell session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Shell session begins
    ShellStart,
    /// Shell session ends
    ShellExit,

    // Configuration
    /// Configuration read from disk
    ConfigLoaded,
    /// Configuration written to disk
    ConfigSaved,

    // Commands
    /// Built-in command passed validation and was routed
    CommandDispatched,
    /// Built-in command rejected or failed
    CommandRejected,

    // Queries
    /// Query text executed by the database
    QueryExecuted,
    /// Database reported an error for query text
    QueryFailed,

    // Sessions
    /// Database opened or created
    SessionOpened,
    /// Database closed
    SessionClosed,
    /// Database file removed
    DatabaseDeleted,
}

impl Event {
    /// Returns the event name as it appears in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ShellStart => "SHELL_START",
            Event::ShellExit => "SHELL_EXIT",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ConfigSaved => "CONFIG_SAVED",
            Event::CommandDispatched => "COMMAND_DISPATCHED",
            Event::CommandRejected => "COMMAND_REJECTED",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryFailed => "QUERY_FAILED",
            Event::SessionOpened => "SESSION_OPENED",
            Event::SessionClosed => "SESSION_CLOSED",
            Event::DatabaseDeleted => "DATABASE_DELETED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake_case() {
        let events = [
            Event::ShellStart,
            Event::ShellExit,
            Event::ConfigLoaded,
            Event::ConfigSaved,
            Event::CommandDispatched,
            Event::CommandRejected,
            Event::QueryExecuted,
            Event::QueryFailed,
            Event::SessionOpened,
            Event::SessionClosed,
            Event::DatabaseDeleted,
        ];
        for event in events {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
            assert_eq!(event.to_string(), name);
        }
    }
}
