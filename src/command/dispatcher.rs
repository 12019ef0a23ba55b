//! Command dispatcher
//!
//! Flow for a parsed built-in command:
//! 1. Look the name up in the registry
//! 2. Validate arity; on failure nothing runs
//! 3. Immediate commands run their handler
//! 4. Templated commands instantiate their template
//!
//! Every error is printed as a diagnostic to the context's output and
//! the session carries on.

use std::io::Write;

use crate::config::ShellConfig;
use crate::database::Session;
use crate::observability::{Event, Logger};

use super::errors::{ArityViolation, CommandError};
use super::handlers::{self, Outcome, QUERY_MARKER};
use super::parser::ParsedCommand;
use super::registry::{Arity, CommandKind, CommandRegistry, RegistryError};
use super::template::{instantiate, PlaceholderPolicy};

/// Everything a command may act on
pub struct Context<'a, S: Session> {
    pub config: &'a mut ShellConfig,
    pub session: &'a mut S,
    /// User-facing messages and diagnostics
    pub out: &'a mut dyn Write,
}

/// Result of dispatching one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// Query text for the database. Empty if instantiation failed.
    QueryText(String),
    /// Nothing to execute
    NoOp,
    /// No such command
    NotFound,
    /// The session should end
    Exit,
}

/// Validate a parameter list against an arity contract
pub fn check_arity(arity: Arity, parsed: &ParsedCommand) -> Result<(), ArityViolation> {
    let positionals = &parsed.positionals;
    match arity {
        Arity::Exactly(expected) => {
            if positionals.len() != expected {
                return Err(ArityViolation::Positional {
                    expected,
                    actual: positionals.len(),
                });
            }
            if !parsed.named.is_empty() {
                return Err(ArityViolation::Named {
                    expected: 0,
                    actual: parsed.named.len(),
                });
            }
            Ok(())
        }
        Arity::Script => {
            if positionals.is_empty() {
                return Err(ArityViolation::MissingScript);
            }
            let viewing = positionals.get(1).is_some_and(|p| p.is_text(QUERY_MARKER));
            if viewing && parsed.parameter_count() > 2 {
                return Err(ArityViolation::TrailingAfterQuery);
            }
            Ok(())
        }
    }
}

/// Routes parsed commands through the registry
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: CommandRegistry,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    /// Dispatcher over the built-in command table
    pub fn with_builtins() -> Result<Self, RegistryError> {
        Ok(Self::new(CommandRegistry::builtin()?))
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Dispatch one parsed command
    pub fn dispatch<S: Session>(
        &self,
        parsed: &ParsedCommand,
        ctx: &mut Context<'_, S>,
    ) -> DispatchResult {
        let Some(spec) = self.registry.get(&parsed.name) else {
            report(&CommandError::UnknownCommand(parsed.name.clone()), parsed, ctx);
            return DispatchResult::NotFound;
        };

        if let Err(violation) = check_arity(spec.arity, parsed) {
            report(&violation.into(), parsed, ctx);
            return DispatchResult::NoOp;
        }

        Logger::trace(Event::CommandDispatched, &[("command", spec.name)]);

        match spec.kind {
            CommandKind::Immediate(command) => match handlers::run(command, parsed, ctx) {
                Ok(Outcome::Done) => DispatchResult::NoOp,
                Ok(Outcome::Query(sql)) => DispatchResult::QueryText(sql),
                Ok(Outcome::Exit) => DispatchResult::Exit,
                Err(e) => {
                    report(&e, parsed, ctx);
                    DispatchResult::NoOp
                }
            },
            CommandKind::Templated(template) => {
                match instantiate(
                    template,
                    &parsed.positionals,
                    &parsed.named,
                    PlaceholderPolicy::Lenient,
                ) {
                    Ok(sql) => DispatchResult::QueryText(sql),
                    Err(e) => {
                        report(&e, parsed, ctx);
                        DispatchResult::QueryText(String::new())
                    }
                }
            }
        }
    }
}

/// Print a diagnostic for a failed command
fn report<S: Session>(error: &CommandError, parsed: &ParsedCommand, ctx: &mut Context<'_, S>) {
    if let CommandError::UnresolvedParameter { partial, .. } = error {
        if ctx.config.echo().is_on() {
            let _ = writeln!(ctx.out, "{}", partial);
        }
    }
    let _ = writeln!(ctx.out, "Error: {}.", error);

    Logger::warn(
        Event::CommandRejected,
        &[("code", error.code()), ("command", parsed.name.as_str())],
    );
}
