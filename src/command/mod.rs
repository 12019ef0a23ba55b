//! Built-in command pipeline
//!
//! A dot-prefixed input line goes through three stages:
//!
//! - `parser`: tokenize into name, positional and named parameters
//! - `dispatcher`: registry lookup and arity validation, then either an
//!   immediate handler or template instantiation
//! - `template`: positional (`?`) and named (`:key`) substitution
//!
//! The output is either query text for the database or nothing.

mod dispatcher;
mod errors;
mod handlers;
mod help;
mod parser;
mod registry;
mod template;
mod value;

pub use dispatcher::{check_arity, Context, DispatchResult, Dispatcher};
pub use errors::{ArityViolation, CommandError, CommandResult};
pub use handlers::{Outcome, QUERY_MARKER};
pub use help::{BANNER, HELP_TEXT};
pub use parser::{parse, NamedParameter, ParsedCommand, NAMED_DELIMITER};
pub use registry::{
    Arity, CommandKind, CommandRegistry, CommandSpec, ImmediateCommand, RegistryError,
    COMMAND_MARKER,
};
pub use template::{instantiate, quote, PlaceholderPolicy, POSITIONAL_PLACEHOLDER};
pub use value::{format_float, Value};
