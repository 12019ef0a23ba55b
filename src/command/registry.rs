//! Built-in command registry
//!
//! Two disjoint tables are merged once at startup: immediate commands,
//! which act through a handler, and templated commands, which only
//! produce query text. A name present in both tables is rejected.

use std::collections::BTreeMap;

use thiserror::Error;

/// Marker that begins every built-in command name
pub const COMMAND_MARKER: char = '.';

/// Registry construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command '{0}' is registered more than once")]
    Duplicate(&'static str),

    #[error("command '{0}' does not begin with '.'")]
    MissingMarker(&'static str),
}

/// Positional arity contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many positionals and no named parameters
    Exactly(usize),
    /// A script path, optionally followed by `?` or by script parameters
    Script,
}

/// Commands that act immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmediateCommand {
    Close,
    Create,
    Cwd,
    Delete,
    Dir,
    Echo,
    Edit,
    Exit,
    Help,
    Open,
    Script,
    Width,
}

/// What a command does once its arity has been validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Immediate(ImmediateCommand),
    /// Query template with `?` and `:name` placeholders
    Templated(&'static str),
}

/// A registered command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub arity: Arity,
    pub kind: CommandKind,
}

const IMMEDIATE_COMMANDS: &[(&str, Arity, ImmediateCommand)] = &[
    (".close", Arity::Exactly(0), ImmediateCommand::Close),
    (".create", Arity::Exactly(1), ImmediateCommand::Create),
    (".cwd", Arity::Exactly(1), ImmediateCommand::Cwd),
    (".delete", Arity::Exactly(1), ImmediateCommand::Delete),
    (".dir", Arity::Exactly(0), ImmediateCommand::Dir),
    (".echo", Arity::Exactly(1), ImmediateCommand::Echo),
    (".edit", Arity::Exactly(0), ImmediateCommand::Edit),
    (".exit", Arity::Exactly(0), ImmediateCommand::Exit),
    (".help", Arity::Exactly(0), ImmediateCommand::Help),
    (".open", Arity::Exactly(1), ImmediateCommand::Open),
    (".script", Arity::Script, ImmediateCommand::Script),
    (".width", Arity::Exactly(1), ImmediateCommand::Width),
];

const TEMPLATED_COMMANDS: &[(&str, Arity, &str)] = &[
    (
        ".describe",
        Arity::Exactly(1),
        "SELECT sql FROM sqlite_schema WHERE name = ?;",
    ),
    (".schema", Arity::Exactly(0), "SELECT sql FROM sqlite_schema;"),
    (
        ".tables",
        Arity::Exactly(0),
        "SELECT name FROM sqlite_schema WHERE type = 'table' AND name NOT LIKE 'sqlite_%';",
    ),
];

/// Read-only name -> command mapping
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, CommandSpec>,
}

impl CommandRegistry {
    /// Build the registry of built-in commands
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_tables(IMMEDIATE_COMMANDS, TEMPLATED_COMMANDS)
    }

    /// Merge an immediate and a templated table, rejecting duplicate names
    pub fn from_tables(
        immediate: &[(&'static str, Arity, ImmediateCommand)],
        templated: &[(&'static str, Arity, &'static str)],
    ) -> Result<Self, RegistryError> {
        let immediate = immediate
            .iter()
            .map(|&(name, arity, cmd)| (name, arity, CommandKind::Immediate(cmd)));
        let templated = templated
            .iter()
            .map(|&(name, arity, sql)| (name, arity, CommandKind::Templated(sql)));

        let mut commands = BTreeMap::new();
        for (name, arity, kind) in immediate.chain(templated) {
            if !name.starts_with(COMMAND_MARKER) {
                return Err(RegistryError::MissingMarker(name));
            }
            let spec = CommandSpec { name, arity, kind };
            if commands.insert(name, spec).is_some() {
                return Err(RegistryError::Duplicate(name));
            }
        }

        Ok(Self { commands })
    }

    /// Look up a command by its (lowercased) name
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// Iterate commands in name order
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
