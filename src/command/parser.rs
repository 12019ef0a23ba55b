//! Command line tokenizer
//!
//! Splits a line into a command name, positional parameters and named
//! (`key:value`) parameters. Quoting follows POSIX shell rules.

use std::borrow::Cow;

use super::errors::{CommandError, CommandResult};
use super::value::Value;

/// Delimiter between the key and value of a named parameter
pub const NAMED_DELIMITER: char = ':';

/// `shlex` drops a word starting with this, and the rest of the line
const COMMENT_MARKER: char = '#';

/// A `key:value` parameter
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParameter {
    pub key: String,
    pub value: Value,
}

impl NamedParameter {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A tokenized command line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedCommand {
    /// Lowercased, trimmed first token
    pub name: String,
    /// Parameters without a colon, in order of appearance
    pub positionals: Vec<Value>,
    /// Parameters with a colon, in order of appearance. Keys may repeat.
    pub named: Vec<NamedParameter>,
}

impl ParsedCommand {
    /// Returns true if the line had no tokens
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.positionals.is_empty() && self.named.is_empty()
    }

    /// Total number of parameters supplied
    pub fn parameter_count(&self) -> usize {
        self.positionals.len() + self.named.len()
    }
}

/// Parse a raw command line.
///
/// Empty input yields an empty command. Unbalanced quotes are a
/// `CommandError::Syntax`.
pub fn parse(line: &str) -> CommandResult<ParsedCommand> {
    if line.is_empty() {
        return Ok(ParsedCommand::default());
    }

    let tokens = shlex::split(&escape_comment_markers(line))
        .ok_or_else(|| CommandError::Syntax(line.to_string()))?;

    let mut tokens = tokens.into_iter();
    let Some(first) = tokens.next() else {
        return Ok(ParsedCommand::default());
    };

    let mut parsed = ParsedCommand {
        name: first.trim().to_lowercase(),
        ..ParsedCommand::default()
    };

    for token in tokens {
        match token.split_once(NAMED_DELIMITER) {
            None => parsed.positionals.push(Value::coerce(&token)),
            Some((key, value)) => parsed
                .named
                .push(NamedParameter::new(key, Value::coerce(value))),
        }
    }

    Ok(parsed)
}

/// Backslash-escape every unquoted `#` that begins a word, so it is kept
/// as an ordinary character.
fn escape_comment_markers(line: &str) -> Cow<'_, str> {
    if !line.contains(COMMENT_MARKER) {
        return Cow::Borrowed(line);
    }

    let mut escaped = String::with_capacity(line.len() + 4);
    let mut quote: Option<char> = None;
    let mut word_start = true;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                escaped.push(ch);
                if let Some(next) = chars.next() {
                    escaped.push(next);
                }
                word_start = false;
                continue;
            }
            (Some(_), _) => {}
            (None, ' ' | '\t' | '\n') => {
                escaped.push(ch);
                word_start = true;
                continue;
            }
            (None, '\'' | '"') => quote = Some(ch),
            (None, COMMENT_MARKER) if word_start => escaped.push('\\'),
            (None, _) => {}
        }
        escaped.push(ch);
        word_start = false;
    }

    Cow::Owned(escaped)
}
