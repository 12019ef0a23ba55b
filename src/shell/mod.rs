//! Interactive shell loop
//!
//! Reads a line; a line starting with `.` is a built-in command and is
//! dispatched immediately. Any other line starts a statement that is
//! accumulated across continuation lines until one ends with `;`, then
//! sent to the session verbatim.

mod display;
mod errors;
mod input;

pub use display::render_row;
pub use errors::{ShellError, ShellResult};
pub use input::{EditorInput, LineSource, ScriptedInput};

use std::env;
use std::io::Write;

use crate::command::{parse, Context, DispatchResult, Dispatcher, BANNER, COMMAND_MARKER};
use crate::config::ShellConfig;
use crate::database::{DatabaseError, QueryOutcome, Session};
use crate::observability::{Event, Logger};

/// Prompt for a new line
pub const PROMPT: &str = "Command > ";

/// Prompt for a statement continuation line
pub const CONTINUATION_PROMPT: &str = "        > ";

/// Printed when a query returns no rows
pub const EMPTY_RESULT: &str = "** Empty result set **";

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Read one built-in command or one complete statement.
///
/// Returns `None` at end of input, including end of input in the middle
/// of a statement.
pub fn read_statement<I: LineSource>(input: &mut I) -> ShellResult<Option<String>> {
    let Some(mut statement) = input.read_line(PROMPT)? else {
        return Ok(None);
    };

    if statement.trim().is_empty() {
        return Ok(Some(String::new()));
    }
    if statement.starts_with(COMMAND_MARKER) {
        return Ok(Some(statement));
    }

    while !statement.trim_end().ends_with(';') {
        let Some(more) = input.read_line(CONTINUATION_PROMPT)? else {
            return Ok(None);
        };
        statement.push(' ');
        statement.push_str(&more);
    }

    Ok(Some(statement))
}

/// A shell session
pub struct Shell<S: Session, W: Write> {
    dispatcher: Dispatcher,
    config: ShellConfig,
    session: S,
    out: W,
}

impl<S: Session, W: Write> Shell<S, W> {
    pub fn new(config: ShellConfig, session: S, out: W) -> ShellResult<Self> {
        Ok(Self {
            dispatcher: Dispatcher::with_builtins()?,
            config,
            session,
            out,
        })
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Consume the shell and return its output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Print the banner, restore the saved working directory and reopen
    /// the last open database.
    pub fn start(&mut self) -> ShellResult<()> {
        writeln!(self.out, "{}", BANNER)?;
        Logger::info(Event::ShellStart, &[]);

        let cwd = self.config.cwd().to_path_buf();
        if let Err(e) = env::set_current_dir(&cwd) {
            writeln!(
                self.out,
                "Error: cannot restore working directory {}: {}.",
                cwd.display(),
                e
            )?;
        }

        if let Some(name) = self.config.open_database().map(str::to_string) {
            match self.session.open(&name) {
                Ok(()) => writeln!(self.out, "Currently open database is '{}'.", name)?,
                Err(e) => {
                    writeln!(self.out, "Error: {}.", e)?;
                    self.config.set_open_database(None)?;
                }
            }
        }

        Ok(())
    }

    /// Run the loop until `.exit` or end of input
    pub fn run<I: LineSource>(&mut self, input: &mut I) -> ShellResult<()> {
        self.start()?;

        while let Some(line) = read_statement(input)? {
            if self.execute_line(&line)? == Flow::Exit {
                break;
            }
        }

        writeln!(self.out, "{}", BANNER)?;
        self.out.flush()?;
        Logger::info(Event::ShellExit, &[]);
        Ok(())
    }

    /// Handle one command line or complete statement
    pub fn execute_line(&mut self, line: &str) -> ShellResult<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        if !line.starts_with(COMMAND_MARKER) {
            self.execute_sql(line)?;
            return Ok(Flow::Continue);
        }

        let parsed = match parse(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                writeln!(self.out, "Error: {}.", e)?;
                Logger::warn(Event::CommandRejected, &[("code", e.code())]);
                return Ok(Flow::Continue);
            }
        };

        let mut ctx = Context {
            config: &mut self.config,
            session: &mut self.session,
            out: &mut self.out,
        };
        match self.dispatcher.dispatch(&parsed, &mut ctx) {
            DispatchResult::Exit => return Ok(Flow::Exit),
            DispatchResult::QueryText(sql) => self.execute_sql(&sql)?,
            DispatchResult::NoOp | DispatchResult::NotFound => {}
        }

        Ok(Flow::Continue)
    }

    /// Send query text to the session and print the result
    pub fn execute_sql(&mut self, sql: &str) -> ShellResult<()> {
        if sql.trim().is_empty() {
            return Ok(());
        }

        if self.config.echo().is_on() {
            writeln!(self.out, "{}", sql)?;
        }

        match self.session.execute(sql) {
            Ok(QueryOutcome::Rows(rows)) if !rows.is_empty() => {
                let width = self.config.width();
                for row in &rows {
                    writeln!(self.out, "{}", render_row(row, width))?;
                }
                let count = rows.len().to_string();
                Logger::trace(Event::QueryExecuted, &[("rows", count.as_str())]);
            }
            Ok(_) => {
                writeln!(self.out, "{}", EMPTY_RESULT)?;
                Logger::trace(Event::QueryExecuted, &[("rows", "0")]);
            }
            Err(DatabaseError::NotOpen) => {
                writeln!(self.out, "Error: could not execute sql - no database is open.")?;
            }
            Err(e) => {
                writeln!(self.out, "Error: {}.", e)?;
                let message = e.to_string();
                Logger::warn(Event::QueryFailed, &[("error", message.as_str())]);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_returned_immediately() {
        let mut input = ScriptedInput::new([".tables", "never read"]);
        assert_eq!(read_statement(&mut input).unwrap(), Some(".tables".into()));
        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn test_statement_accumulates_until_semicolon() {
        let mut input = ScriptedInput::new(["SELECT *", "FROM t", "WHERE id = 1;", "next"]);
        assert_eq!(
            read_statement(&mut input).unwrap(),
            Some("SELECT * FROM t WHERE id = 1;".into())
        );
        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn test_single_line_statement() {
        let mut input = ScriptedInput::new(["SELECT 1;"]);
        assert_eq!(read_statement(&mut input).unwrap(), Some("SELECT 1;".into()));
    }

    #[test]
    fn test_blank_line() {
        let mut input = ScriptedInput::new(["   "]);
        assert_eq!(read_statement(&mut input).unwrap(), Some(String::new()));
    }

    #[test]
    fn test_end_of_input() {
        let mut input = ScriptedInput::new(Vec::<String>::new());
        assert_eq!(read_statement(&mut input).unwrap(), None);
    }

    #[test]
    fn test_end_of_input_mid_statement() {
        let mut input = ScriptedInput::new(["SELECT *", "FROM t"]);
        assert_eq!(read_statement(&mut input).unwrap(), None);
    }
}
