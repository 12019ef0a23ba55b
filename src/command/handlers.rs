//! Immediate command handlers
//!
//! Handlers run only after the dispatcher has validated arity. They act
//! on the configuration and session in the [`Context`], write any user
//! messages to `ctx.out`, and return an [`Outcome`]. Errors are reported
//! by the dispatcher.

use std::env;
use std::fs;
use std::io::Write;
use std::process;

use crate::config::Echo;
use crate::database::Session;
use crate::observability::{Event, Logger};

use super::dispatcher::Context;
use super::errors::{ArityViolation, CommandError, CommandResult};
use super::help::{BANNER, HELP_TEXT};
use super::parser::ParsedCommand;
use super::registry::ImmediateCommand;
use super::template::{instantiate, PlaceholderPolicy};
use super::value::Value;

/// Parameter that asks a command to report its current setting
pub const QUERY_MARKER: &str = "?";

/// What an immediate command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Side effects only
    Done,
    /// Query text to execute
    Query(String),
    /// Session should end
    Exit,
}

/// Run an immediate command
pub fn run<S: Session>(
    command: ImmediateCommand,
    parsed: &ParsedCommand,
    ctx: &mut Context<'_, S>,
) -> CommandResult<Outcome> {
    match command {
        ImmediateCommand::Close => close(ctx),
        ImmediateCommand::Create => create(parsed, ctx),
        ImmediateCommand::Cwd => cwd(parsed, ctx),
        ImmediateCommand::Delete => delete(parsed, ctx),
        ImmediateCommand::Dir => dir(ctx),
        ImmediateCommand::Echo => echo(parsed, ctx),
        ImmediateCommand::Edit => edit(),
        ImmediateCommand::Exit => Ok(Outcome::Exit),
        ImmediateCommand::Help => help(ctx),
        ImmediateCommand::Open => open(parsed, ctx),
        ImmediateCommand::Script => script(parsed, ctx),
        ImmediateCommand::Width => width(parsed, ctx),
    }
}

fn argument(parsed: &ParsedCommand, index: usize) -> CommandResult<&Value> {
    parsed.positionals.get(index).ok_or_else(|| {
        ArityViolation::Positional {
            expected: index + 1,
            actual: parsed.positionals.len(),
        }
        .into()
    })
}

fn close<S: Session>(ctx: &mut Context<'_, S>) -> CommandResult<Outcome> {
    ctx.session.close()?;
    ctx.config.set_open_database(None)?;
    Logger::info(Event::SessionClosed, &[]);
    Ok(Outcome::Done)
}

fn create<S: Session>(parsed: &ParsedCommand, ctx: &mut Context<'_, S>) -> CommandResult<Outcome> {
    let name = argument(parsed, 0)?.to_string();
    ctx.session.create(&name)?;
    ctx.config.set_open_database(Some(name.clone()))?;
    Logger::info(Event::SessionOpened, &[("database", name.as_str()), ("created", "true")]);
    Ok(Outcome::Done)
}

fn cwd<S: Session>(parsed: &ParsedCommand, ctx: &mut Context<'_, S>) -> CommandResult<Outcome> {
    let target = argument(parsed, 0)?;
    if target.is_text(QUERY_MARKER) {
        writeln!(
            ctx.out,
            "Current working directory is {}",
            ctx.config.cwd().display()
        )?;
        return Ok(Outcome::Done);
    }

    let dir = target.to_string();
    env::set_current_dir(&dir)
        .map_err(|e| CommandError::Environment(format!("{}: {}", dir, e)))?;
    ctx.config.set_cwd(env::current_dir()?)?;
    Ok(Outcome::Done)
}

fn delete<S: Session>(parsed: &ParsedCommand, ctx: &mut Context<'_, S>) -> CommandResult<Outcome> {
    let name = argument(parsed, 0)?.to_string();

    let is_open = ctx
        .config
        .open_database()
        .is_some_and(|open| open.trim().eq_ignore_ascii_case(name.trim()));
    if is_open {
        return Err(CommandError::InvalidArgument(
            "cannot delete currently open database".into(),
        ));
    }

    ctx.session.delete(&name)?;
    Logger::info(Event::DatabaseDeleted, &[("database", name.as_str())]);
    Ok(Outcome::Done)
}

fn dir<S: Session>(ctx: &mut Context<'_, S>) -> CommandResult<Outcome> {
    let mut names = fs::read_dir(env::current_dir()?)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<Vec<_>, _>>()?;
    names.sort();

    for name in names {
        writeln!(ctx.out, "{}", name)?;
    }
    Ok(Outcome::Done)
}

fn echo<S: Session>(parsed: &ParsedCommand, ctx: &mut Context<'_, S>) -> CommandResult<Outcome> {
    let setting = argument(parsed, 0)?.to_string().trim().to_lowercase();
    match setting.as_str() {
        "on" => ctx.config.set_echo(Echo::On)?,
        "off" => ctx.config.set_echo(Echo::Off)?,
        QUERY_MARKER => writeln!(ctx.out, "Echo is {}", ctx.config.echo())?,
        _ => {
            return Err(CommandError::InvalidArgument(
                "expected 'on', 'off' or '?'".into(),
            ))
        }
    }
    Ok(Outcome::Done)
}

fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad.exe"
    } else {
        "vi"
    }
}

fn edit() -> CommandResult<Outcome> {
    let editor = env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string());

    let status = process::Command::new(&editor)
        .status()
        .map_err(|e| CommandError::Environment(format!("could not start editor '{}': {}", editor, e)))?;
    if !status.success() {
        return Err(CommandError::Environment(format!(
            "editor '{}' exited with {}",
            editor, status
        )));
    }
    Ok(Outcome::Done)
}

fn help<S: Session>(ctx: &mut Context<'_, S>) -> CommandResult<Outcome> {
    writeln!(ctx.out, "{}", BANNER)?;
    writeln!(ctx.out, "{}", HELP_TEXT)?;
    Ok(Outcome::Done)
}

fn open<S: Session>(parsed: &ParsedCommand, ctx: &mut Context<'_, S>) -> CommandResult<Outcome> {
    let target = argument(parsed, 0)?;
    if target.is_text(QUERY_MARKER) {
        match ctx.config.open_database() {
            Some(name) => writeln!(ctx.out, "Currently open database is '{}'", name)?,
            None => writeln!(ctx.out, "There is no database open")?,
        }
        return Ok(Outcome::Done);
    }

    let name = target.to_string();
    ctx.session.open(&name)?;
    ctx.config.set_open_database(Some(name.clone()))?;
    Logger::info(Event::SessionOpened, &[("database", name.as_str())]);
    Ok(Outcome::Done)
}

/// Load a script file. `.script PATH ?` prints it; otherwise the
/// parameters after the path are substituted into it.
fn script<S: Session>(parsed: &ParsedCommand, ctx: &mut Context<'_, S>) -> CommandResult<Outcome> {
    let path = argument(parsed, 0)?.to_string();
    let text = fs::read_to_string(&path)
        .map_err(|e| CommandError::Environment(format!("{}: {}", path, e)))?;

    // The path itself never fills a placeholder: the first `?` takes the
    // first parameter after it.
    let params = &parsed.positionals[1..];
    if params.len() == 1 && params[0].is_text(QUERY_MARKER) {
        writeln!(ctx.out, "{}", text)?;
        return Ok(Outcome::Done);
    }

    if text.trim().is_empty() {
        return Ok(Outcome::Done);
    }

    let sql = instantiate(&text, params, &parsed.named, PlaceholderPolicy::Strict)?;
    Ok(Outcome::Query(sql))
}

fn width<S: Session>(parsed: &ParsedCommand, ctx: &mut Context<'_, S>) -> CommandResult<Outcome> {
    match argument(parsed, 0)? {
        v if v.is_text(QUERY_MARKER) => {
            writeln!(ctx.out, "Width is {}", ctx.config.width())?;
        }
        Value::Integer(n) if *n > 0 => {
            ctx.config.set_width(*n as usize)?;
        }
        _ => {
            return Err(CommandError::InvalidArgument(
                "expected integer value 'width'".into(),
            ))
        }
    }
    Ok(Outcome::Done)
}
