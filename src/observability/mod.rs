//! Observability for sqlshell
//!
//! Structured, synchronous JSON logging to stderr. Nothing here affects
//! command results.
//!
//! # Usage
//!
//! ```ignore
//! use sqlshell::observability::{Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Info);
//! Logger::info(Event::SessionOpened, &[("database", "test.db")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
