//! sqlshell - A simple interactive shell for SQLite databases
//!
//! Dot-prefixed lines are shell commands; everything else is SQL passed
//! to the database verbatim.

pub mod cli;
pub mod command;
pub mod config;
pub mod database;
pub mod observability;
pub mod shell;

#[cfg(test)]
pub(crate) mod test_support {
    use std::env;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    static CWD_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that change or restore the process working
    /// directory, and puts the original directory back on drop.
    pub(crate) struct CwdGuard {
        original: PathBuf,
        _lock: MutexGuard<'static, ()>,
    }

    impl CwdGuard {
        pub(crate) fn acquire() -> Self {
            let lock = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Self {
                original: env::current_dir().unwrap(),
                _lock: lock,
            }
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.original);
        }
    }
}
