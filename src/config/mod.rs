//! Persistent shell configuration
//!
//! Settings live in `sqlshell.json` inside the configuration directory.
//! A missing file is created with defaults. Every setter writes the
//! file back immediately so the next session starts where this one left
//! off.

mod errors;

pub use errors::{ConfigError, ConfigResult};

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::{Event, Logger};

/// Configuration file name
pub const CONFIG_FILENAME: &str = "sqlshell.json";

/// Default pretty-print width
pub const DEFAULT_WIDTH: usize = 80;

/// Whether SQL is echoed before it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Echo {
    On,
    #[default]
    Off,
}

impl Echo {
    pub fn is_on(self) -> bool {
        self == Echo::On
    }
}

impl fmt::Display for Echo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Echo::On => f.write_str("ON"),
            Echo::Off => f.write_str("OFF"),
        }
    }
}

/// On-disk settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Working directory restored at startup
    pub cwd: PathBuf,

    #[serde(default)]
    pub echo: Echo,

    /// Database reopened at startup
    #[serde(default)]
    pub open: Option<String>,

    #[serde(default = "default_width")]
    pub width: usize,
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

impl Settings {
    fn defaults() -> ConfigResult<Self> {
        let cwd = env::current_dir()
            .map_err(|e| ConfigError::Invalid(format!("cannot determine working directory: {}", e)))?;
        Ok(Self {
            cwd,
            echo: Echo::Off,
            open: None,
            width: DEFAULT_WIDTH,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 {
            return Err(ConfigError::Invalid("width must be > 0".into()));
        }
        Ok(())
    }
}

/// Shell configuration bound to its backing file
#[derive(Debug, Clone)]
pub struct ShellConfig {
    path: PathBuf,
    settings: Settings,
}

impl ShellConfig {
    /// Load the configuration in `dir`, creating it with defaults if absent
    pub fn load_or_create(dir: &Path) -> ConfigResult<Self> {
        let path = dir.join(CONFIG_FILENAME);

        if !path.exists() {
            let config = Self {
                path,
                settings: Settings::defaults()?,
            };
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        settings.validate()?;

        let shown = path.display().to_string();
        Logger::info(Event::ConfigLoaded, &[("path", shown.as_str())]);

        Ok(Self { path, settings })
    }

    /// Write the settings back to disk
    pub fn save(&self) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        fs::write(&self.path, json).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        let shown = self.path.display().to_string();
        Logger::trace(Event::ConfigSaved, &[("path", shown.as_str())]);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cwd(&self) -> &Path {
        &self.settings.cwd
    }

    pub fn echo(&self) -> Echo {
        self.settings.echo
    }

    /// Name of the database that was open when the configuration was last saved
    pub fn open_database(&self) -> Option<&str> {
        self.settings.open.as_deref()
    }

    pub fn width(&self) -> usize {
        self.settings.width
    }

    pub fn set_cwd(&mut self, cwd: PathBuf) -> ConfigResult<()> {
        self.settings.cwd = cwd;
        self.save()
    }

    pub fn set_echo(&mut self, echo: Echo) -> ConfigResult<()> {
        self.settings.echo = echo;
        self.save()
    }

    pub fn set_open_database(&mut self, name: Option<String>) -> ConfigResult<()> {
        self.settings.open = name;
        self.save()
    }

    pub fn set_width(&mut self, width: usize) -> ConfigResult<()> {
        if width == 0 {
            return Err(ConfigError::Invalid("width must be > 0".into()));
        }
        self.settings.width = width;
        self.save()
    }
}
