use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::{resolve, LoggerConfig, OptionValue};
use crate::error::Result;
use crate::level::LogLevel;

/// Names of the options a logger is constructed from, shared by
/// [`LoggerOptions`] and [`filter_options`].
pub const OPTION_NAMES: [&str; 6] = [
    "log_file",
    "log_level_file",
    "log_level_console",
    "color_file",
    "color_console",
    "time_in_formatter",
];

/// Explicit logger options layered over a base configuration.
///
/// Unset fields fall back to the base; set fields always win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerOptions {
    log_file: Option<Option<PathBuf>>,
    log_level_file: Option<LogLevel>,
    log_level_console: Option<LogLevel>,
    color_file: Option<bool>,
    color_console: Option<bool>,
    time_in_formatter: Option<bool>,
}

impl LoggerOptions {
    /// Create an empty set of overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the log file
    pub fn log_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        self.log_file = Some(path.map(|p| p.as_ref().to_path_buf()));
        self
    }

    pub fn log_level_file(mut self, level: LogLevel) -> Self {
        self.log_level_file = Some(level);
        self
    }

    pub fn log_level_console(mut self, level: LogLevel) -> Self {
        self.log_level_console = Some(level);
        self
    }

    pub fn color_file(mut self, color: bool) -> Self {
        self.color_file = Some(color);
        self
    }

    pub fn color_console(mut self, color: bool) -> Self {
        self.color_console = Some(color);
        self
    }

    pub fn time_in_formatter(mut self, time: bool) -> Self {
        self.time_in_formatter = Some(time);
        self
    }

    /// Build overrides from named values, e.g. the recognized half of
    /// [`filter_options`].
    pub fn from_values<I, K, V>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        // Validate through a scratch config so names and types are checked
        // exactly as LoggerConfig::set checks them.
        let mut scratch = LoggerConfig::default();
        let mut options = Self::new();

        for (name, value) in values {
            let name = name.as_ref();
            let value = value.into();
            let absent = value == OptionValue::Absent;
            scratch.set(name, value)?;
            if absent && name != "log_file" {
                continue;
            }
            options = match name {
                "log_file" => options.log_file(scratch.log_file.clone()),
                "log_level_file" => options.log_level_file(scratch.log_level_file),
                "log_level_console" => options.log_level_console(scratch.log_level_console),
                "color_file" => options.color_file(scratch.color_file),
                "color_console" => options.color_console(scratch.color_console),
                _ => options.time_in_formatter(scratch.time_in_formatter),
            };
        }

        Ok(options)
    }

    /// Apply the overrides on top of `base`.
    pub fn apply(&self, base: LoggerConfig) -> LoggerConfig {
        LoggerConfig {
            log_file: self.log_file.clone().unwrap_or(base.log_file),
            log_level_file: self.log_level_file.unwrap_or(base.log_level_file),
            log_level_console: self.log_level_console.unwrap_or(base.log_level_console),
            color_file: self.color_file.unwrap_or(base.color_file),
            color_console: self.color_console.unwrap_or(base.color_console),
            time_in_formatter: self.time_in_formatter.unwrap_or(base.time_in_formatter),
        }
    }

    /// Apply the overrides on top of the current environment.
    pub fn resolve(&self) -> Result<LoggerConfig> {
        Ok(self.apply(resolve()?))
    }
}

/// Split named options into those a logger recognizes and the rest.
pub fn filter_options<I, K, V>(options: I) -> (BTreeMap<K, V>, BTreeMap<K, V>)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str> + Ord,
{
    options
        .into_iter()
        .partition(|(name, _)| OPTION_NAMES.contains(&name.as_ref()))
}
