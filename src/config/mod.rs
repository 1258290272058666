//! Logger configuration: the resolved value a [`Logger`](crate::Logger) is
//! built from, environment resolution, and explicit overrides.

pub mod builder;
pub mod env;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{LogError, Result};
use crate::level::LogLevel;

pub use builder::{filter_options, LoggerOptions, OPTION_NAMES};
pub use env::{
    coerce, load_dotenv, resolve, resolve_values_with, resolve_with, EnvVars, OptionValue,
};

/// Fully resolved logger configuration.
///
/// Immutable by convention: loggers keep their own copy, so changing a
/// config after construction never reaches an existing logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Append-mode log file. No file sink exists when this is absent, and an
    /// empty path (`LOG_FILE=""`) counts as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Threshold of the file sink
    pub log_level_file: LogLevel,

    /// Threshold of the console sink
    pub log_level_console: LogLevel,

    /// Colorize file output
    pub color_file: bool,

    /// Colorize console output
    pub color_console: bool,

    /// Prefix every line with a timestamp
    pub time_in_formatter: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level_file: LogLevel::Debug,
            log_level_console: LogLevel::Info,
            color_file: false,
            color_console: true,
            time_in_formatter: true,
        }
    }
}

impl LoggerConfig {
    /// Minimum severity the logger lets through at all.
    ///
    /// With a file sink this is the file threshold, otherwise the console
    /// threshold.
    pub fn overall_level(&self) -> LogLevel {
        if self.log_file.is_some() {
            self.log_level_file
        } else {
            self.log_level_console
        }
    }

    /// Assign one option by name.
    ///
    /// `Absent` clears `log_file` and leaves every other option untouched.
    pub fn set(&mut self, option: &str, value: OptionValue) -> Result<()> {
        let invalid = |value: &OptionValue| LogError::InvalidOption {
            option: option.to_string(),
            value: value.to_string(),
        };

        match option {
            "log_file" => {
                self.log_file = match value {
                    OptionValue::Absent => None,
                    OptionValue::Text(path) if path.is_empty() => None,
                    OptionValue::Text(path) => Some(PathBuf::from(path)),
                    other => return Err(invalid(&other)),
                };
            }
            "log_level_file" | "log_level_console" => {
                let level = match value {
                    OptionValue::Absent => return Ok(()),
                    OptionValue::Level(level) => level,
                    OptionValue::Text(name) => name.parse()?,
                    other => return Err(invalid(&other)),
                };
                if option == "log_level_file" {
                    self.log_level_file = level;
                } else {
                    self.log_level_console = level;
                }
            }
            "color_file" | "color_console" | "time_in_formatter" => {
                let flag = match value {
                    OptionValue::Absent => return Ok(()),
                    OptionValue::Bool(flag) => flag,
                    other => return Err(invalid(&other)),
                };
                match option {
                    "color_file" => self.color_file = flag,
                    "color_console" => self.color_console = flag,
                    _ => self.time_in_formatter = flag,
                }
            }
            _ => return Err(LogError::UnknownOption(option.to_string())),
        }

        Ok(())
    }

    /// Current option values, keyed by option name, in declaration order.
    pub fn values(&self) -> Vec<(&'static str, OptionValue)> {
        let log_file = match &self.log_file {
            Some(path) => OptionValue::Text(path.display().to_string()),
            None => OptionValue::Absent,
        };

        vec![
            ("log_file", log_file),
            ("log_level_file", OptionValue::Level(self.log_level_file)),
            ("log_level_console", OptionValue::Level(self.log_level_console)),
            ("color_file", OptionValue::Bool(self.color_file)),
            ("color_console", OptionValue::Bool(self.color_console)),
            ("time_in_formatter", OptionValue::Bool(self.time_in_formatter)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_environment_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.log_file, None);
        assert_eq!(config.log_level_file, LogLevel::Debug);
        assert_eq!(config.log_level_console, LogLevel::Info);
        assert!(!config.color_file);
        assert!(config.color_console);
        assert!(config.time_in_formatter);
    }

    #[test]
    fn test_overall_level() {
        let mut config = LoggerConfig {
            log_level_file: LogLevel::Debug,
            log_level_console: LogLevel::Error,
            ..Default::default()
        };
        assert_eq!(config.overall_level(), LogLevel::Error);

        config.log_file = Some(PathBuf::from("app.log"));
        assert_eq!(config.overall_level(), LogLevel::Debug);
    }

    #[test]
    fn test_set_by_name() {
        let mut config = LoggerConfig::default();
        config.set("log_file", OptionValue::Text("out.log".into())).unwrap();
        config.set("log_level_console", OptionValue::Text("warning".into())).unwrap();
        config.set("log_level_file", OptionValue::Level(LogLevel::Error)).unwrap();
        config.set("color_file", OptionValue::Bool(true)).unwrap();
        config.set("time_in_formatter", OptionValue::Bool(false)).unwrap();

        assert_eq!(config.log_file, Some(PathBuf::from("out.log")));
        assert_eq!(config.log_level_console, LogLevel::Warning);
        assert_eq!(config.log_level_file, LogLevel::Error);
        assert!(config.color_file);
        assert!(!config.time_in_formatter);

        config.set("log_file", OptionValue::Text(String::new())).unwrap();
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_set_rejects_mismatched_values() {
        let mut config = LoggerConfig::default();

        let err = config.set("color_console", OptionValue::Text("maybe".into())).unwrap_err();
        assert!(matches!(err, LogError::InvalidOption { .. }));

        let err = config.set("log_level_file", OptionValue::Text("LOUD".into())).unwrap_err();
        assert!(matches!(err, LogError::UnknownLevel(_)));

        let err = config.set("log_file", OptionValue::Bool(true)).unwrap_err();
        assert!(matches!(err, LogError::InvalidOption { .. }));

        let err = config.set("name", OptionValue::Text("x".into())).unwrap_err();
        assert!(matches!(err, LogError::UnknownOption(_)));
    }

    #[test]
    fn test_values_round_trip_through_set() {
        let original = LoggerConfig {
            log_file: Some(PathBuf::from("trace.log")),
            log_level_file: LogLevel::Warning,
            log_level_console: LogLevel::Critical,
            color_file: true,
            color_console: false,
            time_in_formatter: false,
        };

        let mut rebuilt = LoggerConfig::default();
        for (name, value) in original.values() {
            rebuilt.set(name, value).unwrap();
        }
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_toml_serialization() {
        let config = LoggerConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("log_level_console = \"INFO\""));
        assert!(!text.contains("log_file"));

        let parsed: LoggerConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
