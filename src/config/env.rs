use std::env;
use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::config::LoggerConfig;
use crate::error::{LogError, Result};
use crate::level::LogLevel;

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const LOG_FILE: &'static str = "LOG_FILE";
    pub const LOG_LEVEL_FILE: &'static str = "LOG_LEVEL_FILE";
    pub const LOG_LEVEL_CONSOLE: &'static str = "LOG_LEVEL_CONSOLE";
    pub const LOG_COLOR_FILE: &'static str = "LOG_COLOR_FILE";
    pub const LOG_COLOR_CONSOLE: &'static str = "LOG_COLOR_CONSOLE";
    pub const LOG_TIME_IN_FORMATTER: &'static str = "LOG_TIME_IN_FORMATTER";
}

/// Option name, environment variable, default when the variable is unset.
const ENV_OPTIONS: [(&str, &str, Option<&str>); 6] = [
    ("log_file", EnvVars::LOG_FILE, None),
    ("log_level_file", EnvVars::LOG_LEVEL_FILE, Some("DEBUG")),
    ("log_level_console", EnvVars::LOG_LEVEL_CONSOLE, Some("INFO")),
    ("color_file", EnvVars::LOG_COLOR_FILE, Some("false")),
    ("color_console", EnvVars::LOG_COLOR_CONSOLE, Some("true")),
    ("time_in_formatter", EnvVars::LOG_TIME_IN_FORMATTER, Some("true")),
];

/// A coerced option value, before it is assigned to a typed config field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Absent,
    Bool(bool),
    Level(LogLevel),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Absent => f.write_str("<unset>"),
            OptionValue::Bool(flag) => write!(f, "{flag}"),
            OptionValue::Level(level) => write!(f, "{level}"),
            OptionValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(flag: bool) -> Self {
        OptionValue::Bool(flag)
    }
}

impl From<LogLevel> for OptionValue {
    fn from(level: LogLevel) -> Self {
        OptionValue::Level(level)
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        OptionValue::Text(text.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(text: String) -> Self {
        OptionValue::Text(text)
    }
}

/// Coerce a raw string for the named option.
///
/// Options whose name contains `log_level` must hold a level name.
/// Anything else equal to `true`/`false` (any case) becomes a boolean; all
/// other strings pass through untouched.
pub fn coerce(option: &str, raw: Option<&str>) -> Result<OptionValue> {
    let Some(raw) = raw else {
        return Ok(OptionValue::Absent);
    };

    if option.to_lowercase().contains("log_level") {
        return Ok(OptionValue::Level(raw.parse()?));
    }

    Ok(match raw.to_lowercase().as_str() {
        "true" => OptionValue::Bool(true),
        "false" => OptionValue::Bool(false),
        _ => OptionValue::Text(raw.to_string()),
    })
}

/// Read one variable from the process environment.
fn env_lookup(var_name: &str) -> Result<Option<String>> {
    match env::var(var_name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(raw)) => Err(LogError::InvalidOption {
            option: var_name.to_string(),
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

/// Resolve every option to its coerced value using `lookup` for variables.
pub fn resolve_values_with<F>(mut lookup: F) -> Result<Vec<(&'static str, OptionValue)>>
where
    F: FnMut(&str) -> Result<Option<String>>,
{
    ENV_OPTIONS
        .iter()
        .map(|&(option, var_name, default)| {
            let raw = lookup(var_name)?;
            let raw = raw.as_deref().or(default);
            Ok((option, coerce(option, raw)?))
        })
        .collect()
}

/// Build a [`LoggerConfig`] from variables supplied by `lookup`.
pub fn resolve_with<F>(lookup: F) -> Result<LoggerConfig>
where
    F: FnMut(&str) -> Result<Option<String>>,
{
    let mut config = LoggerConfig::default();
    for (option, value) in resolve_values_with(lookup)? {
        config.set(option, value)?;
    }
    Ok(config)
}

/// Build a [`LoggerConfig`] from the process environment.
///
/// Reads the environment on every call; nothing is cached, so loggers built
/// later see later changes.
pub fn resolve() -> Result<LoggerConfig> {
    resolve_with(env_lookup)
}

/// Load a `.env` file into the process environment, if one can be found.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(_) => None,
    }
}
