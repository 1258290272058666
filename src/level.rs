use std::fmt;
use std::str::FromStr;

use console::Style;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::{Level, Metadata};

use crate::error::LogError;

/// Target carried by records emitted at [`LogLevel::Critical`].
///
/// `tracing` tops out at ERROR, so critical records travel as ERROR events
/// tagged with this target.
pub const CRITICAL_TARGET: &str = "easylog::critical";

/// Record severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Dotted style string for this level.
    ///
    /// The same string drives line coloring (`console`) and progress bar
    /// templates (`indicatif`), so both always agree.
    pub fn color(&self) -> &'static str {
        match self {
            LogLevel::Debug => "white",
            LogLevel::Info => "cyan",
            LogLevel::Warning => "yellow",
            LogLevel::Error => "red",
            LogLevel::Critical => "black.on_green",
        }
    }

    /// Terminal style for this level, forced on regardless of TTY detection.
    pub fn style(&self) -> Style {
        Style::from_dotted_str(self.color()).force_styling(true)
    }

    pub fn as_tracing_level(&self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warning => Level::WARN,
            LogLevel::Error | LogLevel::Critical => Level::ERROR,
        }
    }

    pub fn as_level_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.as_tracing_level())
    }

    /// Recover the severity of a `tracing` record. TRACE has no counterpart.
    pub fn from_metadata(meta: &Metadata<'_>) -> Option<LogLevel> {
        match *meta.level() {
            Level::DEBUG => Some(LogLevel::Debug),
            Level::INFO => Some(LogLevel::Info),
            Level::WARN => Some(LogLevel::Warning),
            Level::ERROR if meta.target() == CRITICAL_TARGET => Some(LogLevel::Critical),
            Level::ERROR => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.to_ascii_uppercase();
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == norm)
            .ok_or_else(|| LogError::UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    #[test]
    fn test_parse_names_any_case() {
        for level in LogLevel::ALL {
            let name = level.as_str();
            assert_eq!(name.parse::<LogLevel>().unwrap(), level);
            assert_eq!(name.to_lowercase().parse::<LogLevel>().unwrap(), level);

            let mut mixed = name.to_lowercase();
            mixed[..1].make_ascii_uppercase();
            assert_eq!(mixed.parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_parse_unknown() {
        for bad in ["", "VERBOSE", "WARN", "FATAL", "10", " INFO", "INFO ", " info "] {
            assert!(matches!(bad.parse::<LogLevel>(), Err(LogError::UnknownLevel(_))));
        }
    }

    #[test]
    fn test_color_table() {
        assert_eq!(LogLevel::Debug.color(), "white");
        assert_eq!(LogLevel::Info.color(), "cyan");
        assert_eq!(LogLevel::Warning.color(), "yellow");
        assert_eq!(LogLevel::Error.color(), "red");
        assert_eq!(LogLevel::Critical.color(), "black.on_green");
    }

    #[test]
    fn test_style_is_forced() {
        let painted = LogLevel::Error.style().apply_to("x").to_string();
        assert!(painted.starts_with("\u{1b}["));
        assert!(painted.ends_with("\u{1b}[0m"));
    }
}
