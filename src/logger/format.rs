use std::fmt;

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::level::LogLevel;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Line layout of one sink: `[time  ]LEVEL:NAME:   MESSAGE`, optionally
/// painted in the level's color.
#[derive(Debug, Clone)]
pub(crate) struct LineFormat {
    name: String,
    time: bool,
    color: bool,
}

impl LineFormat {
    pub(crate) fn new(name: &str, time: bool, color: bool) -> Self {
        Self {
            name: name.to_string(),
            time,
            color,
        }
    }

    pub(crate) fn render(&self, level: LogLevel, message: &str, timestamp: Option<&str>) -> String {
        let mut line = String::new();
        if let Some(timestamp) = timestamp {
            line.push_str(timestamp);
            line.push_str("  ");
        }
        line.push_str(&format!("{}:{}:   {}", level, self.name, message));

        if self.color {
            level.style().apply_to(line).to_string()
        } else {
            line
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let Some(level) = LogLevel::from_metadata(event.metadata()) else {
            return Ok(());
        };

        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;

        let timestamp = self
            .time
            .then(|| Local::now().format(TIMESTAMP_FORMAT).to_string());

        writeln!(writer, "{}", self.render(level, &message, timestamp.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line() {
        let format = LineFormat::new("app", false, false);
        assert_eq!(
            format.render(LogLevel::Warning, "disk almost full", None),
            "WARNING:app:   disk almost full"
        );
    }

    #[test]
    fn test_timestamp_prefix() {
        let format = LineFormat::new("app", true, false);
        assert_eq!(
            format.render(LogLevel::Info, "ready", Some("2024-01-02 03:04:05,678")),
            "2024-01-02 03:04:05,678  INFO:app:   ready"
        );
    }

    #[test]
    fn test_colored_line_wraps_whole_line() {
        let format = LineFormat::new("app", false, true);
        let line = format.render(LogLevel::Critical, "down", None);

        let expected = LogLevel::Critical
            .style()
            .apply_to("CRITICAL:app:   down")
            .to_string();
        assert_eq!(line, expected);
        assert!(line.starts_with('\u{1b}'));
        assert!(line.ends_with("\u{1b}[0m"));
    }

    #[test]
    fn test_timestamp_layout() {
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        // e.g. 2024-01-02 03:04:05,678
        assert_eq!(stamp.len(), 23);
        assert_eq!(&stamp[19..20], ",");
    }
}
