use indicatif::{ProgressBar, ProgressBarIter, ProgressDrawTarget, ProgressIterator, ProgressStyle};

use crate::error::Result;
use crate::level::LogLevel;

/// Bar layout used when the length is known and no format is given
pub const DEFAULT_BAR_FORMAT: &str =
    "{prefix}{percent:>3}%|{wide_bar}| {human_pos}/{human_len} [{elapsed_precise}<{eta_precise}, {per_sec}]";

/// Counter layout used when the length is unknown and no format is given
pub const DEFAULT_COUNTER_FORMAT: &str = "{prefix}{human_pos} [{elapsed_precise}, {per_sec}]";

/// Options for the progress helpers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressOptions {
    /// Custom `indicatif` template; `{bar}` and `{wide_bar}` get the level color
    pub bar_format: Option<String>,
    /// Total number of steps, overriding what the iterator reports
    pub total: Option<u64>,
    /// Label rendered in front of the bar
    pub desc: Option<String>,
    /// Draw nothing
    pub disable: bool,
}

impl ProgressOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bar_format(mut self, format: impl Into<String>) -> Self {
        self.bar_format = Some(format.into());
        self
    }

    pub fn total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn disable(mut self, disable: bool) -> Self {
        self.disable = disable;
        self
    }
}

/// Paint the bar placeholders of `format` with `level`'s color.
///
/// Everything else in the template is left exactly as given.
pub fn colorize_bar_format(format: &str, level: LogLevel) -> String {
    let color = level.color();
    format
        .replace("{bar}", &format!("{{bar:.{color}}}"))
        .replace("{wide_bar}", &format!("{{wide_bar:.{color}}}"))
}

/// Create a progress bar drawn to stdout and colored for `level`.
pub fn progress_bar(
    len: Option<u64>,
    level: LogLevel,
    options: &ProgressOptions,
) -> Result<ProgressBar> {
    let format = match (&options.bar_format, len) {
        (Some(format), _) => format.as_str(),
        (None, Some(_)) => DEFAULT_BAR_FORMAT,
        (None, None) => DEFAULT_COUNTER_FORMAT,
    };
    let style = ProgressStyle::with_template(&colorize_bar_format(format, level))?;

    let target = if options.disable {
        ProgressDrawTarget::hidden()
    } else {
        ProgressDrawTarget::stdout()
    };

    let pb = ProgressBar::with_draw_target(len, target).with_style(style);
    if let Some(desc) = &options.desc {
        pb.set_prefix(format!("{desc}: "));
    }
    Ok(pb)
}

/// Wrap `iter` with a progress bar. Items are yielded lazily and unchanged.
///
/// The length comes from `options.total`, else from an exact size hint.
pub fn progress<I: IntoIterator>(
    iter: I,
    level: LogLevel,
    options: ProgressOptions,
) -> Result<ProgressBarIter<I::IntoIter>> {
    let iter = iter.into_iter();
    let len = options.total.or_else(|| match iter.size_hint() {
        (lower, Some(upper)) if lower == upper => Some(lower as u64),
        _ => None,
    });

    let pb = progress_bar(len, level, &options)?;
    Ok(iter.progress_with(pb))
}

/// A progress counter advanced by hand with `inc`.
pub fn progress_counter(level: LogLevel, options: ProgressOptions) -> Result<ProgressBar> {
    progress_bar(options.total, level, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogError;

    #[test]
    fn test_colorize_bar_format() {
        assert_eq!(
            colorize_bar_format("{l}{bar}{r}", LogLevel::Info),
            "{l}{bar:.cyan}{r}"
        );
        assert_eq!(
            colorize_bar_format("[{wide_bar}] {pos}", LogLevel::Critical),
            "[{wide_bar:.black.on_green}] {pos}"
        );
        assert_eq!(colorize_bar_format("{pos}/{len}", LogLevel::Debug), "{pos}/{len}");
    }

    #[test]
    fn test_progress_yields_items_in_order() {
        let options = ProgressOptions::new().disable(true);
        let items: Vec<_> = progress(vec![1, 2, 3], LogLevel::Debug, options)
            .unwrap()
            .collect();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_progress_with_custom_format() {
        let options = ProgressOptions::new()
            .bar_format("{msg} {bar} {pos}")
            .desc("files")
            .disable(true);
        let items: Vec<_> = progress(["a", "b"], LogLevel::Warning, options)
            .unwrap()
            .collect();
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_progress_length() {
        let options = ProgressOptions::new().disable(true);
        let iter = progress(0..5, LogLevel::Info, options).unwrap();
        assert_eq!(iter.progress.length(), Some(5));

        let options = ProgressOptions::new().disable(true);
        let iter = progress((0..5).filter(|n| n % 2 == 0), LogLevel::Info, options).unwrap();
        assert_eq!(iter.progress.length(), None);

        let options = ProgressOptions::new().total(40).disable(true);
        let iter = progress((0..5).filter(|n| n % 2 == 0), LogLevel::Info, options).unwrap();
        assert_eq!(iter.progress.length(), Some(40));
    }

    #[test]
    fn test_progress_is_lazy() {
        let mut seen = Vec::new();
        let options = ProgressOptions::new().disable(true);
        let source = (1..=3).inspect(|n| seen.push(*n));
        let mut iter = progress(source, LogLevel::Info, options).unwrap();

        assert_eq!(iter.next(), Some(1));
        drop(iter);
        assert_eq!(seen, vec![1]);
    }

    #[test]
    fn test_progress_counter() {
        let pb = progress_counter(LogLevel::Error, ProgressOptions::new().disable(true)).unwrap();
        pb.inc(3);
        pb.inc(2);
        assert_eq!(pb.position(), 5);
        assert_eq!(pb.length(), None);
    }

    #[test]
    fn test_invalid_template() {
        let options = ProgressOptions::new().bar_format("{pos:abc}").disable(true);
        let err = progress_counter(LogLevel::Info, options).unwrap_err();
        assert!(matches!(err, LogError::ProgressTemplate(_)));
    }
}
