//! Named loggers with a console sink and an optional file sink.
//!
//! Every [`Logger`] owns a private `tracing` dispatcher built from its own
//! sink layers. Records are sent through that dispatcher only, so loggers
//! never share sinks, thresholds or formatters with each other, including
//! loggers produced by [`Logger::copy`].

mod format;
pub mod sink;

use std::fmt;

use indicatif::{ProgressBar, ProgressBarIter};
use tracing::{dispatcher, trace, Dispatch};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

use crate::config::LoggerConfig;
use crate::error::Result;
use crate::level::{LogLevel, CRITICAL_TARGET};
use crate::utils::progress::{self, ProgressOptions};
use format::LineFormat;
use sink::{open_log_file, Console, Threshold};

#[derive(Debug)]
pub struct Logger {
    name: String,
    config: LoggerConfig,
    console: Console,
    has_file_sink: bool,
    dispatch: Dispatch,
}

impl Logger {
    /// Build a logger writing its console sink to stdout.
    pub fn new(name: impl Into<String>, config: LoggerConfig) -> Result<Self> {
        Self::with_console(name, config, Console::Stdout)
    }

    /// Build a logger writing its console sink to `console`.
    ///
    /// Fails with `SinkInit` when the configured log file cannot be opened.
    pub fn with_console(
        name: impl Into<String>,
        config: LoggerConfig,
        console: Console,
    ) -> Result<Self> {
        let name = name.into();

        let file_layer = match &config.log_file {
            Some(path) => {
                let file = open_log_file(path)?;
                let format = LineFormat::new(&name, config.time_in_formatter, config.color_file);
                let layer = tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .event_format(format)
                    .with_writer(file)
                    .with_filter(Threshold(config.log_level_file));
                Some(layer)
            }
            None => None,
        };

        let console_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(LineFormat::new(&name, config.time_in_formatter, config.color_console))
            .with_writer(console.make_writer())
            .with_filter(Threshold(config.log_level_console));

        let subscriber = Registry::default().with(file_layer).with(console_layer);

        trace!(
            logger = %name,
            file = ?config.log_file,
            level = %config.overall_level(),
            "logger constructed"
        );

        Ok(Self {
            has_file_sink: config.log_file.is_some(),
            name,
            config,
            console,
            dispatch: Dispatch::new(subscriber),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Minimum severity this logger lets through to any sink
    pub fn level(&self) -> LogLevel {
        self.config.overall_level()
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    pub fn has_file_sink(&self) -> bool {
        self.has_file_sink
    }

    pub fn sink_count(&self) -> usize {
        if self.has_file_sink {
            2
        } else {
            1
        }
    }

    /// Send `message` at `level` to every sink whose threshold admits it.
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if !self.is_enabled_for(level) {
            return;
        }
        dispatcher::with_default(&self.dispatch, || emit(level, &message));
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.log(LogLevel::Critical, message);
    }

    /// Build an independent logger with the same configuration, under
    /// `new_name` or this logger's name.
    pub fn copy(&self, new_name: Option<&str>) -> Result<Logger> {
        let name = new_name.unwrap_or(&self.name);
        Logger::with_console(name, self.config.clone(), self.console.clone())
    }

    /// Route every `tracing` event in the process through this logger's
    /// sinks. Fails if a global subscriber is already installed.
    pub fn init_global(&self) -> Result<()> {
        dispatcher::set_global_default(self.dispatch.clone())?;
        Ok(())
    }

    /// Wrap `iter` in a progress bar whose fill uses `level`'s color.
    pub fn progress<I: IntoIterator>(
        iter: I,
        level: LogLevel,
        options: ProgressOptions,
    ) -> Result<ProgressBarIter<I::IntoIter>> {
        progress::progress(iter, level, options)
    }

    /// A manually advanced progress counter colored for `level`.
    pub fn progress_counter(level: LogLevel, options: ProgressOptions) -> Result<ProgressBar> {
        progress::progress_counter(level, options)
    }
}

fn emit(level: LogLevel, message: &dyn fmt::Display) {
    match level {
        LogLevel::Debug => tracing::debug!("{message}"),
        LogLevel::Info => tracing::info!("{message}"),
        LogLevel::Warning => tracing::warn!("{message}"),
        LogLevel::Error => tracing::error!("{message}"),
        LogLevel::Critical => tracing::error!(target: CRITICAL_TARGET, "{message}"),
    }
}
