//! Logging capability for arbitrary owners.
//!
//! An owner holds a [`Loggable`] and implements [`HasLog`] to hand it out;
//! the trait's provided methods then forward log calls to the owned logger.

use std::collections::BTreeMap;
use std::fmt;

use indicatif::ProgressBarIter;

use crate::config::{filter_options, LoggerConfig, LoggerOptions};
use crate::error::Result;
use crate::level::LogLevel;
use crate::logger::sink::Console;
use crate::logger::Logger;
use crate::utils::progress::ProgressOptions;

#[derive(Debug)]
pub struct Loggable {
    name: String,
    log: Logger,
    traceback: Option<String>,
}

impl Loggable {
    /// Build a logger named `name` from `options` layered over the
    /// environment, which is read afresh on every call.
    pub fn new(name: impl Into<String>, options: &LoggerOptions) -> Result<Self> {
        Self::with_console(name, options, Console::Stdout)
    }

    pub fn with_console(
        name: impl Into<String>,
        options: &LoggerOptions,
        console: Console,
    ) -> Result<Self> {
        let name = name.into();
        let log = Logger::with_console(name.clone(), options.resolve()?, console)?;
        Ok(Self {
            name,
            log,
            traceback: None,
        })
    }

    /// Like [`Loggable::new`], named after the owning type.
    pub fn for_type<T: ?Sized>(options: &LoggerOptions) -> Result<Self> {
        Self::new(short_type_name::<T>(), options)
    }

    /// Take over the configuration of an existing logger under `name`.
    pub fn from_logger(name: impl Into<String>, log: &Logger) -> Result<Self> {
        let name = name.into();
        let log = log.copy(Some(&name))?;
        Ok(Self {
            name,
            log,
            traceback: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log(&self) -> &Logger {
        &self.log
    }

    /// The configuration the owned logger currently runs with
    pub fn logging_options(&self) -> &LoggerConfig {
        self.log.config()
    }

    /// Replace the owned logger with a fresh one built from the current
    /// name and configuration. The log file, if any, is reopened.
    pub fn reset_log(&mut self) -> Result<()> {
        self.log = Logger::with_console(
            self.name.clone(),
            self.log.config().clone(),
            self.log.console().clone(),
        )?;
        Ok(())
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log.debug(message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log.info(message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log.warning(message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log.error(message);
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.log.critical(message);
    }

    /// Log `message` at ERROR when `condition` does not hold. Never fails.
    pub fn assert_error(&self, condition: bool, message: impl fmt::Display) {
        if !condition {
            self.error(message);
        }
    }

    /// Remember `err` as the most recently handled error.
    pub fn record_error(&mut self, err: &anyhow::Error) {
        self.traceback = Some(format!("{err:?}"));
    }

    /// Unwrap `result`, recording the error if there is one.
    pub fn capture<T>(&mut self, result: anyhow::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.record_error(&err);
                None
            }
        }
    }

    /// Rendered chain (and backtrace, when captured) of the most recently
    /// handled error; empty when nothing was recorded.
    pub fn get_traceback(&self) -> String {
        self.traceback.clone().unwrap_or_default()
    }

    /// Split named options into those a logger recognizes and the rest.
    pub fn filter_kwargs<I, K, V>(options: I) -> (BTreeMap<K, V>, BTreeMap<K, V>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str> + Ord,
    {
        filter_options(options)
    }

    pub fn progress<I: IntoIterator>(
        iter: I,
        level: LogLevel,
        options: ProgressOptions,
    ) -> Result<ProgressBarIter<I::IntoIter>> {
        Logger::progress(iter, level, options)
    }
}

/// Implemented by owners of a [`Loggable`] to gain forwarding log methods.
pub trait HasLog {
    fn loggable(&self) -> &Loggable;

    fn debug(&self, message: impl fmt::Display) {
        self.loggable().debug(message);
    }

    fn info(&self, message: impl fmt::Display) {
        self.loggable().info(message);
    }

    fn warning(&self, message: impl fmt::Display) {
        self.loggable().warning(message);
    }

    fn error(&self, message: impl fmt::Display) {
        self.loggable().error(message);
    }

    fn critical(&self, message: impl fmt::Display) {
        self.loggable().critical(message);
    }

    fn assert_error(&self, condition: bool, message: impl fmt::Display) {
        self.loggable().assert_error(condition, message);
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
