//! Leveled, colorized named loggers configured from the environment.
//!
//! - [`config`]: resolving a [`LoggerConfig`] from `LOG_*` variables and
//!   layering explicit [`LoggerOptions`] over it
//! - [`Logger`]: a named logger with a console sink and an optional file sink
//! - [`Loggable`]: a logging capability any owner can hold
//! - [`utils::progress`]: progress bars colored to match a log level
//!
//! ```no_run
//! use easylog::{LogLevel, Loggable, LoggerOptions, ProgressOptions};
//!
//! let log = Loggable::new("importer", &LoggerOptions::new().log_level_console(LogLevel::Debug))?;
//! log.info("starting import");
//!
//! for row in Loggable::progress(vec![1, 2, 3], LogLevel::Info, ProgressOptions::new())? {
//!     log.debug(format!("row {row}"));
//! }
//! # Ok::<(), easylog::LogError>(())
//! ```

pub mod config;
pub mod error;
pub mod level;
pub mod loggable;
pub mod logger;
pub mod utils;


pub use config::{filter_options, resolve, LoggerConfig, LoggerOptions, OptionValue, OPTION_NAMES};
pub use error::{LogError, Result};
pub use level::LogLevel;
pub use loggable::{HasLog, Loggable};
pub use logger::sink::{Console, SharedBuffer};
pub use logger::Logger;
pub use utils::progress::ProgressOptions;

/// Serializes tests that read or write the process environment.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
