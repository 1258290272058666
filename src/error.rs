//! Error handling for easylog
//!
//! Every fallible operation in the crate returns [`LogError`]. Construction
//! failures (bad level names, unwritable log files) surface immediately; plain
//! logging calls never fail.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Unknown log level: '{0}' (expected one of DEBUG, INFO, WARNING, ERROR, CRITICAL)")]
    UnknownLevel(String),

    #[error("Cannot open log file {path}: {source}")]
    SinkInit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {option}: {value}")]
    InvalidOption { option: String, value: String },

    #[error("Unknown logging option: {0}")]
    UnknownOption(String),

    #[error("Invalid progress bar format: {0}")]
    ProgressTemplate(String),

    #[error("Failed to install global logger: {0}")]
    GlobalInit(String),
}

impl From<indicatif::style::TemplateError> for LogError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        LogError::ProgressTemplate(err.to_string())
    }
}

impl From<tracing::dispatcher::SetGlobalDefaultError> for LogError {
    fn from(err: tracing::dispatcher::SetGlobalDefaultError) -> Self {
        LogError::GlobalInit(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
