//! Output destinations for log records and their per-sink thresholds.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::level_filters::LevelFilter;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Filter};

use crate::error::{LogError, Result};
use crate::level::LogLevel;

/// In-memory console destination. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Where the console sink writes.
#[derive(Debug, Clone, Default)]
pub enum Console {
    /// The process's standard output
    #[default]
    Stdout,
    /// An in-memory buffer, for capturing output
    Buffer(SharedBuffer),
}

impl Console {
    pub(crate) fn make_writer(&self) -> BoxMakeWriter {
        match self {
            Console::Stdout => BoxMakeWriter::new(io::stdout),
            Console::Buffer(buffer) => BoxMakeWriter::new(buffer.clone()),
        }
    }
}

/// Open `path` for appending, creating it if needed.
pub(crate) fn open_log_file(path: &Path) -> Result<Mutex<File>> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(Mutex::new)
        .map_err(|source| LogError::SinkInit {
            path: path.to_path_buf(),
            source,
        })
}

/// Per-sink severity threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Threshold(pub LogLevel);

impl<S: Subscriber> Filter<S> for Threshold {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        LogLevel::from_metadata(meta).is_some_and(|level| level >= self.0)
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(self.0.as_level_filter())
    }
}
