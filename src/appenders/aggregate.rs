//! Severity aggregate files
//!
//! WARNING, ERROR and FATAL messages from every module are additionally
//! collected in `warnings.log`, `errors.log` and `fatals.log`, with the
//! module name in the field where the per-module file has the severity.

use crate::core::{Appender, LogLevel, LoggerError, LoggerMetrics, RenderedMessage, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One of the cross-module aggregate files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateSink {
    Warnings,
    Errors,
    Fatals,
}

impl AggregateSink {
    pub const ALL: [AggregateSink; 3] = [
        AggregateSink::Warnings,
        AggregateSink::Errors,
        AggregateSink::Fatals,
    ];

    /// Routing table: which aggregate file, if any, receives `level`
    pub fn for_level(level: LogLevel) -> Option<Self> {
        match level {
            LogLevel::Warning => Some(AggregateSink::Warnings),
            LogLevel::Error => Some(AggregateSink::Errors),
            LogLevel::Fatal => Some(AggregateSink::Fatals),
            LogLevel::Debug | LogLevel::Info | LogLevel::Verbose => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            AggregateSink::Warnings => "warnings.log",
            AggregateSink::Errors => "errors.log",
            AggregateSink::Fatals => "fatals.log",
        }
    }

    fn index(&self) -> usize {
        match self {
            AggregateSink::Warnings => 0,
            AggregateSink::Errors => 1,
            AggregateSink::Fatals => 2,
        }
    }
}

pub struct AggregateAppender {
    root: PathBuf,
    writers: [Option<BufWriter<File>>; 3],
    metrics: Arc<LoggerMetrics>,
}

impl AggregateAppender {
    /// Open all three files up front. A file that cannot be opened now is
    /// retried on the next message routed to it.
    pub fn open(root: impl Into<PathBuf>, metrics: Arc<LoggerMetrics>) -> Self {
        let mut appender = Self {
            root: root.into(),
            writers: [None, None, None],
            metrics,
        };
        for sink in AggregateSink::ALL {
            let _ = appender.writer_for(sink);
        }
        appender
    }

    pub fn path_for(root: &Path, sink: AggregateSink) -> PathBuf {
        root.join(sink.file_name())
    }

    fn writer_for(&mut self, sink: AggregateSink) -> Result<&mut BufWriter<File>> {
        let slot = &mut self.writers[sink.index()];
        if slot.is_none() {
            let path = Self::path_for(&self.root, sink);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    LoggerError::io_operation(
                        "opening aggregate log",
                        format!("cannot open '{}'", path.display()),
                        e,
                    )
                })?;
            self.metrics.record_file_opened();
            *slot = Some(BufWriter::new(file));
        }
        slot.as_mut()
            .ok_or_else(|| LoggerError::other("aggregate log handle missing after open"))
    }
}

impl Appender for AggregateAppender {
    fn append(&mut self, record: &RenderedMessage<'_>) -> Result<()> {
        let Some(sink) = AggregateSink::for_level(record.level()) else {
            return Ok(());
        };

        let writer = self.writer_for(sink)?;
        let line = format!("[{}] [{}] {}\n", record.timestamp, record.module(), record.text);

        let mut result = writer.write_all(line.as_bytes());
        if result.is_ok() {
            result = writer.flush();
        }

        if let Err(e) = result {
            self.writers[sink.index()] = None;
            return Err(e.into());
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        for writer in self.writers.iter_mut().flatten() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "aggregate"
    }
}

impl Drop for AggregateAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
