//! Per-module file appender
//!
//! Every message lands in `<root>/<module>.log`. Handles are opened lazily
//! and cached by module name; the directories implied by the module's
//! slash-separated segments are created on the cache miss, once per module.

use crate::core::{Appender, LoggerError, LoggerMetrics, RenderedMessage, Result};
use std::collections::{HashMap, HashSet};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct ModuleFileAppender {
    root: PathBuf,
    files: HashMap<String, BufWriter<File>>,
    /// Modules whose directory hierarchy has been created; never shrinks
    resolved: HashSet<String>,
    metrics: Arc<LoggerMetrics>,
}

impl ModuleFileAppender {
    pub fn new(root: impl Into<PathBuf>, metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            root: root.into(),
            files: HashMap::new(),
            resolved: HashSet::new(),
            metrics,
        }
    }

    /// Path of the log file for `module`
    pub fn path_for(root: &Path, module: &str) -> PathBuf {
        let mut path = root.to_path_buf();
        let mut segments = module.split('/').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{}.log", segment));
            }
        }
        path
    }

    pub fn is_resolved(&self, module: &str) -> bool {
        self.resolved.contains(module)
    }

    /// Create the module's directories the first time it is seen.
    ///
    /// The module is remembered even if creation fails; the open that follows
    /// reports the failure.
    fn resolve_directory(&mut self, module: &str, path: &Path) {
        if self.resolved.contains(module) {
            return;
        }
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        self.metrics.record_directory_resolved();
        self.resolved.insert(module.to_string());
    }

    fn writer_for(&mut self, module: &str) -> Result<&mut BufWriter<File>> {
        if !self.files.contains_key(module) {
            let path = Self::path_for(&self.root, module);
            self.resolve_directory(module, &path);

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    LoggerError::io_operation(
                        "opening module log",
                        format!("cannot open '{}'", path.display()),
                        e,
                    )
                })?;
            self.metrics.record_file_opened();
            self.files.insert(module.to_string(), BufWriter::new(file));
        }

        self.files
            .get_mut(module)
            .ok_or_else(|| LoggerError::other("module log handle missing after open"))
    }
}

impl Appender for ModuleFileAppender {
    fn append(&mut self, record: &RenderedMessage<'_>) -> Result<()> {
        let writer = self.writer_for(record.module())?;
        let line = format!("[{}] [{}] {}\n", record.timestamp, record.level(), record.text);

        let mut result = writer.write_all(line.as_bytes());
        if result.is_ok() {
            result = writer.flush();
        }

        if let Err(e) = result {
            // drop the handle so the next message reopens the file
            self.files.remove(record.module());
            return Err(e.into());
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        for writer in self.files.values_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "module_file"
    }
}

impl Drop for ModuleFileAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Message, TimestampFormat};
    use tempfile::TempDir;

    fn render(message: &Message) -> RenderedMessage<'_> {
        let format = TimestampFormat::parse("%H:%M").unwrap();
        RenderedMessage::new(message, &format)
    }

    #[test]
    fn test_path_for_nested_module() {
        let root = Path::new("logs");
        assert_eq!(
            ModuleFileAppender::path_for(root, "net/auth/tokens"),
            Path::new("logs").join("net").join("auth").join("tokens.log")
        );
        assert_eq!(
            ModuleFileAppender::path_for(root, "core"),
            Path::new("logs").join("core.log")
        );
    }

    #[test]
    fn test_creates_directories_once() {
        let dir = TempDir::new().unwrap();
        let metrics = Arc::new(LoggerMetrics::new());
        let mut appender = ModuleFileAppender::new(dir.path(), Arc::clone(&metrics));

        let first = Message::new("a/b/c", LogLevel::Info, "one");
        let second = Message::new("a/b/c", LogLevel::Debug, "two");
        appender.append(&render(&first)).unwrap();
        appender.append(&render(&second)).unwrap();

        assert!(dir.path().join("a").join("b").is_dir());
        assert!(appender.is_resolved("a/b/c"));
        assert_eq!(metrics.directories_resolved(), 1);
        assert_eq!(metrics.files_opened(), 1);

        let content = fs::read_to_string(dir.path().join("a/b/c.log")).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[INFO] one"));
        assert!(lines[1].ends_with("[DEBUG] two"));
    }

    #[test]
    fn test_existing_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("net")).unwrap();
        let mut appender = ModuleFileAppender::new(dir.path(), Arc::new(LoggerMetrics::new()));

        let message = Message::new("net/io", LogLevel::Warning, "disk low");
        appender.append(&render(&message)).unwrap();
        assert!(dir.path().join("net/io.log").is_file());
    }

    #[test]
    fn test_unwritable_root_fails_without_panicking() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let metrics = Arc::new(LoggerMetrics::new());
        let mut appender = ModuleFileAppender::new(&blocker, Arc::clone(&metrics));
        let message = Message::new("x/y", LogLevel::Info, "lost");

        assert!(appender.append(&render(&message)).is_err());
        assert!(appender.append(&render(&message)).is_err());
        // directory creation is attempted once even though it failed
        assert_eq!(metrics.directories_resolved(), 1);
        assert_eq!(metrics.files_opened(), 0);
    }
}
