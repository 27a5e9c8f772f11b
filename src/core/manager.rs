//! Log manager: owns the queue, the processor thread and the module registry

use super::{
    config::{ConfigProvider, LogConfig},
    error::{LoggerError, Result},
    message::Message,
    metrics::LoggerMetrics,
    processor::LogProcessor,
    queue::{message_queue, QueueProducer},
    timestamp::TimestampFormat,
};
use crate::appenders::{AggregateAppender, ConsoleAppender, ConsoleTarget, ModuleFileAppender};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

/// Default directory that holds every log file
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// Everything needed to start a [`LogManager`]
#[derive(Clone)]
pub struct LogSettings {
    pub logs_dir: PathBuf,
    pub config: Arc<dyn ConfigProvider>,
    pub console: ConsoleTarget,
}

impl LogSettings {
    /// Create a builder for LogSettings
    ///
    /// # Example
    /// ```
    /// use module_log_system::prelude::*;
    ///
    /// let settings = LogSettings::builder()
    ///     .logs_dir("target/doc-logs")
    ///     .config(LogConfig::default().with_colors(false))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(settings.logs_dir, std::path::Path::new("target/doc-logs"));
    /// ```
    #[must_use]
    pub fn builder() -> LogSettingsBuilder {
        LogSettingsBuilder::new()
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            config: Arc::new(LogConfig::default()),
            console: ConsoleTarget::Stdout,
        }
    }
}

impl fmt::Debug for LogSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSettings")
            .field("logs_dir", &self.logs_dir)
            .field("global", &self.config.global())
            .field("console", &self.console)
            .finish()
    }
}

/// Builder for [`LogSettings`] with a fluent API
pub struct LogSettingsBuilder {
    settings: LogSettings,
}

impl LogSettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: LogSettings::default(),
        }
    }

    /// Root directory for module and aggregate files
    #[must_use = "builder methods return a new value"]
    pub fn logs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.settings.logs_dir = dir.into();
        self
    }

    /// Use a fixed configuration value
    #[must_use = "builder methods return a new value"]
    pub fn config<C: ConfigProvider + 'static>(mut self, config: C) -> Self {
        self.settings.config = Arc::new(config);
        self
    }

    /// Use a shared provider, e.g. a [`SharedConfig`](super::config::SharedConfig)
    /// the caller reloads
    #[must_use = "builder methods return a new value"]
    pub fn provider(mut self, config: Arc<dyn ConfigProvider>) -> Self {
        self.settings.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, target: ConsoleTarget) -> Self {
        self.settings.console = target;
        self
    }

    /// Validate the configured date/time pattern and build the settings
    pub fn build(self) -> Result<LogSettings> {
        TimestampFormat::parse(&self.settings.config.global().date_time_format)?;
        Ok(self.settings)
    }
}

impl Default for LogSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that a module name maps onto a path below the logs root
pub fn validate_module_name(module: &str) -> Result<()> {
    if module.is_empty() {
        return Err(LoggerError::module_name(module, "name is empty"));
    }
    if module.contains('\\') || module.contains('\0') || module.contains(':') {
        return Err(LoggerError::module_name(
            module,
            "contains a reserved character",
        ));
    }
    for segment in module.split('/') {
        match segment {
            "" => return Err(LoggerError::module_name(module, "empty path segment")),
            "." | ".." => {
                return Err(LoggerError::module_name(
                    module,
                    "relative path segment",
                ))
            }
            _ => {}
        }
    }
    Ok(())
}

/// The running subsystem.
///
/// Starting a manager spawns the processor thread; shutting it down (or
/// dropping it) closes the queue, waits for the processor to write every
/// message that was already queued and joins the thread.
pub struct LogManager {
    producer: QueueProducer,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    metrics: Arc<LoggerMetrics>,
    config: Arc<dyn ConfigProvider>,
    logs_dir: PathBuf,
    /// Module name -> number of live handles
    loggers: Mutex<HashMap<String, usize>>,
}

impl LogManager {
    /// Validate configuration, create the logs root, open the aggregate
    /// files and spawn the processor thread
    pub fn start(settings: LogSettings) -> Result<Self> {
        let global = settings.config.global();
        let timestamp_format = TimestampFormat::parse(&global.date_time_format)?;

        if settings.logs_dir.exists() && !settings.logs_dir.is_dir() {
            return Err(LoggerError::config(
                "logs_dir",
                format!("'{}' is not a directory", settings.logs_dir.display()),
            ));
        }
        fs::create_dir_all(&settings.logs_dir).map_err(|e| {
            LoggerError::io_operation(
                "creating logs root",
                format!("cannot create '{}'", settings.logs_dir.display()),
                e,
            )
        })?;

        let metrics = Arc::new(LoggerMetrics::new());
        let processor = LogProcessor::new(timestamp_format, Arc::clone(&metrics))
            .with_appender(ModuleFileAppender::new(
                &settings.logs_dir,
                Arc::clone(&metrics),
            ))
            .with_appender(AggregateAppender::open(
                &settings.logs_dir,
                Arc::clone(&metrics),
            ))
            .with_appender(
                ConsoleAppender::new(Arc::clone(&settings.config))
                    .with_target(settings.console.clone()),
            );

        let (producer, consumer) = message_queue();
        let handle = thread::Builder::new()
            .name("log-processor".to_string())
            .spawn(move || processor.run(consumer))
            .map_err(|e| {
                LoggerError::io_operation("spawning log processor", "thread spawn failed", e)
            })?;

        Ok(Self {
            producer,
            worker: Mutex::new(Some(handle)),
            metrics,
            config: settings.config,
            logs_dir: settings.logs_dir,
            loggers: Mutex::new(HashMap::new()),
        })
    }

    /// Hand a message to the processor without waiting for it to be written
    pub fn enqueue(&self, message: Message) -> Result<()> {
        match self.producer.enqueue(message) {
            Ok(()) => {
                self.metrics.record_enqueued();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_rejected();
                Err(e)
            }
        }
    }

    /// Stop accepting messages, drain the queue and join the processor.
    ///
    /// Returns `false` if the processor thread panicked. Calling it again is
    /// a no-op that returns `true`.
    pub fn shutdown(&self) -> bool {
        self.producer.close();

        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Log processor thread panicked during shutdown: {:?}", e);
                return false;
            }
        }
        true
    }

    pub fn is_running(&self) -> bool {
        !self.producer.is_closed()
    }

    /// Messages waiting in the queue
    pub fn queued(&self) -> usize {
        self.producer.len()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &Arc<dyn ConfigProvider> {
        &self.config
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Record one more handle for `module`
    pub fn register(&self, module: &str) -> Result<()> {
        validate_module_name(module)?;
        *self.loggers.lock().entry(module.to_string()).or_insert(0) += 1;
        Ok(())
    }

    /// Drop one handle for `module`; returns `true` when that was the last
    /// handle of any module. Unknown modules leave the registry untouched
    /// and return `false`.
    pub fn unregister(&self, module: &str) -> bool {
        let mut loggers = self.loggers.lock();
        let Some(count) = loggers.get_mut(module) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            loggers.remove(module);
        }
        loggers.is_empty()
    }

    pub fn is_registered(&self, module: &str) -> bool {
        self.loggers.lock().contains_key(module)
    }

    /// Registered module names, sorted
    pub fn registered_modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = self.loggers.lock().keys().cloned().collect();
        modules.sort();
        modules
    }
}

impl Drop for LogManager {
    fn drop(&mut self) {
        self.shutdown();

        let rejected = self.metrics.rejected();
        if rejected > 0 {
            eprintln!(
                "[LOGGER WARNING] Log manager shut down after rejecting {} late messages",
                rejected
            );
        }
    }
}
