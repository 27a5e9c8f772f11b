//! Logical loggers and the context that hands them out
//!
//! A [`LogSystem`] owns the settings and knows the currently running
//! [`LogManager`], if any. Every [`ModuleLogger`] holds a strong reference to
//! the manager, so the subsystem lives exactly as long as at least one
//! handle does: the first `logger()` call starts it and dropping the last
//! handle drains the queue and joins the processor thread.

use super::{
    error::Result,
    log_level::LogLevel,
    manager::{validate_module_name, LogManager, LogSettings},
    message::{CallInfo, Message},
    metrics::LoggerMetrics,
};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Cloneable context that creates module loggers
///
/// # Example
/// ```
/// use module_log_system::prelude::*;
///
/// let dir = std::env::temp_dir().join("module_log_system_doc");
/// let system = LogSystem::new(LogSettings::builder().logs_dir(&dir).build().unwrap());
///
/// let logger = system.logger("net/auth").unwrap();
/// logger.warning("token expired");
/// assert!(system.is_running());
///
/// drop(logger);
/// assert!(!system.is_running());
/// ```
#[derive(Clone)]
pub struct LogSystem {
    inner: Arc<SystemInner>,
}

struct SystemInner {
    settings: LogSettings,
    active: Mutex<Weak<LogManager>>,
}

impl LogSystem {
    pub fn new(settings: LogSettings) -> Self {
        Self {
            inner: Arc::new(SystemInner {
                settings,
                active: Mutex::new(Weak::new()),
            }),
        }
    }

    /// Register a handle for `module`, starting the subsystem if needed
    pub fn logger(&self, module: impl Into<String>) -> Result<ModuleLogger> {
        let module = module.into();
        validate_module_name(&module)?;

        let manager = {
            let mut active = self.inner.active.lock();
            match active.upgrade() {
                Some(manager) => manager,
                None => {
                    let manager = Arc::new(LogManager::start(self.inner.settings.clone())?);
                    *active = Arc::downgrade(&manager);
                    manager
                }
            }
        };

        manager.register(&module)?;
        Ok(ModuleLogger { module, manager })
    }

    /// The running manager, if any handle is alive
    pub fn manager(&self) -> Option<Arc<LogManager>> {
        self.inner.active.lock().upgrade()
    }

    pub fn is_running(&self) -> bool {
        self.manager().is_some()
    }

    pub fn settings(&self) -> &LogSettings {
        &self.inner.settings
    }
}

/// Handle for logging under one module name
pub struct ModuleLogger {
    module: String,
    manager: Arc<LogManager>,
}

impl ModuleLogger {
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Whether the module's configuration enables `level`
    pub fn is_log_level(&self, level: LogLevel) -> bool {
        self.manager.config().module(&self.module).is_enabled(level)
    }

    /// Enqueue a message. Returns `Ok(false)` when the level is disabled for
    /// this module.
    pub fn try_log(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        call_chain: Vec<CallInfo>,
    ) -> Result<bool> {
        if !self.is_log_level(level) {
            return Ok(false);
        }

        let message = Message::new(self.module.as_str(), level, message).with_call_chain(call_chain);
        self.manager.enqueue(message)?;
        Ok(true)
    }

    /// Fire-and-forget logging; a stopped subsystem is counted, not reported
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let _ = self.try_log(level, message, Vec::new());
    }

    pub fn log_with_call_chain(
        &self,
        level: LogLevel,
        message: impl AsRef<str>,
        call_chain: Vec<CallInfo>,
    ) {
        let _ = self.try_log(level, message, call_chain);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message);
    }

    #[inline]
    pub fn verbose(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Verbose, message);
    }

    pub fn manager(&self) -> &Arc<LogManager> {
        &self.manager
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.manager.metrics()
    }
}

impl Clone for ModuleLogger {
    fn clone(&self) -> Self {
        // the name was validated when the first handle was created
        let _ = self.manager.register(&self.module);
        Self {
            module: self.module.clone(),
            manager: Arc::clone(&self.manager),
        }
    }
}

impl Drop for ModuleLogger {
    fn drop(&mut self) {
        self.manager.unregister(&self.module);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogConfig, ModuleConfig};
    use std::fs;
    use tempfile::TempDir;

    fn system(dir: &TempDir, config: LogConfig) -> LogSystem {
        LogSystem::new(
            LogSettings::builder()
                .logs_dir(dir.path())
                .config(config)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_lifecycle_follows_handles() {
        let dir = TempDir::new().unwrap();
        let system = system(&dir, LogConfig::default());
        assert!(!system.is_running());

        let a = system.logger("a").unwrap();
        let b = system.logger("b").unwrap();
        let a2 = a.clone();
        assert!(Arc::ptr_eq(a.manager(), b.manager()));

        let manager = system.manager().unwrap();
        assert_eq!(manager.registered_modules(), vec!["a", "b"]);
        drop(manager);

        drop(a);
        drop(b);
        assert!(system.is_running());
        drop(a2);
        assert!(!system.is_running());

        // a new handle starts a fresh manager
        let again = system.logger("a").unwrap();
        assert!(system.is_running());
        assert_eq!(again.metrics().enqueued(), 0);
    }

    #[test]
    fn test_dropping_last_handle_flushes() {
        let dir = TempDir::new().unwrap();
        let system = system(&dir, LogConfig::default());

        let logger = system.logger("svc/worker").unwrap();
        for i in 0..10 {
            logger.info(format!("tick {}", i));
        }
        drop(logger);

        let content = fs::read_to_string(dir.path().join("svc/worker.log")).unwrap();
        assert_eq!(content.lines().count(), 10);
    }

    #[test]
    fn test_disabled_levels_are_not_enqueued() {
        let dir = TempDir::new().unwrap();
        let config = LogConfig::default().with_module(
            "quiet",
            ModuleConfig {
                print_to_console: false,
                log_levels: Some(vec![LogLevel::Error]),
            },
        );
        let system = system(&dir, config);
        let logger = system.logger("quiet").unwrap();

        assert!(!logger.is_log_level(LogLevel::Info));
        assert!(!logger.try_log(LogLevel::Info, "skip", Vec::new()).unwrap());
        assert!(logger.try_log(LogLevel::Error, "keep", Vec::new()).unwrap());
        assert_eq!(logger.metrics().enqueued(), 1);
    }

    #[test]
    fn test_invalid_module_does_not_start_subsystem() {
        let dir = TempDir::new().unwrap();
        let system = system(&dir, LogConfig::default());
        assert!(system.logger("../outside").is_err());
        assert!(!system.is_running());
    }
}
