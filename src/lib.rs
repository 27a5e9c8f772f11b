//! # Module Log System
//!
//! Asynchronous, multi-sink log writer. Application threads enqueue
//! messages tagged with a module name; one background thread writes each
//! message to the module's own file, to a severity aggregate file for
//! warnings, errors and fatals, and optionally to the console.
//!
//! ## Layout on disk
//!
//! - `logs/<module>.log`: every message of the module (`net/auth` becomes
//!   `logs/net/auth.log`, directories are created on first use)
//! - `logs/warnings.log`, `logs/errors.log`, `logs/fatals.log`: all modules
//!
//! ## Example
//!
//! ```
//! use module_log_system::prelude::*;
//! use module_log_system::{info, warning};
//!
//! let dir = std::env::temp_dir().join("module_log_system_lib_doc");
//! let system = LogSystem::new(LogSettings::builder().logs_dir(&dir).build()?);
//! let logger = system.logger("net/io")?;
//!
//! info!(logger, "listening on port {}", 7777);
//! warning!(logger, "disk low");
//! # Ok::<(), module_log_system::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::ConsoleTarget;
    pub use crate::core::{
        CallInfo, ConfigProvider, LevelConfig, LogConfig, LogLevel, LogSettings, LogSystem,
        LoggerError, LoggerMetrics, Message, ModuleConfig, ModuleLogger, Result, SharedConfig,
    };
}

pub use appenders::{AggregateSink, ConsoleTarget};
pub use core::{
    Appender, CallInfo, ConfigProvider, GlobalConfig, LevelConfig, LogConfig, LogLevel,
    LogManager, LogSettings, LogSettingsBuilder, LogSystem, LoggerError, LoggerMetrics, Message,
    ModuleConfig, ModuleLogger, Result, SharedConfig, TimestampFormat, DEFAULT_DATE_TIME_FORMAT,
    DEFAULT_LOGS_DIR,
};
