//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use module_log_system::prelude::*;
//! use module_log_system::{call_site, error, info};
//!
//! let dir = std::env::temp_dir().join("module_log_system_macros_doc");
//! let system = LogSystem::new(LogSettings::builder().logs_dir(&dir).build().unwrap());
//! let logger = system.logger("server").unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With the current source location as call chain
//! logger.log_with_call_chain(LogLevel::Error, "bind failed", vec![call_site!()]);
//! error!(logger, "giving up after {} attempts", 3);
//! ```

/// Build a [`CallInfo`](crate::CallInfo) for the current source location.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallInfo::new(file!(), line!())
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use module_log_system::prelude::*;
/// # let dir = std::env::temp_dir().join("module_log_system_log_doc");
/// # let system = LogSystem::new(LogSettings::builder().logs_dir(&dir).build().unwrap());
/// # let logger = system.logger("doc").unwrap();
/// use module_log_system::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message; also lands in `warnings.log`.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message; also lands in `errors.log`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message; also lands in `fatals.log`.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Verbose, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, LogSettings, LogSystem};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_level_macros_write_lines() {
        let dir = TempDir::new().unwrap();
        let system = LogSystem::new(LogSettings::builder().logs_dir(dir.path()).build().unwrap());
        let logger = system.logger("macros").unwrap();

        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warning!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");
        verbose!(logger, "Verbose message");
        drop(logger);

        let content = fs::read_to_string(dir.path().join("macros.log")).unwrap();
        let levels: Vec<&str> = content
            .lines()
            .map(|line| line.split("] [").nth(1).and_then(|rest| rest.split(']').next()).unwrap())
            .collect();
        assert_eq!(
            levels,
            vec!["INFO", "DEBUG", "INFO", "WARNING", "ERROR", "FATAL", "VERBOSE"]
        );
        assert!(content.contains("[WARNING] Retry 1 of 3"));
    }

    #[test]
    fn test_call_site_macro() {
        let call = call_site!();
        assert!(call.file.ends_with("macros.rs"));
        assert!(call.line > 0);
    }
}
