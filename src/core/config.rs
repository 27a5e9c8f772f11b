//! Runtime configuration read by the processor and by module handles
//!
//! Configuration is consulted on demand: the processor asks for the console
//! flags of every message it writes, so a provider that reloads its source
//! takes effect on the next message without restarting the worker.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::DEFAULT_DATE_TIME_FORMAT;
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings that apply to the whole subsystem
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GlobalConfig {
    pub enable_colors: bool,
    pub date_time_format: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            enable_colors: false,
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
        }
    }
}

/// Settings for one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModuleConfig {
    pub print_to_console: bool,
    /// Severities this module logs; `None` enables all of them
    #[serde(rename = "LogLevel")]
    pub log_levels: Option<Vec<LogLevel>>,
}

impl ModuleConfig {
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.log_levels
            .as_ref()
            .map_or(true, |levels| levels.contains(&level))
    }
}

/// Settings for one severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LevelConfig {
    pub print_to_console: bool,
}

/// Source of configuration values, queried on demand
pub trait ConfigProvider: Send + Sync {
    fn global(&self) -> GlobalConfig;
    fn module(&self, module: &str) -> ModuleConfig;
    fn level(&self, level: LogLevel) -> LevelConfig;

    /// Console echo is the OR of the module flag and the severity flag
    fn print_to_console(&self, module: &str, level: LogLevel) -> bool {
        self.module(module).print_to_console || self.level(level).print_to_console
    }
}

/// Complete configuration document
///
/// # Example
///
/// ```
/// use module_log_system::{ConfigProvider, LogConfig, LogLevel};
///
/// let config = LogConfig::from_toml_str(r#"
///     [Global]
///     EnableColors = true
///
///     [Logger."net/auth"]
///     PrintToConsole = true
///
///     [LogLevel.Error]
///     PrintToConsole = true
/// "#).unwrap();
///
/// assert!(config.global().enable_colors);
/// assert!(config.print_to_console("net/auth", LogLevel::Debug));
/// assert!(config.print_to_console("storage", LogLevel::Error));
/// assert!(!config.print_to_console("storage", LogLevel::Info));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    #[serde(rename = "Global")]
    pub global: GlobalConfig,
    #[serde(rename = "Logger")]
    pub modules: HashMap<String, ModuleConfig>,
    #[serde(rename = "LogLevel")]
    pub levels: HashMap<LogLevel, LevelConfig>,
}

impl LogConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading log configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&content)
    }

    #[must_use]
    pub fn with_colors(mut self, enable: bool) -> Self {
        self.global.enable_colors = enable;
        self
    }

    #[must_use]
    pub fn with_date_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.global.date_time_format = pattern.into();
        self
    }

    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>, config: ModuleConfig) -> Self {
        self.modules.insert(module.into(), config);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel, config: LevelConfig) -> Self {
        self.levels.insert(level, config);
        self
    }
}

impl ConfigProvider for LogConfig {
    fn global(&self) -> GlobalConfig {
        self.global.clone()
    }

    fn module(&self, module: &str) -> ModuleConfig {
        self.modules.get(module).cloned().unwrap_or_default()
    }

    fn level(&self, level: LogLevel) -> LevelConfig {
        self.levels.get(&level).copied().unwrap_or_default()
    }
}

/// File-backed configuration that can be re-read at runtime
pub struct SharedConfig {
    path: PathBuf,
    current: RwLock<LogConfig>,
}

impl SharedConfig {
    /// Load the file; a missing file is an error
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = LogConfig::from_file(&path)?;
        Ok(Self {
            path,
            current: RwLock::new(config),
        })
    }

    /// Re-read the file. On failure the previous configuration stays active.
    pub fn reload(&self) -> Result<()> {
        let config = LogConfig::from_file(&self.path)?;
        *self.current.write() = config;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> LogConfig {
        self.current.read().clone()
    }
}

impl ConfigProvider for SharedConfig {
    fn global(&self) -> GlobalConfig {
        self.current.read().global()
    }

    fn module(&self, module: &str) -> ModuleConfig {
        self.current.read().module(module)
    }

    fn level(&self, level: LogLevel) -> LevelConfig {
        self.current.read().level(level)
    }
}
