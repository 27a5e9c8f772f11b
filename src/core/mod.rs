//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod manager;
pub mod message;
pub mod metrics;
pub mod processor;
pub mod queue;
pub mod timestamp;

pub use appender::Appender;
pub use config::{ConfigProvider, GlobalConfig, LevelConfig, LogConfig, ModuleConfig, SharedConfig};
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{LogSystem, ModuleLogger};
pub use manager::{validate_module_name, LogManager, LogSettings, LogSettingsBuilder, DEFAULT_LOGS_DIR};
pub use message::{CallInfo, Message, RenderedMessage};
pub use metrics::LoggerMetrics;
pub use processor::LogProcessor;
pub use queue::{message_queue, QueueConsumer, QueueProducer};
pub use timestamp::{TimestampFormat, DEFAULT_DATE_TIME_FORMAT};
