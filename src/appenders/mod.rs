//! Appender implementations

pub mod aggregate;
pub mod console;
pub mod module_file;

pub use aggregate::{AggregateAppender, AggregateSink};
pub use console::{ConsoleAppender, ConsoleTarget};
pub use module_file::ModuleFileAppender;

// Re-export trait for convenience
pub use crate::core::Appender;
