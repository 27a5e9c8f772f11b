//! Appender trait for log output destinations

use super::{error::Result, message::RenderedMessage};

/// A sink driven by the processor thread.
///
/// `append` receives the message with its timestamp and text already
/// rendered; an appender only adds its own field layout and decides whether
/// the message concerns it at all.
pub trait Appender: Send {
    fn append(&mut self, record: &RenderedMessage<'_>) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
