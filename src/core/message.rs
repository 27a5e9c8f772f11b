//! Log message structure

use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Local};
use std::fmt::{self, Write as _};

/// One frame of the caller-supplied call chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInfo {
    pub file: String,
    pub line: u32,
}

impl CallInfo {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for CallInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A log record handed from a producer thread to the processor.
///
/// Messages are immutable once built; the builder methods consume `self`
/// so a message can only be shaped before it is enqueued.
#[derive(Debug, Clone)]
pub struct Message {
    module: String,
    level: LogLevel,
    text: String,
    call_chain: Vec<CallInfo>,
    timestamp: DateTime<Local>,
}

impl Message {
    /// Sanitize log text to prevent log injection attacks
    ///
    /// Replaces newlines and carriage returns with escape sequences so one
    /// message always ends up as one line in every sink.
    fn sanitize_text(text: &str) -> String {
        text.replace('\n', "\\n").replace('\r', "\\r")
    }

    pub fn new(module: impl Into<String>, level: LogLevel, text: impl AsRef<str>) -> Self {
        Self {
            module: module.into(),
            level,
            text: Self::sanitize_text(text.as_ref()),
            call_chain: Vec::new(),
            timestamp: Local::now(),
        }
    }

    /// Attach the call chain, outermost call first
    pub fn with_call_chain(mut self, call_chain: Vec<CallInfo>) -> Self {
        self.call_chain = call_chain;
        self
    }

    /// Override the capture time (replaying or importing messages)
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn call_chain(&self) -> &[CallInfo] {
        &self.call_chain
    }

    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    /// Text followed by ` (a.c:10 -> b.c:20)` when a call chain is present
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 16 * self.call_chain.len());
        out.push_str(&self.text);
        if !self.call_chain.is_empty() {
            out.push_str(" (");
            for (idx, call) in self.call_chain.iter().enumerate() {
                if idx > 0 {
                    out.push_str(" -> ");
                }
                let _ = write!(out, "{}", call);
            }
            out.push(')');
        }
        out
    }
}

/// A message with its display strings computed once and shared by every sink
#[derive(Debug)]
pub struct RenderedMessage<'a> {
    pub message: &'a Message,
    pub timestamp: String,
    pub text: String,
}

impl<'a> RenderedMessage<'a> {
    pub fn new(message: &'a Message, format: &TimestampFormat) -> Self {
        Self {
            message,
            timestamp: format.format(message.timestamp()),
            text: message.render_text(),
        }
    }

    pub fn module(&self) -> &str {
        self.message.module()
    }

    pub fn level(&self) -> LogLevel {
        self.message.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_call_chain_has_no_suffix() {
        let msg = Message::new("net/io", LogLevel::Info, "connected");
        assert_eq!(msg.render_text(), "connected");
    }

    #[test]
    fn test_call_chain_suffix() {
        let msg = Message::new("net/io", LogLevel::Error, "boom").with_call_chain(vec![
            CallInfo::new("a.c", 10),
            CallInfo::new("b.c", 20),
        ]);
        assert_eq!(msg.render_text(), "boom (a.c:10 -> b.c:20)");
    }

    #[test]
    fn test_text_is_sanitized() {
        let msg = Message::new("core", LogLevel::Info, "line one\nline two\r\nend");
        assert_eq!(msg.text(), "line one\\nline two\\r\\nend");
    }

    #[test]
    fn test_tabs_are_kept() {
        let msg = Message::new("core", LogLevel::Info, "key:\tvalue");
        assert_eq!(msg.text(), "key:\tvalue");
        assert_eq!(msg.render_text(), "key:\tvalue");
    }

    #[test]
    fn test_rendered_message_uses_format() {
        let ts = Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        let msg = Message::new("core", LogLevel::Debug, "hi").with_timestamp(ts);
        let format = TimestampFormat::parse("%Y-%m-%d %H:%M:%S").expect("valid format");
        let rendered = RenderedMessage::new(&msg, &format);

        assert_eq!(rendered.timestamp, "2025-01-08 10:30:45");
        assert_eq!(rendered.text, "hi");
        assert_eq!(rendered.module(), "core");
        assert_eq!(rendered.level(), LogLevel::Debug);
    }
}
