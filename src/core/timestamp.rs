//! Timestamp formatting utilities
//!
//! Log lines carry the message's capture time rendered with a configurable
//! strftime pattern. The pattern is validated once, before the processor
//! starts, so a bad pattern fails startup instead of corrupting output.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write as _;

/// Pattern used when the configuration does not name one (locale date and time)
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%x %X";

/// Characters removed from configured patterns; log lines add their own brackets
const STRIPPED_CHARS: &[char] = &['[', ']', '(', ')'];

/// A validated strftime pattern
///
/// # Examples
///
/// ```
/// use module_log_system::TimestampFormat;
///
/// let format = TimestampFormat::parse("[%Y-%m-%d]").unwrap();
/// assert_eq!(format.pattern(), "%Y-%m-%d");
///
/// assert!(TimestampFormat::parse("%Y-%Q").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat {
    pattern: String,
}

impl TimestampFormat {
    /// Strip bracket characters and validate the remaining pattern
    pub fn parse(pattern: &str) -> Result<Self> {
        let cleaned: String = pattern.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();

        if cleaned.trim().is_empty() {
            return Err(LoggerError::time_format(pattern, "pattern is empty"));
        }

        if StrftimeItems::new(&cleaned).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::time_format(
                pattern,
                "contains an unsupported format specifier",
            ));
        }

        // trial run against the current time
        let mut probe = String::new();
        write!(probe, "{}", Local::now().format(&cleaned))
            .map_err(|_| LoggerError::time_format(pattern, "trial format failed"))?;

        Ok(Self { pattern: cleaned })
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render a timestamp; yields an empty string if chrono refuses the value
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        let mut out = String::new();
        if write!(out, "{}", datetime.format(&self.pattern)).is_err() {
            out.clear();
        }
        out
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_TIME_FORMAT.to_string(),
        }
    }
}
