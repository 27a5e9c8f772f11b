//! Log level definitions

use colored::Color;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Fatal = 4,
    Verbose = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Verbose,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Verbose => "VERBOSE",
        }
    }

    /// Foreground color used on the console when colors are enabled
    pub fn color_code(&self) -> Color {
        match self {
            LogLevel::Debug => Color::Green,
            LogLevel::Info => Color::TrueColor { r: 65, g: 105, b: 225 },
            LogLevel::Warning => Color::TrueColor { r: 255, g: 165, b: 0 },
            LogLevel::Error | LogLevel::Fatal => Color::Red,
            LogLevel::Verbose => Color::TrueColor { r: 245, g: 245, b: 245 },
        }
    }

    /// Background color, only FATAL has one
    pub fn background_color(&self) -> Option<Color> {
        match self {
            LogLevel::Fatal => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            "VERBOSE" => Ok(LogLevel::Verbose),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("Warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("VERBOSE".parse::<LogLevel>(), Ok(LogLevel::Verbose));
        assert!("trace".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_try_from_owned_string() {
        assert_eq!(LogLevel::try_from("error".to_string()), Ok(LogLevel::Error));
        assert!(LogLevel::try_from(String::from("loud")).is_err());
    }

    #[test]
    fn test_ordering_follows_declaration() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error < LogLevel::Fatal);
        assert!(LogLevel::Fatal < LogLevel::Verbose);
    }

    #[test]
    fn test_only_fatal_has_background() {
        for level in LogLevel::ALL {
            assert_eq!(level.background_color().is_some(), level == LogLevel::Fatal);
        }
    }
}
