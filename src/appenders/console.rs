//! Console appender implementation

use crate::core::{Appender, ConfigProvider, RenderedMessage, Result};
use colored::{Color, Colorize};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Once};

const TIMESTAMP_COLOR: Color = Color::TrueColor { r: 255, g: 255, b: 150 };
const MODULE_COLOR: Color = Color::TrueColor { r: 244, g: 164, b: 96 };

/// Where console lines go
#[derive(Clone, Default)]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Writer(Arc<Mutex<Box<dyn Write + Send>>>),
}

impl ConsoleTarget {
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        ConsoleTarget::Writer(Arc::new(Mutex::new(Box::new(writer))))
    }
}

impl fmt::Debug for ConsoleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleTarget::Stdout => f.write_str("Stdout"),
            ConsoleTarget::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

pub struct ConsoleAppender {
    target: ConsoleTarget,
    config: Arc<dyn ConfigProvider>,
}

impl ConsoleAppender {
    pub fn new(config: Arc<dyn ConfigProvider>) -> Self {
        Self {
            target: ConsoleTarget::Stdout,
            config,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }

    /// `[ts] [module] [LEVEL] text` without escape codes
    pub fn format_plain(record: &RenderedMessage<'_>) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            record.timestamp,
            record.module(),
            record.level(),
            record.text
        )
    }

    /// Same fields as [`format_plain`](Self::format_plain) with severity colors
    pub fn format_colored(record: &RenderedMessage<'_>) -> String {
        let level = record.level();
        let mut level_str = level.to_str().color(level.color_code());
        if let Some(background) = level.background_color() {
            level_str = level_str.on_color(background);
        }

        format!(
            "[{}] [{}] [{}] {}",
            record.timestamp.as_str().color(TIMESTAMP_COLOR),
            record.module().color(MODULE_COLOR),
            level_str,
            record.text
        )
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        match &self.target {
            ConsoleTarget::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{}", line)?;
                out.flush()
            }
            ConsoleTarget::Writer(writer) => {
                let mut out = writer.lock();
                writeln!(out, "{}", line)?;
                out.flush()
            }
        }
    }
}

fn ensure_terminal_color_support() {
    static ENABLE: Once = Once::new();
    ENABLE.call_once(|| {
        #[cfg(windows)]
        {
            let _ = colored::control::set_virtual_terminal(true);
        }
    });
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &RenderedMessage<'_>) -> Result<()> {
        if !self.config.print_to_console(record.module(), record.level()) {
            return Ok(());
        }

        let line = if self.config.global().enable_colors {
            ensure_terminal_color_support();
            Self::format_colored(record)
        } else {
            Self::format_plain(record)
        };

        self.write_line(&line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match &self.target {
            ConsoleTarget::Stdout => io::stdout().flush()?,
            ConsoleTarget::Writer(writer) => writer.lock().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
