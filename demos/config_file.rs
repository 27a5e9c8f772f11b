//! Configuration file example
//!
//! Loads `log-config.toml` (created with defaults if missing), logs through
//! it, then reloads the file to switch console echo on at runtime.
//!
//! Run with: cargo run --example config_file

use module_log_system::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const DEFAULT_CONFIG: &str = r#"[Global]
EnableColors = true
DateTimeFormat = "[%d/%m/%Y %H:%M:%S]"

[Logger."app/core"]
LogLevel = ["Info", "Warning", "Error", "Fatal"]
"#;

fn main() -> Result<()> {
    let path = Path::new("log-config.toml");
    if !path.exists() {
        fs::write(path, DEFAULT_CONFIG)?;
    }

    let config = Arc::new(SharedConfig::load(path)?);
    let system = LogSystem::new(LogSettings::builder().provider(config.clone()).build()?);
    let logger = system.logger("app/core")?;

    logger.debug("filtered out by the module's LogLevel list");
    logger.info("written to logs/app/core.log only");

    fs::write(
        path,
        format!("{}\n[LogLevel.Info]\nPrintToConsole = true\n", DEFAULT_CONFIG),
    )?;
    config.reload()?;
    logger.info("now echoed to the console as well");

    Ok(())
}
