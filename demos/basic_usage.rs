//! Basic usage example
//!
//! Writes a few messages for two modules under `./logs` and echoes warnings
//! and worse to the console.
//!
//! Run with: cargo run --example basic_usage

use module_log_system::prelude::*;
use module_log_system::{call_site, info, warning};

fn main() -> Result<()> {
    println!("=== Module Log System - Basic Usage Example ===\n");

    let config = LogConfig::default()
        .with_colors(true)
        .with_date_time_format("%Y-%m-%d %H:%M:%S")
        .with_level(LogLevel::Warning, LevelConfig { print_to_console: true })
        .with_level(LogLevel::Error, LevelConfig { print_to_console: true })
        .with_level(LogLevel::Fatal, LevelConfig { print_to_console: true });

    let system = LogSystem::new(LogSettings::builder().config(config).build()?);

    let net = system.logger("net/auth")?;
    let db = system.logger("storage/db")?;

    info!(net, "user {} logged in", "alice");
    warning!(net, "token for {} expires in {}s", "alice", 30);
    db.debug("pool warmed up");
    db.log_with_call_chain(LogLevel::Error, "query failed", vec![call_site!()]);
    db.fatal("database unreachable");

    // dropping the last handle drains the queue before returning
    drop(net);
    drop(db);

    println!("\nLog files written below ./logs");
    Ok(())
}
