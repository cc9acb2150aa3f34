//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Startup diagnostics for the Google Sheets configuration

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::config::SheetsConfig;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger is already set
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the score sheet configuration at application startup
///
/// The key file is only read on each lookup, so a missing file is reported
/// here as an error but does not stop the bot.
pub fn log_sheets_configuration(config: &SheetsConfig) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Google Sheets configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Spreadsheet: {}", config.spreadsheet_id);
    log::info!("Sheet: {}", config.sheet_name);
    log::info!("API base: {}", config.api_base);
    log::info!("Request timeout: {}s", config.timeout.as_secs());

    let key_path = &config.credentials_path;
    if key_path.is_file() {
        log::info!("✅ GOOGLE_SHEETS_KEY: {}", key_path.display());
    } else {
        log::error!("❌ GOOGLE_SHEETS_KEY: {} (FILE NOT FOUND!)", key_path.display());
        log::error!("   Current directory: {:?}", std::env::current_dir());
        log::error!("   Every score lookup will answer with a connection error until the key is in place");
    }
}
