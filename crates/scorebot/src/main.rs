use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;

use scorebot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use scorecore::{config, init_logger, log_sheets_configuration};
use scorecore::{Config, ConversationTracker, GoogleSheetsClient, ScoreResolver};

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    // Log panics from handler tasks instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {}", panic_info);
    }));

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    let config = Config::from_env()?;
    log_sheets_configuration(&config.sheets);

    run_bot(config).await
}

/// Builds the application context and runs long polling until Ctrl-C
async fn run_bot(config: Config) -> Result<()> {
    log::info!("Starting bot...");

    let bot = create_bot(&config.telegram_token)?;

    // The menu is cosmetic: a failure here must not keep the bot down
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let sheets = GoogleSheetsClient::new(config.sheets)?;
    let resolver = Arc::new(ScoreResolver::new(Arc::new(sheets)));
    let deps = HandlerDeps::new(resolver, ConversationTracker::default());

    log::info!("Bot started, waiting for updates");

    Dispatcher::builder(bot, schema(deps))
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Bot stopped");
    Ok(())
}
