//! Bot initialization utilities
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command registration in the Telegram UI

use reqwest::ClientBuilder;
use secrecy::{ExposeSecret, SecretString};
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;
use unic_langid::LanguageIdentifier;

use scorecore::config;
use scorecore::i18n;

/// Bot commands
///
/// Menu descriptions are localized in `localized_commands`.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    Start,
    Score,
    Help,
}

impl Command {
    /// Every command in menu order
    pub const ALL: [Command; 3] = [Command::Start, Command::Score, Command::Help];

    /// Command name as typed by the user, without the slash
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Score => "score",
            Command::Help => "help",
        }
    }
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, TLS setup, etc.)
pub fn create_bot(token: &SecretString) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token.expose_secret(), client);

    // Check if local Bot API server is configured
    let bot = if let Some(bot_api_url) = config::BOT_API_URL.as_deref() {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

/// Localized command menu for one language
pub fn localized_commands(lang: &LanguageIdentifier) -> Vec<BotCommand> {
    Command::ALL
        .iter()
        .map(|cmd| {
            let key = format!("commands-description-{}", cmd.name());
            BotCommand::new(cmd.name(), i18n::t(lang, &key))
        })
        .collect()
}

/// Sets up bot commands in Telegram UI
///
/// The default menu is in the fallback language; every other supported
/// language gets its own menu keyed by `language_code`.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(localized_commands(&i18n::default_lang())).await?;

    for (code, _) in i18n::SUPPORTED_LANGS {
        let lang = i18n::lang_from_code(code);
        if lang == i18n::default_lang() {
            continue;
        }
        bot.set_my_commands(localized_commands(&lang))
            .language_code(code.to_string())
            .await?;
    }

    Ok(())
}
