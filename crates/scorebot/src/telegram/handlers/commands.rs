//! Command handler implementations (/start, /score, /help)

use teloxide::prelude::Bot;
use teloxide::types::Message;
use unic_langid::LanguageIdentifier;

use scorecore::i18n;
use scorecore::{Keyboard, Reply};

use super::types::{send_reply, HandlerDeps, HandlerError, UserInfo};
use crate::telegram::bot::Command;

/// Canned reply of a command.
///
/// Depends only on the command and the language, never on earlier turns.
pub fn command_reply(cmd: &Command, lang: &LanguageIdentifier) -> Reply {
    match cmd {
        Command::Start => Reply::new(i18n::t(lang, "commands-start"), Keyboard::Main),
        Command::Score => Reply::new(i18n::t(lang, "commands-score"), Keyboard::ContactRequest),
        Command::Help => Reply::new(i18n::t(lang, "commands-help"), Keyboard::Main),
    }
}

/// Applies a command to the sender's conversation and returns its reply.
///
/// `/score` moves the sender to AwaitingContact; `/start` and `/help` leave
/// the state as it is. Anonymous senders are answered without tracking.
pub async fn route_command(deps: &HandlerDeps, user_id: Option<u64>, cmd: &Command, lang: &LanguageIdentifier) -> Reply {
    if let (Command::Score, Some(user_id)) = (cmd, user_id) {
        deps.conversations.await_contact(user_id).await;
        log::debug!("User {} is awaiting contact", user_id);
    }
    command_reply(cmd, lang)
}

/// Handle a parsed command
pub(super) async fn handle_command(bot: &Bot, msg: &Message, cmd: Command, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let user = UserInfo::from_message(msg);
    log::info!("Received command /{} from chat {}", cmd.name(), user.chat_id);

    let reply = route_command(deps, user.user_id, &cmd, &user.lang).await;
    send_reply(bot, &user, reply).await
}
