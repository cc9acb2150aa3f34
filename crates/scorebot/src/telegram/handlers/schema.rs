//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::handle_command;
use super::contact::handle_contact;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// # Arguments
/// * `deps` - Handler dependencies (score resolver, conversation tracker)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_contact = deps;

    dptree::entry()
        // Command handler
        .branch(command_handler(deps_commands))
        // Shared phone number
        .branch(contact_handler(deps_contact))
}

/// Handler for bot commands (/start, /score, /help)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move { handle_command(&bot, &msg, cmd, &deps).await }
        },
    ))
}

/// Handler for messages carrying a contact
fn contact_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.contact().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                if let Err(e) = handle_contact(&bot, &msg, &deps).await {
                    log::error!("Failed to answer contact in chat {}: {}", msg.chat.id, e);
                }
                Ok::<(), HandlerError>(())
            }
        })
}
