//! Shared-contact handling: ownership check, then score lookup

use teloxide::prelude::*;
use teloxide::types::Message;
use unic_langid::LanguageIdentifier;

use scorecore::i18n;
use scorecore::phone;
use scorecore::{ConversationState, Keyboard, LookupError, Reply};

use super::types::{send_reply, HandlerDeps, HandlerError, UserInfo};

/// Answers a shared contact.
///
/// The lookup only runs when the contact belongs to the sender; otherwise the
/// backend is never touched. Either way the user goes back to Idle and gets
/// the informational keyboard.
pub async fn contact_reply(
    deps: &HandlerDeps,
    sender: u64,
    contact_owner: Option<u64>,
    phone_number: &str,
    lang: &LanguageIdentifier,
) -> Reply {
    let previous = deps.conversations.finish(sender).await;
    if previous == ConversationState::Idle {
        log::debug!("Contact from user {} arrived without a pending /score", sender);
    }

    if contact_owner != Some(sender) {
        let err = LookupError::IdentityMismatch {
            sender,
            owner: contact_owner,
        };
        log::warn!("Rejected contact {}: {}", phone::mask(phone_number), err);
        return Reply::new(i18n::t(lang, err.message_key()), Keyboard::Main);
    }

    let text = deps.resolver.resolve(phone_number, lang).await;
    Reply::new(text, Keyboard::Main)
}

/// Handle a message carrying a contact
pub(super) async fn handle_contact(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(contact) = msg.contact() else {
        return Ok(());
    };
    let user = UserInfo::from_message(msg);
    let Some(sender) = user.user_id else {
        log::warn!("Ignoring contact without a sender in chat {}", user.chat_id);
        return Ok(());
    };

    log::info!("Received contact {} from user {}", phone::mask(&contact.phone_number), sender);

    let owner = contact.user_id.map(|id| id.0);
    let reply = contact_reply(deps, sender, owner, &contact.phone_number, &user.lang).await;
    send_reply(bot, &user, reply).await
}
