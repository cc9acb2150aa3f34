//! Handler types and dependencies

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::Message;
use unic_langid::LanguageIdentifier;

use scorecore::i18n;
use scorecore::{ConversationTracker, Reply, ScoreResolver};

use crate::telegram::keyboards::keyboard_markup;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
///
/// Built once in `main` and cloned into every branch of the handler tree.
#[derive(Clone)]
pub struct HandlerDeps {
    pub resolver: Arc<ScoreResolver>,
    pub conversations: ConversationTracker,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(resolver: Arc<ScoreResolver>, conversations: ConversationTracker) -> Self {
        Self {
            resolver,
            conversations,
        }
    }
}

/// Sender details the handlers care about
#[derive(Clone, Debug)]
pub struct UserInfo {
    pub chat_id: ChatId,
    /// Absent for anonymous senders (channel posts, anonymous admins)
    pub user_id: Option<u64>,
    pub lang: LanguageIdentifier,
}

impl UserInfo {
    /// Extract user info from a Telegram message
    pub fn from_message(msg: &Message) -> Self {
        Self {
            chat_id: msg.chat.id,
            user_id: msg.from.as_ref().map(|u| u.id.0),
            lang: i18n::lang_for_user(msg.from.as_ref().and_then(|u| u.language_code.as_deref())),
        }
    }
}

/// Sends a reply with its keyboard attached
pub async fn send_reply(bot: &Bot, user: &UserInfo, reply: Reply) -> Result<(), HandlerError> {
    bot.send_message(user.chat_id, reply.text)
        .reply_markup(keyboard_markup(reply.keyboard, &user.lang))
        .await?;
    Ok(())
}
