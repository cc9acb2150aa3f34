//! Per-user conversation state
//!
//! The only multi-step flow is `/score` → contact → result. State lives in
//! memory with a time-to-live and is lost on restart; contacts are answered
//! regardless of the tracked state.

use std::time::Duration;

use moka::future::Cache;

use crate::config;

/// Where a user is in the score flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    /// `/score` was sent and the contact-request keyboard is showing
    AwaitingContact,
}

/// In-memory conversation tracker keyed by Telegram user id
#[derive(Clone)]
pub struct ConversationTracker {
    awaiting: Cache<u64, ConversationState>,
}

impl ConversationTracker {
    /// Creates a tracker whose AwaitingContact entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        let awaiting = Cache::builder()
            .max_capacity(config::conversation::MAX_TRACKED_USERS)
            .time_to_live(ttl)
            .build();
        Self { awaiting }
    }

    /// Current state of a user; expired or unknown users are Idle.
    pub async fn state(&self, user_id: u64) -> ConversationState {
        self.awaiting.get(&user_id).await.unwrap_or_default()
    }

    /// Idle → AwaitingContact (after `/score`).
    pub async fn await_contact(&self, user_id: u64) {
        self.awaiting.insert(user_id, ConversationState::AwaitingContact).await;
    }

    /// Any state → Idle (after a contact is processed). Returns the state left behind.
    pub async fn finish(&self, user_id: u64) -> ConversationState {
        self.awaiting.remove(&user_id).await.unwrap_or_default()
    }
}

impl Default for ConversationTracker {
    fn default() -> Self {
        Self::new(config::conversation::awaiting_contact_ttl())
    }
}
