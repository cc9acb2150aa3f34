//! scorecore - score lookup engine behind the scorebot Telegram bot
//!
//! # Module Structure
//!
//! - `config`: environment configuration and tuning constants
//! - `error`: Sheets and lookup error taxonomy
//! - `sheets`: Google Sheets service-account client and the `SheetSource` seam
//! - `resolver`: phone-number lookup over a sheet snapshot
//! - `conversation`: in-memory per-user flow state
//! - `reply`, `i18n`: transport-neutral replies and localized texts

pub mod config;
pub mod conversation;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod phone;
pub mod reply;
pub mod resolver;
pub mod sheets;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigError, SheetsConfig};
pub use conversation::{ConversationState, ConversationTracker};
pub use error::{LookupError, LookupResult, SheetsError};
pub use logging::{init_logger, log_sheets_configuration};
pub use reply::{Keyboard, KeyboardSpec, Reply};
pub use resolver::{find_score, ScoreMatch, ScoreResolver};
pub use sheets::{GoogleSheetsClient, SheetSource, Snapshot};
