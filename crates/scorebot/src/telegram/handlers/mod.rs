//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the Telegram bot.
//! Reply construction is kept apart from sending, so the command and contact
//! logic can be tested without a Bot API.

mod commands;
mod contact;
mod schema;
mod types;

pub use commands::{command_reply, route_command};
pub use contact::contact_reply;
pub use schema::schema;
pub use types::{send_reply, HandlerDeps, HandlerError, UserInfo};
