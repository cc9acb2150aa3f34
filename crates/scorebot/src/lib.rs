//! scorebot - Telegram bot that answers "what loyalty score is on file for my number?"
//!
//! # Module Structure
//!
//! - `telegram`: command enum, bot setup, keyboards and the handler tree
//!
//! The lookup engine itself lives in the `scorecore` crate.

pub mod telegram;

pub use telegram::{
    command_reply, contact_reply, create_bot, route_command, schema, setup_bot_commands, Command, HandlerDeps,
};
