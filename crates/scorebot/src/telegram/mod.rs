//! Telegram bot integration and handlers

pub mod bot;
pub mod handlers;
pub mod keyboards;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{command_reply, contact_reply, route_command, schema, HandlerDeps, HandlerError};
pub use keyboards::{keyboard_markup, render_keyboard};
