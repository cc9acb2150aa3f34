//! Transport-neutral reply descriptors
//!
//! Handlers build a [`Reply`]; the Telegram layer renders its keyboard.

use unic_langid::LanguageIdentifier;

use crate::i18n;

/// The two reply keyboards the bot ever shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// Persistent informational keyboard with the "View score" button
    Main,
    /// Single-use keyboard asking the user to share their contact
    ContactRequest,
}

/// Rendering options of a reply keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardSpec {
    /// Button labels, one button per row, in display order
    pub buttons: Vec<String>,
    pub resize_to_fit: bool,
    /// Hide the keyboard after one press
    pub one_time_use: bool,
    /// Pressing a button shares the user's phone number
    pub request_contact: bool,
}

impl Keyboard {
    /// Describes this keyboard with labels in the given language.
    pub fn spec(self, lang: &LanguageIdentifier) -> KeyboardSpec {
        let view_score = i18n::t(lang, "keyboard-view-score");
        match self {
            Keyboard::Main => KeyboardSpec {
                buttons: vec![view_score],
                resize_to_fit: true,
                one_time_use: false,
                request_contact: true,
            },
            Keyboard::ContactRequest => KeyboardSpec {
                buttons: vec![view_score],
                resize_to_fit: true,
                one_time_use: true,
                request_contact: true,
            },
        }
    }
}

/// A text reply with exactly one keyboard attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }
}
