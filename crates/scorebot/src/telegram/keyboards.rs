//! Rendering of reply keyboards

use teloxide::types::{ButtonRequest, KeyboardButton, KeyboardMarkup};
use unic_langid::LanguageIdentifier;

use scorecore::{Keyboard, KeyboardSpec};

/// Builds a Telegram reply keyboard from its descriptor, one button per row.
pub fn render_keyboard(spec: &KeyboardSpec) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = spec
        .buttons
        .iter()
        .map(|label| {
            let button = KeyboardButton::new(label.clone());
            if spec.request_contact {
                vec![button.request(ButtonRequest::Contact)]
            } else {
                vec![button]
            }
        })
        .collect();

    let mut markup = KeyboardMarkup::new(rows);
    if spec.resize_to_fit {
        markup = markup.resize_keyboard();
    }
    if spec.one_time_use {
        markup = markup.one_time_keyboard();
    }
    markup
}

/// Localized markup of one of the bot's keyboards.
pub fn keyboard_markup(keyboard: Keyboard, lang: &LanguageIdentifier) -> KeyboardMarkup {
    render_keyboard(&keyboard.spec(lang))
}
