//! Phone number normalization used for matching sheet rows

/// Characters dropped before two phone numbers are compared.
const SEPARATORS: [char; 3] = ['+', ' ', '-'];

/// Normalizes a phone number for comparison.
///
/// Removes every `+`, space and `-`. Nothing else is touched: digits, other
/// punctuation such as parentheses, and leading zeros are kept as they are.
///
/// # Examples
/// ```
/// use scorecore::phone::normalize;
///
/// assert_eq!(normalize("+7 999-111-22-33"), "79991112233");
/// assert_eq!(normalize("8(999)111"), "8(999)111");
/// ```
pub fn normalize(phone: &str) -> String {
    phone.chars().filter(|c| !SEPARATORS.contains(c)).collect()
}

/// Masks a phone number for logs, keeping only the last four characters.
pub fn mask(phone: &str) -> String {
    let normalized = normalize(phone);
    let visible = normalized.chars().count().saturating_sub(4);
    normalized
        .chars()
        .enumerate()
        .map(|(i, c)| if i < visible { '*' } else { c })
        .collect()
}
