//! Keyboard shortcuts for picking a category by its rank in the list.
//!
//! Ranks 0-9 use the digit keys; the next 26 follow the QWERTY letter rows.

const LETTER_SHORTCUTS: [char; 26] = [
    'q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', 'a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l',
    'z', 'x', 'c', 'v', 'b', 'n', 'm',
];

const DIGIT_SHORTCUTS: usize = 10;

/// Number of categories that can have a shortcut.
pub const MAX_SHORTCUTS: usize = DIGIT_SHORTCUTS + LETTER_SHORTCUTS.len();

pub fn category_shortcut_label(index: usize) -> Option<String> {
    shortcut_char(index).map(String::from)
}

pub fn shortcut_char(index: usize) -> Option<char> {
    if index < DIGIT_SHORTCUTS {
        return char::from_digit(index as u32, 10);
    }
    LETTER_SHORTCUTS.get(index - DIGIT_SHORTCUTS).copied()
}

/// Category rank for a typed key. Only single characters map; letters are
/// case-insensitive.
pub fn category_index_from_key(key: &str) -> Option<usize> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    category_index_from_char(c)
}

pub fn category_index_from_char(c: char) -> Option<usize> {
    if let Some(digit) = c.to_digit(10) {
        return Some(digit as usize);
    }
    let lower = c.to_ascii_lowercase();
    LETTER_SHORTCUTS
        .iter()
        .position(|&letter| letter == lower)
        .map(|pos| DIGIT_SHORTCUTS + pos)
}
