//! Platform-independent key representation

use core::fmt;

use serde::{Deserialize, Serialize};

/// A decoded key press
///
/// Hosts translate their native events into this type before handing them to
/// the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Character key (already shifted)
    Char(char),
    /// Control chord, stored lowercase (`Ctrl('s')`)
    Ctrl(char),

    // Navigation
    Up,
    Down,
    Left,
    Right,

    // Special keys
    Enter,
    Backspace,
    Escape,
    Tab,
}

impl Key {
    /// Build a control chord, normalising the letter to lowercase
    pub fn ctrl(ch: char) -> Self {
        Key::Ctrl(ch.to_ascii_lowercase())
    }

    /// Character this key inserts as text, if any
    pub fn as_char(&self) -> Option<char> {
        match *self {
            Key::Char(ch) if !ch.is_control() => Some(ch),
            Key::Tab => Some('\t'),
            _ => None,
        }
    }

    pub fn is_printable(&self) -> bool {
        self.as_char().is_some()
    }

    /// Convert a raw terminal byte (as produced by a cooked TTY)
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            0x1B => Some(Key::Escape),
            0x08 | 0x7F => Some(Key::Backspace),
            b'\r' | b'\n' => Some(Key::Enter),
            b'\t' => Some(Key::Tab),
            0x01..=0x1A => Some(Key::Ctrl((b'a' + byte - 1) as char)),
            0x20..=0x7E => Some(Key::Char(byte as char)),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(ch) => write!(f, "{}", ch),
            Key::Ctrl(ch) => write!(f, "Ctrl+{}", ch),
            other => write!(f, "{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii() {
        assert_eq!(Key::from_ascii(b'h'), Some(Key::Char('h')));
        assert_eq!(Key::from_ascii(b':'), Some(Key::Char(':')));
        assert_eq!(Key::from_ascii(b'Z'), Some(Key::Char('Z')));
        assert_eq!(Key::from_ascii(0x1B), Some(Key::Escape));
        assert_eq!(Key::from_ascii(0x7F), Some(Key::Backspace));
        assert_eq!(Key::from_ascii(0x08), Some(Key::Backspace));
        assert_eq!(Key::from_ascii(b'\r'), Some(Key::Enter));
        assert_eq!(Key::from_ascii(0x13), Some(Key::Ctrl('s')));
        assert_eq!(Key::from_ascii(0x80), None);
    }

    #[test]
    fn test_printable() {
        assert_eq!(Key::Char('a').as_char(), Some('a'));
        assert_eq!(Key::Tab.as_char(), Some('\t'));
        assert_eq!(Key::Char('\u{7}').as_char(), None);
        assert!(!Key::Enter.is_printable());
        assert!(!Key::ctrl('S').is_printable());
    }

    #[test]
    fn test_ctrl_normalises_case() {
        assert_eq!(Key::ctrl('S'), Key::Ctrl('s'));
    }

    #[test]
    fn test_display() {
        assert_eq!(Key::Char('q').to_string(), "q");
        assert_eq!(Key::Ctrl('c').to_string(), "Ctrl+c");
        assert_eq!(Key::Escape.to_string(), "Escape");
    }
}
