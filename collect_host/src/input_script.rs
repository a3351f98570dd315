//! # Input Script Parser
//!
//! Provides a simple scripted input format for headless sessions and tests.
//!
//! ## Format
//!
//! Scripts are line-based, with each line producing one or more keys:
//! - Key names: `Enter`, `Escape`, `Backspace`, `Tab`, `Space`
//! - Arrow keys: `Up`, `Down`, `Left`, `Right`
//! - Single characters: `i`, `:`, `Q`
//! - Modifiers: `Ctrl+s`, `Shift+a`
//! - Text strings: `"Hello World"` (expanded to individual key presses)
//! - Comments: `# This is a comment`
//!
//! ## Example
//!
//! ```text
//! # Type a line and leave
//! i
//! "Hello collect"
//! Escape
//! ":q"
//! Enter
//! ```

use std::collections::VecDeque;

use editor_core::Key;
use thiserror::Error;

use crate::runtime::{HostRuntimeError, InputEvent, KeySource};

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

#[derive(Debug, Clone, Copy, Default)]
struct Modifiers {
    ctrl: bool,
    shift: bool,
}

/// Input script
///
/// Parses scripted keys and hands them out in order.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    keys: VecDeque<Key>,
}

impl InputScript {
    /// Creates a new empty input script
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut keys = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            keys.extend(Self::parse_line(line, line_num + 1)?);
        }

        if keys.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { keys })
    }

    fn parse_line(line: &str, line_num: usize) -> Result<Vec<Key>, InputScriptError> {
        // Quoted strings
        if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
            let text = &line[1..line.len() - 1];
            return Ok(text.chars().map(Self::char_to_key).collect());
        }

        // Single key or key with modifiers
        let (modifiers, key_name) = Self::parse_modifiers(line)?;
        let key = Self::parse_key(key_name, modifiers).map_err(|e| InputScriptError::ParseError {
            line: line_num,
            message: e.to_string(),
        })?;

        Ok(vec![key])
    }

    /// Parses modifiers from a key string (e.g., "Ctrl+s" → (ctrl, "s"))
    fn parse_modifiers(input: &str) -> Result<(Modifiers, &str), InputScriptError> {
        let mut modifiers = Modifiers::default();

        // A lone "+" is the plus key, not a chord
        let Some((prefix, key_name)) = input.rsplit_once('+').filter(|(p, _)| !p.is_empty())
        else {
            return Ok((modifiers, input));
        };

        for modifier_str in prefix.split('+') {
            match modifier_str.trim().to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                other => return Err(InputScriptError::InvalidModifier(other.to_string())),
            }
        }

        Ok((modifiers, key_name.trim()))
    }

    fn parse_key(name: &str, modifiers: Modifiers) -> Result<Key, InputScriptError> {
        let key = match name.to_lowercase().as_str() {
            // Special keys
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "backspace" | "back" => Key::Backspace,
            "tab" => Key::Tab,
            "space" => Key::Char(' '),

            // Arrow keys
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,

            // Single character
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Self::char_to_key(ch),
                    _ => return Err(InputScriptError::InvalidKeyName(name.to_string())),
                }
            }
        };

        match (key, modifiers) {
            (Key::Char(ch), Modifiers { ctrl: true, .. }) => Ok(Key::ctrl(ch)),
            (_, Modifiers { ctrl: true, .. }) => {
                Err(InputScriptError::InvalidKeyName(format!("Ctrl+{}", name)))
            }
            (Key::Char(ch), Modifiers { shift: true, .. }) => {
                Ok(Key::Char(ch.to_ascii_uppercase()))
            }
            (key, _) => Ok(key),
        }
    }

    fn char_to_key(ch: char) -> Key {
        u8::try_from(ch)
            .ok()
            .and_then(Key::from_ascii)
            .unwrap_or(Key::Char(ch))
    }

    /// Returns the next key, if any
    pub fn next_input(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }

    /// Returns true if the script has more inputs
    pub fn has_more(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Returns the number of remaining inputs
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for InputScript {
    fn next_event(&mut self) -> Result<Option<InputEvent>, HostRuntimeError> {
        Ok(self.next_input().map(InputEvent::Key))
    }
}
