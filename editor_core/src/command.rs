//! Command line buffer and command parsing

use crate::buffer::TextBuffer;
use crate::error::{EditorError, EditorResult};

/// Leading character accepted (and ignored) in front of a command
pub const COMMAND_PREFIX: char = ':';

/// Parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave the editor
    Quit,
}

/// Parse a command line
///
/// One leading `:` is stripped if present and the rest must match exactly;
/// padding, blank lines and unknown names are `UnrecognizedCommand`.
pub fn parse_command(line: &str) -> EditorResult<Command> {
    let body = line.strip_prefix(COMMAND_PREFIX).unwrap_or(line);

    match body {
        "q" | "quit" => Ok(Command::Quit),
        _ => Err(EditorError::UnrecognizedCommand(line.to_string())),
    }
}

/// Single-line buffer staging a command before it is committed
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    line: TextBuffer,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current command text
    pub fn text(&self) -> &str {
        self.line.line(0).unwrap_or_default()
    }

    /// Cursor column within the command text
    pub fn cursor_col(&self) -> usize {
        self.line.cursor().col
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    pub fn push(&mut self, ch: char) {
        // The command line never grows a second row.
        if ch != '\n' {
            self.line.insert_chr(ch);
        }
    }

    pub fn backspace(&mut self) -> bool {
        self.line.back_space()
    }

    pub fn clear(&mut self) {
        self.line.clear();
    }

    /// Take the staged text, parse it, and leave the buffer empty
    pub fn commit(&mut self) -> EditorResult<Command> {
        let text = self.text().to_string();
        self.clear();
        parse_command(&text)
    }
}
