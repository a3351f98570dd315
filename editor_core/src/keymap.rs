//! Mode × key transition table
//!
//! The state machine is data: each [`Binding`] maps a key pattern in one mode
//! to an [`Action`]. [`lookup`] resolves exact keys before the printable
//! fallback, so `i` in Move mode switches modes while `i` in Edit mode inserts.

use crate::buffer::Direction;
use crate::key::Key;
use crate::mode::Mode;

/// Which keys a binding applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    /// One specific key
    Exact(Key),
    /// Any key that produces a printable character
    Printable,
}

impl KeyPattern {
    pub fn matches(&self, key: Key) -> bool {
        match self {
            KeyPattern::Exact(expected) => *expected == key,
            KeyPattern::Printable => key.is_printable(),
        }
    }
}

/// Operation issued by a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the document cursor
    Move(Direction),
    /// Insert the key's character into the document
    Insert,
    Backspace,
    LineFeed,
    Undo,
    Redo,
    /// Write the document to its backing file
    Save,
    /// Leave the editor immediately
    Quit,
    SwitchMode(Mode),
    /// Append the key's character to the command line
    CommandInsert,
    CommandBackspace,
    /// Interpret the command line
    CommandCommit,
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub mode: Mode,
    pub key: KeyPattern,
    pub action: Action,
}

const fn bind(mode: Mode, key: Key, action: Action) -> Binding {
    Binding {
        mode,
        key: KeyPattern::Exact(key),
        action,
    }
}

const fn printable(mode: Mode, action: Action) -> Binding {
    Binding {
        mode,
        key: KeyPattern::Printable,
        action,
    }
}

use Action::*;
use Direction::{Down, Left, Right, Up};

pub const BINDINGS: &[Binding] = &[
    // Move
    bind(Mode::Move, Key::Escape, SwitchMode(Mode::Move)),
    bind(Mode::Move, Key::Up, Move(Up)),
    bind(Mode::Move, Key::Down, Move(Down)),
    bind(Mode::Move, Key::Left, Move(Left)),
    bind(Mode::Move, Key::Right, Move(Right)),
    bind(Mode::Move, Key::Char('k'), Move(Up)),
    bind(Mode::Move, Key::Char('j'), Move(Down)),
    bind(Mode::Move, Key::Char('h'), Move(Left)),
    bind(Mode::Move, Key::Char('l'), Move(Right)),
    bind(Mode::Move, Key::Char('i'), SwitchMode(Mode::Edit)),
    bind(Mode::Move, Key::Char('v'), SwitchMode(Mode::Visual)),
    bind(Mode::Move, Key::Char(':'), SwitchMode(Mode::Cmd)),
    bind(Mode::Move, Key::Char('u'), Undo),
    bind(Mode::Move, Key::Char('r'), Redo),
    bind(Mode::Move, Key::Ctrl('s'), Save),
    bind(Mode::Move, Key::Ctrl('c'), Quit),
    // Edit
    bind(Mode::Edit, Key::Escape, SwitchMode(Mode::Move)),
    bind(Mode::Edit, Key::Enter, LineFeed),
    bind(Mode::Edit, Key::Backspace, Backspace),
    bind(Mode::Edit, Key::Ctrl('h'), Backspace),
    bind(Mode::Edit, Key::Ctrl('z'), Undo),
    bind(Mode::Edit, Key::Ctrl('r'), Redo),
    bind(Mode::Edit, Key::Up, Move(Up)),
    bind(Mode::Edit, Key::Down, Move(Down)),
    bind(Mode::Edit, Key::Left, Move(Left)),
    bind(Mode::Edit, Key::Right, Move(Right)),
    printable(Mode::Edit, Insert),
    // Visual
    bind(Mode::Visual, Key::Escape, SwitchMode(Mode::Move)),
    // Cmd
    bind(Mode::Cmd, Key::Escape, SwitchMode(Mode::Move)),
    bind(Mode::Cmd, Key::Enter, CommandCommit),
    bind(Mode::Cmd, Key::Backspace, CommandBackspace),
    bind(Mode::Cmd, Key::Ctrl('h'), CommandBackspace),
    printable(Mode::Cmd, CommandInsert),
];

/// Resolve `key` in `mode`; `None` means the key is ignored
pub fn lookup(mode: Mode, key: Key) -> Option<Action> {
    let in_mode = || BINDINGS.iter().filter(move |b| b.mode == mode);

    in_mode()
        .find(|b| b.key == KeyPattern::Exact(key))
        .or_else(|| in_mode().find(|b| b.key.matches(key)))
        .map(|b| b.action)
}

/// All bindings for one mode, in table order
pub fn bindings_for(mode: Mode) -> impl Iterator<Item = &'static Binding> {
    BINDINGS.iter().filter(move |b| b.mode == mode)
}
