//! Undo/redo history
//!
//! One record per buffer primitive. Records describe the edit itself, not a
//! copy of the buffer, so the buffer can apply them in either direction.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::buffer::Position;

/// Kind of atomic edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditKind {
    /// A character was inserted at `position`
    InsertChar,
    /// The character at `position` was removed
    DeleteChar,
    /// The row was split at `position`
    SplitLine,
    /// The row below was appended to `position.row` at `position.col`
    JoinLine,
}

/// Data needed to re-apply or reverse an edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    Char(char),
    Fragment(String),
}

/// A reversible description of one edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoRecord {
    pub kind: EditKind,
    pub position: Position,
    pub payload: Payload,
}

impl UndoRecord {
    pub fn insert_char(position: Position, ch: char) -> Self {
        Self {
            kind: EditKind::InsertChar,
            position,
            payload: Payload::Char(ch),
        }
    }

    pub fn delete_char(position: Position, ch: char) -> Self {
        Self {
            kind: EditKind::DeleteChar,
            position,
            payload: Payload::Char(ch),
        }
    }

    /// `tail` is the text moved onto the new row
    pub fn split_line(position: Position, tail: String) -> Self {
        Self {
            kind: EditKind::SplitLine,
            position,
            payload: Payload::Fragment(tail),
        }
    }

    /// `fragment` is the row that was appended to the previous one
    pub fn join_line(position: Position, fragment: String) -> Self {
        Self {
            kind: EditKind::JoinLine,
            position,
            payload: Payload::Fragment(fragment),
        }
    }

    /// Character carried by an InsertChar/DeleteChar record
    pub fn ch(&self) -> Option<char> {
        match self.payload {
            Payload::Char(ch) => Some(ch),
            Payload::Fragment(_) => None,
        }
    }
}

/// Linear undo/redo stacks
///
/// Recording a new edit discards the redo stack. When a limit is set the
/// oldest undo record is dropped once the limit is exceeded.
#[derive(Debug, Clone, Default)]
pub struct UndoRedoStack {
    undo: VecDeque<UndoRecord>,
    redo: Vec<UndoRecord>,
    limit: Option<usize>,
}

impl UndoRedoStack {
    /// Unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` undo records
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn record(&mut self, entry: UndoRecord) {
        self.undo.push_back(entry);
        self.redo.clear();

        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
            }
        }
    }

    /// Move the newest undo record onto the redo stack and return it
    pub fn pop_undo(&mut self) -> Option<UndoRecord> {
        let entry = self.undo.pop_back()?;
        self.redo.push(entry.clone());
        Some(entry)
    }

    /// Move the newest redo record back onto the undo stack and return it
    pub fn pop_redo(&mut self) -> Option<UndoRecord> {
        let entry = self.redo.pop()?;
        self.undo.push_back(entry.clone());
        Some(entry)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
