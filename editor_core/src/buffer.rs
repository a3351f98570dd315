//! Text buffer, cursor and position types

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EditorError, EditorResult};
use crate::history::{EditKind, UndoRecord, UndoRedoStack};

/// Cursor position in the buffer
///
/// `col` counts characters, and may equal the row length (end-of-line
/// insertion point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Cursor movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Row separator used when the buffer is written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// CRLF only when every line break in `content` is `\r\n`
    pub fn detect(content: &str) -> Self {
        let breaks = content.matches('\n').count();
        if breaks > 0 && content.matches("\r\n").count() == breaks {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Byte offset of character column `col` in `line`
fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Line-based text buffer with a single cursor and its own edit history
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Position,
    path: Option<PathBuf>,
    dirty: bool,
    line_ending: LineEnding,
    history: UndoRedoStack,
}

impl TextBuffer {
    /// Empty buffer: one empty row, cursor at (0, 0)
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::zero(),
            path: None,
            dirty: false,
            line_ending: LineEnding::Lf,
            history: UndoRedoStack::new(),
        }
    }

    /// Split `content` into rows without attaching a backing file
    ///
    /// A trailing line break produces a final empty row so that joining the
    /// rows reproduces `content` exactly.
    pub fn from_string(content: &str) -> Self {
        let line_ending = LineEnding::detect(content);
        let lines = content
            .split(line_ending.as_str())
            .map(String::from)
            .collect();

        Self {
            lines,
            line_ending,
            ..Self::new()
        }
    }

    /// Load a buffer from `path`
    pub fn from_file(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| EditorError::io(path, err))?;

        let mut buffer = Self::from_string(&content);
        buffer.path = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            lines = buffer.line_count(),
            line_ending = ?buffer.line_ending,
            "buffer loaded"
        );
        Ok(buffer)
    }

    /// Replace the history, e.g. to apply an undo limit
    pub fn with_history(mut self, history: UndoRedoStack) -> Self {
        self.history = history;
        self
    }

    pub fn as_string(&self) -> String {
        self.lines.join(self.line_ending.as_str())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Row content, or `OutOfRange` for an invalid row
    pub fn get_line(&self, index: usize) -> EditorResult<&str> {
        self.line(index).ok_or(EditorError::OutOfRange {
            index,
            len: self.lines.len(),
        })
    }

    /// Row length in characters (0 for an invalid row)
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|s| char_len(s)).unwrap_or(0)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn history(&self) -> &UndoRedoStack {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Reset to a single empty, clean row and forget history
    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor = Position::zero();
        self.dirty = false;
        self.history.clear();
    }

    // Cursor movement

    /// Move the cursor one step, clamped to the buffer
    ///
    /// Returns false when the cursor is already at the boundary.
    pub fn move_pos(&mut self, direction: Direction) -> bool {
        let before = self.cursor;
        match direction {
            Direction::Up => {
                if self.cursor.row > 0 {
                    self.cursor.row -= 1;
                    self.clamp_col();
                }
            }
            Direction::Down => {
                if self.cursor.row + 1 < self.lines.len() {
                    self.cursor.row += 1;
                    self.clamp_col();
                }
            }
            Direction::Left => {
                if self.cursor.col > 0 {
                    self.cursor.col -= 1;
                }
            }
            Direction::Right => {
                if self.cursor.col < self.line_len(self.cursor.row) {
                    self.cursor.col += 1;
                }
            }
        }
        self.cursor != before
    }

    fn clamp_col(&mut self) {
        let len = self.line_len(self.cursor.row);
        if self.cursor.col > len {
            self.cursor.col = len;
        }
    }

    // Editing primitives

    /// Insert `ch` at the cursor and advance one column
    pub fn insert_chr(&mut self, ch: char) {
        if ch == '\n' {
            self.line_feed();
            return;
        }

        let pos = self.cursor;
        self.raw_insert(pos, ch);
        self.cursor.col += 1;
        self.history.record(UndoRecord::insert_char(pos, ch));
        self.dirty = true;
        debug!(row = pos.row, col = pos.col, ?ch, "insert");
    }

    /// Delete backwards, joining with the previous row at column 0
    ///
    /// Returns false at (0, 0) where there is nothing to delete.
    pub fn back_space(&mut self) -> bool {
        let pos = self.cursor;
        if pos.col > 0 {
            let at = Position::new(pos.row, pos.col - 1);
            let Some(ch) = self.raw_remove(at) else {
                return false;
            };
            self.cursor = at;
            self.history.record(UndoRecord::delete_char(at, ch));
            debug!(row = at.row, col = at.col, ?ch, "delete");
        } else if pos.row > 0 {
            let (join_col, fragment) = self.raw_join(pos.row - 1);
            let at = Position::new(pos.row - 1, join_col);
            self.cursor = at;
            self.history.record(UndoRecord::join_line(at, fragment));
            debug!(row = at.row, col = at.col, "join");
        } else {
            return false;
        }
        self.dirty = true;
        true
    }

    /// Split the current row at the cursor and move to the start of the new row
    pub fn line_feed(&mut self) {
        let pos = self.cursor;
        let tail = self.raw_split(pos);
        self.cursor = Position::new(pos.row + 1, 0);
        self.history.record(UndoRecord::split_line(pos, tail));
        self.dirty = true;
        debug!(row = pos.row, col = pos.col, "split");
    }

    /// Reverse the newest edit; false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.pop_undo() else {
            return false;
        };
        let pos = record.position;

        match record.kind {
            EditKind::InsertChar => {
                self.raw_remove(pos);
                self.cursor = pos;
            }
            EditKind::DeleteChar => {
                if let Some(ch) = record.ch() {
                    self.raw_insert(pos, ch);
                }
                self.cursor = Position::new(pos.row, pos.col + 1);
            }
            EditKind::SplitLine => {
                self.raw_join(pos.row);
                self.cursor = pos;
            }
            EditKind::JoinLine => {
                self.raw_split(pos);
                self.cursor = Position::new(pos.row + 1, 0);
            }
        }
        self.dirty = true;
        debug!(kind = ?record.kind, row = pos.row, col = pos.col, "undo");
        true
    }

    /// Re-apply the newest undone edit; false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        let Some(record) = self.history.pop_redo() else {
            return false;
        };
        let pos = record.position;

        match record.kind {
            EditKind::InsertChar => {
                if let Some(ch) = record.ch() {
                    self.raw_insert(pos, ch);
                }
                self.cursor = Position::new(pos.row, pos.col + 1);
            }
            EditKind::DeleteChar => {
                self.raw_remove(pos);
                self.cursor = pos;
            }
            EditKind::SplitLine => {
                self.raw_split(pos);
                self.cursor = Position::new(pos.row + 1, 0);
            }
            EditKind::JoinLine => {
                self.raw_join(pos.row);
                self.cursor = pos;
            }
        }
        self.dirty = true;
        debug!(kind = ?record.kind, row = pos.row, col = pos.col, "redo");
        true
    }

    // Persistence

    /// Write rows to the backing file; returns bytes written
    pub fn write_buf_to_file(&mut self) -> EditorResult<usize> {
        let path = self.path.as_deref().ok_or(EditorError::NoPath)?;
        let content = self.as_string();
        fs::write(path, content.as_bytes()).map_err(|err| EditorError::io(path, err))?;
        info!(path = %path.display(), bytes = content.len(), "buffer written");

        self.dirty = false;
        Ok(content.len())
    }

    // Raw edits. These keep the row invariants but touch neither the cursor
    // nor the history.

    fn raw_insert(&mut self, pos: Position, ch: char) {
        if let Some(line) = self.lines.get_mut(pos.row) {
            let idx = byte_offset(line, pos.col);
            line.insert(idx, ch);
        }
    }

    fn raw_remove(&mut self, pos: Position) -> Option<char> {
        let line = self.lines.get_mut(pos.row)?;
        if pos.col >= char_len(line) {
            return None;
        }
        let idx = byte_offset(line, pos.col);
        Some(line.remove(idx))
    }

    /// Split `pos.row` at `pos.col`; returns the tail moved to the new row
    fn raw_split(&mut self, pos: Position) -> String {
        let Some(line) = self.lines.get_mut(pos.row) else {
            return String::new();
        };
        let idx = byte_offset(line, pos.col);
        let tail = line.split_off(idx);
        self.lines.insert(pos.row + 1, tail.clone());
        tail
    }

    /// Append row `row + 1` to `row`; returns the join column and the moved text
    fn raw_join(&mut self, row: usize) -> (usize, String) {
        if row + 1 >= self.lines.len() {
            return (self.line_len(row), String::new());
        }
        let next = self.lines.remove(row + 1);
        let line = &mut self.lines[row];
        let join_col = char_len(line);
        line.push_str(&next);
        (join_col, next)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TextBuffer {
    /// Content and cursor equality; history and file state are ignored
    fn eq(&self, other: &Self) -> bool {
        self.lines == other.lines && self.cursor == other.cursor
    }
}

impl Eq for TextBuffer {}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_end_of(content: &str) -> TextBuffer {
        let mut buffer = TextBuffer::from_string(content);
        while buffer.move_pos(Direction::Down) {}
        while buffer.move_pos(Direction::Right) {}
        buffer
    }

    #[test]
    fn test_position() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.row, 5);
        assert_eq!(pos.col, 10);
        assert_eq!(Position::zero(), Position::new(0, 0));
    }

    #[test]
    fn test_text_buffer_new() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
        assert_eq!(buffer.cursor(), Position::zero());
        assert!(!buffer.is_dirty());
        assert!(buffer.path().is_none());
    }

    #[test]
    fn test_text_buffer_from_string() {
        let buffer = TextBuffer::from_string("hello\nworld");
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.line(0), Some("hello"));
        assert_eq!(buffer.line(1), Some("world"));
        assert_eq!(buffer.line_ending(), LineEnding::Lf);
    }

    #[test]
    fn test_trailing_newline_is_kept() {
        let buffer = TextBuffer::from_string("a\nb\n");
        assert_eq!(buffer.lines(), ["a", "b", ""]);
        assert_eq!(buffer.as_string(), "a\nb\n");
    }

    #[test]
    fn test_empty_content_has_one_row() {
        let buffer = TextBuffer::from_string("");
        assert_eq!(buffer.line_count(), 1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_crlf_detected() {
        let buffer = TextBuffer::from_string("one\r\ntwo\r\n");
        assert_eq!(buffer.line_ending(), LineEnding::CrLf);
        assert_eq!(buffer.lines(), ["one", "two", ""]);
        assert_eq!(buffer.as_string(), "one\r\ntwo\r\n");
    }

    #[test]
    fn test_mixed_endings_keep_carriage_returns() {
        let content = "one\r\ntwo\nthree";
        let buffer = TextBuffer::from_string(content);
        assert_eq!(buffer.line_ending(), LineEnding::Lf);
        assert_eq!(buffer.line(0), Some("one\r"));
        assert_eq!(buffer.as_string(), content);
    }

    #[test]
    fn test_get_line_out_of_range() {
        let buffer = TextBuffer::from_string("only");
        assert_eq!(buffer.get_line(0).unwrap(), "only");
        assert!(matches!(
            buffer.get_line(1),
            Err(EditorError::OutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_insert_chr() {
        let mut buffer = TextBuffer::new();
        buffer.insert_chr('h');
        buffer.insert_chr('i');
        assert_eq!(buffer.line(0), Some("hi"));
        assert_eq!(buffer.cursor(), Position::new(0, 2));
        assert!(buffer.is_dirty());
        assert_eq!(buffer.history().undo_depth(), 2);
    }

    #[test]
    fn test_insert_multibyte() {
        let mut buffer = TextBuffer::from_string("añb");
        buffer.move_pos(Direction::Right);
        buffer.move_pos(Direction::Right);
        buffer.insert_chr('é');
        assert_eq!(buffer.line(0), Some("añéb"));
        assert_eq!(buffer.cursor(), Position::new(0, 3));
        assert_eq!(buffer.line_len(0), 4);
    }

    #[test]
    fn test_line_feed_splits_row() {
        let mut buffer = TextBuffer::from_string("hello");
        buffer.move_pos(Direction::Right);
        buffer.move_pos(Direction::Right);
        buffer.line_feed();
        assert_eq!(buffer.lines(), ["he", "llo"]);
        assert_eq!(buffer.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_backspace_deletes_previous_char() {
        let mut buffer = at_end_of("hello");
        assert!(buffer.back_space());
        assert_eq!(buffer.line(0), Some("hell"));
        assert_eq!(buffer.cursor(), Position::new(0, 4));
    }

    #[test]
    fn test_backspace_joins_rows() {
        let mut buffer = TextBuffer::from_string("hello\nworld");
        buffer.move_pos(Direction::Down);
        assert!(buffer.back_space());
        assert_eq!(buffer.lines(), ["helloworld"]);
        assert_eq!(buffer.cursor(), Position::new(0, 5));
    }

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut buffer = TextBuffer::from_string("abc");
        assert!(!buffer.back_space());
        assert_eq!(buffer.line(0), Some("abc"));
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.history().undo_depth(), 0);
    }

    #[test]
    fn test_backspace_three_then_noop() {
        let mut buffer = at_end_of("abc");
        assert_eq!(buffer.cursor(), Position::new(0, 3));
        for _ in 0..3 {
            assert!(buffer.back_space());
        }
        assert_eq!(buffer.line(0), Some(""));
        assert!(!buffer.back_space());
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn test_cursor_clamps_at_edges() {
        let mut buffer = TextBuffer::from_string("ab\nc");
        assert!(!buffer.move_pos(Direction::Left));
        assert!(!buffer.move_pos(Direction::Up));
        assert_eq!(buffer.cursor(), Position::zero());

        buffer.move_pos(Direction::Right);
        buffer.move_pos(Direction::Right);
        assert!(!buffer.move_pos(Direction::Right));
        assert_eq!(buffer.cursor(), Position::new(0, 2));

        assert!(buffer.move_pos(Direction::Down));
        assert_eq!(buffer.cursor(), Position::new(1, 1));
        assert!(!buffer.move_pos(Direction::Down));
    }

    #[test]
    fn test_vertical_move_keeps_column_when_possible() {
        let mut buffer = TextBuffer::from_string("abcd\nxy\nlonger");
        for _ in 0..3 {
            buffer.move_pos(Direction::Right);
        }
        buffer.move_pos(Direction::Down);
        assert_eq!(buffer.cursor(), Position::new(1, 2));
        buffer.move_pos(Direction::Down);
        assert_eq!(buffer.cursor(), Position::new(2, 2));
    }

    #[test]
    fn test_undo_redo_insert() {
        let mut buffer = TextBuffer::new();
        buffer.insert_chr('x');
        assert!(buffer.undo());
        assert_eq!(buffer.line(0), Some(""));
        assert_eq!(buffer.cursor(), Position::zero());
        assert!(buffer.redo());
        assert_eq!(buffer.line(0), Some("x"));
        assert_eq!(buffer.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_undo_join_restores_rows() {
        let mut buffer = TextBuffer::from_string("ab\ncd");
        buffer.move_pos(Direction::Down);
        buffer.back_space();
        assert!(buffer.undo());
        assert_eq!(buffer.lines(), ["ab", "cd"]);
        assert_eq!(buffer.cursor(), Position::new(1, 0));
        assert!(buffer.redo());
        assert_eq!(buffer.lines(), ["abcd"]);
        assert_eq!(buffer.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_undo_delete_restores_char() {
        let mut buffer = at_end_of("xyz");
        buffer.back_space();
        assert!(buffer.undo());
        assert_eq!(buffer.line(0), Some("xyz"));
        assert_eq!(buffer.cursor(), Position::new(0, 3));
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut buffer = TextBuffer::from_string("keep");
        assert!(!buffer.undo());
        assert!(!buffer.redo());
        assert_eq!(buffer.line(0), Some("keep"));
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_new_edit_invalidates_redo() {
        let mut buffer = TextBuffer::new();
        buffer.insert_chr('a');
        buffer.undo();
        buffer.insert_chr('b');
        assert!(!buffer.redo());
        assert_eq!(buffer.line(0), Some("b"));
    }

    #[test]
    fn test_write_without_path() {
        let mut buffer = TextBuffer::new();
        buffer.insert_chr('a');
        assert!(matches!(buffer.write_buf_to_file(), Err(EditorError::NoPath)));
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_clear_resets_rows_and_history() {
        let mut buffer = TextBuffer::new();
        buffer.insert_chr('q');
        buffer.line_feed();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), Position::zero());
        assert!(!buffer.history().can_undo());
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_history_limit_applies() {
        let mut buffer = TextBuffer::new().with_history(UndoRedoStack::with_limit(2));
        for ch in "abc".chars() {
            buffer.insert_chr(ch);
        }
        assert!(buffer.undo());
        assert!(buffer.undo());
        assert!(!buffer.undo());
        assert_eq!(buffer.line(0), Some("a"));
    }

    #[test]
    fn test_write_clears_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "a").unwrap();

        let mut buffer = TextBuffer::from_file(&path).unwrap();
        while buffer.move_pos(Direction::Right) {}
        buffer.line_feed();
        buffer.insert_chr('b');
        assert!(buffer.is_dirty());

        assert_eq!(buffer.write_buf_to_file().unwrap(), 3);
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.path(), Some(path.as_path()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb");
    }
}
