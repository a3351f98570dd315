//! EditorCore state machine
//!
//! Owns the mode, the document buffer and the command buffer. Keys are
//! resolved through [`keymap::lookup`] and the resulting action is applied
//! here; nothing is held in global state.

use tracing::{debug, info, warn};

use crate::{
    buffer::{Position, TextBuffer},
    command::{Command, CommandBuffer},
    error::EditorResult,
    history::UndoRedoStack,
    key::Key,
    keymap::{self, Action},
    mode::Mode,
    snapshot::EditorSnapshot,
};

/// Outcome from applying a key to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Key ignored, nothing changed
    Continue,
    /// Buffer, cursor or mode changed
    Changed,
    /// Leave the editor
    Quit,
    /// Something happened that the operator should read
    StatusMessage(String),
}

/// Editor core state machine
#[derive(Debug, Clone, Default)]
pub struct EditorCore {
    mode: Mode,
    document: TextBuffer,
    command: CommandBuffer,
    status_message: String,
}

impl EditorCore {
    /// Create an editor over an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor over an existing document
    pub fn with_document(document: TextBuffer) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Open `path` as the document
    pub fn open(path: impl AsRef<std::path::Path>) -> EditorResult<Self> {
        Ok(Self::with_document(TextBuffer::from_file(path)?))
    }

    /// Replace the document's history (e.g. to bound it)
    pub fn with_history(mut self, history: UndoRedoStack) -> Self {
        self.document = self.document.with_history(history);
        self
    }

    /// Apply a key event and return the outcome
    pub fn apply_key(&mut self, key: Key) -> CoreOutcome {
        let Some(action) = keymap::lookup(self.mode, key) else {
            return CoreOutcome::Continue;
        };
        debug!(mode = self.mode.as_str(), %key, ?action, "dispatch");
        self.perform(action, key)
    }

    /// Get a complete snapshot of editor state
    pub fn snapshot(&self) -> EditorSnapshot {
        let history = self.document.history();
        EditorSnapshot {
            mode: self.mode,
            cursor: self.document.cursor(),
            buffer_lines: self.document.lines().to_vec(),
            dirty: self.document.is_dirty(),
            path: self
                .document
                .path()
                .map(|p| p.display().to_string()),
            command_line: self.command.text().to_string(),
            command_cursor: self.command.cursor_col(),
            status_message: self.status_message.clone(),
            undo_depth: history.undo_depth(),
            redo_depth: history.redo_depth(),
        }
    }

    // Public accessors for rendering/testing
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn document(&self) -> &TextBuffer {
        &self.document
    }

    pub fn cursor(&self) -> Position {
        self.document.cursor()
    }

    pub fn command_line(&self) -> &str {
        self.command.text()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn perform(&mut self, action: Action, key: Key) -> CoreOutcome {
        match action {
            Action::Move(direction) => {
                if self.document.move_pos(direction) {
                    CoreOutcome::Changed
                } else {
                    CoreOutcome::Continue
                }
            }
            Action::Insert => match key.as_char() {
                Some(ch) => {
                    self.document.insert_chr(ch);
                    CoreOutcome::Changed
                }
                None => CoreOutcome::Continue,
            },
            Action::Backspace => {
                if self.document.back_space() {
                    CoreOutcome::Changed
                } else {
                    CoreOutcome::Continue
                }
            }
            Action::LineFeed => {
                self.document.line_feed();
                CoreOutcome::Changed
            }
            Action::Undo => {
                if self.document.undo() {
                    self.status("Undo")
                } else {
                    self.status("Already at oldest change")
                }
            }
            Action::Redo => {
                if self.document.redo() {
                    self.status("Redo")
                } else {
                    self.status("Already at newest change")
                }
            }
            Action::Save => self.save(),
            Action::Quit => {
                info!("quit requested");
                CoreOutcome::Quit
            }
            Action::SwitchMode(mode) => {
                self.set_mode(mode);
                CoreOutcome::Changed
            }
            Action::CommandInsert => match key.as_char() {
                Some(ch) => {
                    self.command.push(ch);
                    CoreOutcome::Changed
                }
                None => CoreOutcome::Continue,
            },
            Action::CommandBackspace => {
                self.command.backspace();
                CoreOutcome::Changed
            }
            Action::CommandCommit => self.execute_command(),
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            info!(from = self.mode.as_str(), to = mode.as_str(), "mode change");
        }
        if mode == Mode::Edit || mode == Mode::Cmd {
            self.status_message.clear();
        }
        // The command line only lives for one visit to Cmd mode.
        self.command.clear();
        self.mode = mode;
    }

    fn status(&mut self, message: impl Into<String>) -> CoreOutcome {
        self.status_message = message.into();
        CoreOutcome::StatusMessage(self.status_message.clone())
    }

    fn save(&mut self) -> CoreOutcome {
        match self.document.write_buf_to_file() {
            Ok(bytes) => {
                let name = self
                    .document
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                let lines = self.document.line_count();
                self.status(format!("\"{}\" {}L, {}B written", name, lines, bytes))
            }
            Err(err) => {
                warn!(error = %err, "save failed");
                self.status(format!("Save failed: {}", err))
            }
        }
    }

    fn execute_command(&mut self) -> CoreOutcome {
        let outcome = match self.command.commit() {
            Ok(Command::Quit) => {
                info!("quit command");
                return CoreOutcome::Quit;
            }
            Err(err) => {
                debug!(error = %err, "command rejected");
                self.status(err.to_string())
            }
        };
        self.set_mode(Mode::Move);
        outcome
    }
}
