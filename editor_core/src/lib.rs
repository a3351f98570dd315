//! # Editor Core
//!
//! Modal text editing logic shared by every collect host.
//!
//! ## Philosophy
//!
//! - **Deterministic**: Same key trace => same editor state
//! - **Modal editing**: Move, Edit, Visual and Cmd modes
//! - **Table-driven**: Mode transitions live in one keymap, not in scattered branches
//! - **Mechanism over policy**: Core provides editing primitives, hosts decide rendering
//! - **No global state**: Every piece of editor state is owned by [`EditorCore`]
//!
//! ## Design
//!
//! The core provides:
//! - EditorCore: State machine for modal editing
//! - TextBuffer: Line-oriented document with cursor, dirty flag and history
//! - UndoRedoStack: Per-edit undo/redo records
//! - CoreOutcome: Structured results from key handling
//! - EditorSnapshot: Owned state for renderers and parity testing
//! - Key event abstraction: Platform-independent input representation

pub mod buffer;
pub mod command;
pub mod core;
pub mod error;
pub mod history;
pub mod key;
pub mod keymap;
pub mod mode;
pub mod snapshot;

pub use buffer::{Direction, LineEnding, Position, TextBuffer};
pub use command::{parse_command, Command, CommandBuffer};
pub use core::{CoreOutcome, EditorCore};
pub use error::{EditorError, EditorResult};
pub use history::{EditKind, UndoRecord, UndoRedoStack};
pub use key::Key;
pub use keymap::Action;
pub use mode::Mode;
pub use snapshot::EditorSnapshot;
