//! Editor snapshot handed to renderers and used for deterministic testing

use serde::{Deserialize, Serialize};

use crate::{Mode, Position};

/// Complete, owned view of editor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub mode: Mode,
    pub cursor: Position,
    pub buffer_lines: Vec<String>,
    pub dirty: bool,
    pub path: Option<String>,
    pub command_line: String,
    pub command_cursor: usize,
    pub status_message: String,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

impl EditorSnapshot {
    /// Compute a deterministic hash of the snapshot state
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update(self.mode.as_str().as_bytes());
        hasher.update(self.cursor.row.to_le_bytes());
        hasher.update(self.cursor.col.to_le_bytes());

        for line in &self.buffer_lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }

        hasher.update([self.dirty as u8]);
        hasher.update(self.command_line.as_bytes());
        hasher.update(self.undo_depth.to_le_bytes());
        hasher.update(self.redo_depth.to_le_bytes());

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }
}
