//! Editor modes

use serde::{Deserialize, Serialize};

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Cursor movement, undo/redo and save
    #[default]
    Move,
    /// Text entry
    Edit,
    /// Selection placeholder; only Escape is handled
    Visual,
    /// Command line entry
    Cmd,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Move => "MOVE",
            Mode::Edit => "EDIT",
            Mode::Visual => "VISUAL",
            Mode::Cmd => "CMD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_strings() {
        assert_eq!(Mode::Move.as_str(), "MOVE");
        assert_eq!(Mode::Edit.as_str(), "EDIT");
        assert_eq!(Mode::Visual.as_str(), "VISUAL");
        assert_eq!(Mode::Cmd.as_str(), "CMD");
    }

    #[test]
    fn test_default_mode_is_move() {
        assert_eq!(Mode::default(), Mode::Move);
    }
}
