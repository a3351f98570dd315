//! Editor rendering and output

use editor_core::{EditorSnapshot, Mode};

use crate::runtime::{HostRuntimeError, Surface};

/// Editor view for rendering
///
/// Lays a snapshot out as viewport rows plus one status line. The viewport
/// scrolls just far enough to keep the cursor row visible.
#[derive(Debug, Clone, Copy)]
pub struct EditorView {
    /// Number of lines to show in viewport
    viewport_lines: usize,
}

impl EditorView {
    pub fn new(viewport_lines: usize) -> Self {
        Self {
            viewport_lines: viewport_lines.max(1),
        }
    }

    pub fn viewport_lines(&self) -> usize {
        self.viewport_lines
    }

    /// First buffer row shown in the viewport
    pub fn scroll_offset(&self, snapshot: &EditorSnapshot) -> usize {
        snapshot
            .cursor
            .row
            .saturating_sub(self.viewport_lines - 1)
    }

    /// Viewport rows with tabs flattened; rows past the buffer are `~`
    pub fn visible_rows(&self, snapshot: &EditorSnapshot) -> Vec<String> {
        let offset = self.scroll_offset(snapshot);
        (offset..offset + self.viewport_lines)
            .map(|row| match snapshot.buffer_lines.get(row) {
                Some(line) => line.replace('\t', " "),
                None => "~".to_string(),
            })
            .collect()
    }

    /// Render the snapshot to a string, marking the cursor with brackets
    pub fn render(&self, snapshot: &EditorSnapshot) -> String {
        let mut output = String::new();
        let offset = self.scroll_offset(snapshot);
        let cursor = snapshot.cursor;

        for (i, line) in self.visible_rows(snapshot).iter().enumerate() {
            if offset + i == cursor.row && snapshot.mode != Mode::Cmd {
                output.push_str(&render_line_with_cursor(line, cursor.col));
            } else {
                output.push_str(line);
            }
            output.push('\n');
        }

        output.push_str(&self.render_status_line(snapshot));
        output
    }

    /// Status line: the command prompt in Cmd mode, otherwise mode, file and message
    pub fn render_status_line(&self, snapshot: &EditorSnapshot) -> String {
        if snapshot.mode == Mode::Cmd {
            return format!(":{}", snapshot.command_line);
        }

        let mut status = String::from(snapshot.mode.as_str());
        status.push(' ');

        match &snapshot.path {
            Some(path) => status.push_str(path),
            None => status.push_str("[No Name]"),
        }
        if snapshot.dirty {
            status.push('*');
        }

        if !snapshot.status_message.is_empty() {
            status.push_str(" | ");
            status.push_str(&snapshot.status_message);
        }

        status
    }

    /// Screen position of the cursor as (column, row)
    pub fn cursor_position(&self, snapshot: &EditorSnapshot) -> (usize, usize) {
        if snapshot.mode == Mode::Cmd {
            // After the ':' prompt on the status line
            return (snapshot.command_cursor + 1, self.viewport_lines);
        }
        let row = snapshot.cursor.row - self.scroll_offset(snapshot);
        (snapshot.cursor.col, row)
    }
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new(20)
    }
}

fn render_line_with_cursor(line: &str, col: usize) -> String {
    let mut result = String::new();
    let mut len = 0;
    for (i, ch) in line.chars().enumerate() {
        if i == col {
            result.push_str(&format!("[{}]", ch));
        } else {
            result.push(ch);
        }
        len += 1;
    }
    // Cursor at end of line
    if col >= len {
        result.push_str("[ ]");
    }
    result
}

/// Headless surface that keeps the most recent frame as text
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    view: EditorView,
    frames: usize,
    last_frame: String,
}

impl TextSurface {
    pub fn new(view: EditorView) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }
}

impl Surface for TextSurface {
    fn render(&mut self, snapshot: &EditorSnapshot) -> Result<(), HostRuntimeError> {
        self.last_frame = self.view.render(snapshot);
        self.frames += 1;
        Ok(())
    }
}
