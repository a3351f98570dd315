//! Interactive terminal backend (crossterm)

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use editor_core::{EditorSnapshot, Key};
use tracing::{debug, info};

use crate::render::EditorView;
use crate::runtime::{HostRuntimeError, InputEvent, KeySource, Surface};

/// Translate a crossterm key event into an editor key
///
/// Releases and keys the editor has no use for yield `None`.
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let key = match event.code {
        KeyCode::Char(ch) if event.modifiers.contains(KeyModifiers::CONTROL) => Key::ctrl(ch),
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => return None,
    };
    Some(key)
}

/// Translate a crossterm event into an input event
///
/// Resizes pass through as a redraw request; mouse, focus and paste events
/// yield `None`.
pub fn translate_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key).map(InputEvent::Key),
        Event::Resize(..) => Some(InputEvent::Resize),
        _ => None,
    }
}

/// Blocking reader of terminal events
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_event(&mut self) -> Result<Option<InputEvent>, HostRuntimeError> {
        loop {
            let event = event::read()?;
            if let Some(input) = translate_event(event.clone()) {
                return Ok(Some(input));
            }
            debug!(?event, "ignored terminal event");
        }
    }
}

/// Raw-mode, alternate-screen surface on stdout
pub struct TerminalSurface {
    out: Stdout,
    active: bool,
}

impl TerminalSurface {
    /// Switch the terminal into raw mode and the alternate screen
    pub fn enter() -> Result<Self, HostRuntimeError> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(err.into());
        }
        info!("terminal entered raw mode");
        Ok(Self { out, active: true })
    }
}

impl Surface for TerminalSurface {
    fn render(&mut self, snapshot: &EditorSnapshot) -> Result<(), HostRuntimeError> {
        let (width, height) = terminal::size()?;
        let view = EditorView::new(usize::from(height.saturating_sub(1)));
        let width = usize::from(width);

        queue!(self.out, cursor::Hide, Clear(ClearType::All))?;

        for (row, line) in view.visible_rows(snapshot).iter().enumerate() {
            let visible: String = line.chars().take(width).collect();
            queue!(self.out, cursor::MoveTo(0, to_u16(row)), Print(visible))?;
        }

        let status: String = view.render_status_line(snapshot).chars().take(width).collect();
        queue!(
            self.out,
            cursor::MoveTo(0, to_u16(view.viewport_lines())),
            Print(status)
        )?;

        let (col, row) = view.cursor_position(snapshot);
        let col = col.min(width.saturating_sub(1));
        queue!(
            self.out,
            cursor::MoveTo(to_u16(col), to_u16(row)),
            cursor::Show
        )?;

        self.out.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), HostRuntimeError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;
        info!("terminal restored");
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
