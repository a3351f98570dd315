//! # Host Runtime
//!
//! The event loop that ties everything together.
//!
//! A producer thread pulls input events from a [`KeySource`] into a bounded
//! queue; the calling thread owns the [`EditorCore`], applies each key and
//! hands a fresh snapshot to the [`Surface`]. A resize only triggers a redraw.
//! A full queue blocks the producer.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{sync_channel, SyncSender};
use std::thread;

use editor_core::{CoreOutcome, EditorCore, EditorError, EditorSnapshot, Key, UndoRedoStack};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::HostRuntimeConfig;
use crate::input_script::InputScriptError;

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error(transparent)]
    EditorError(#[from] EditorError),

    #[error("Script error: {0}")]
    ScriptError(#[from] InputScriptError),

    #[error("Failed to read script {}: {source}", .path.display())]
    ScriptReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open log file {}: {source}", .path.display())]
    LogFileError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Terminal error: {0}")]
    TerminalError(#[from] io::Error),

    #[error("Snapshot error: {0}")]
    SnapshotError(#[from] serde_json::Error),
}

/// One decoded input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// The surface changed size and must be redrawn
    Resize,
}

/// Producer of decoded input events
///
/// `Ok(None)` means the source is exhausted.
pub trait KeySource {
    fn next_event(&mut self) -> Result<Option<InputEvent>, HostRuntimeError>;
}

/// Consumer of editor snapshots
pub trait Surface {
    fn render(&mut self, snapshot: &EditorSnapshot) -> Result<(), HostRuntimeError>;

    /// Release whatever the surface holds (e.g. restore the terminal)
    fn close(&mut self) -> Result<(), HostRuntimeError> {
        Ok(())
    }
}

/// Why the event loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The editor asked to quit
    Quit,
    /// The key source ran dry
    InputExhausted,
}

/// Host runtime
pub struct HostRuntime {
    config: HostRuntimeConfig,
    editor: EditorCore,
    steps: usize,
}

impl HostRuntime {
    /// Creates a new host runtime, loading the configured file if any
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        let editor = match &config.path {
            Some(path) => EditorCore::open(path)?,
            None => EditorCore::new(),
        };

        let history = match config.undo_limit {
            Some(limit) => UndoRedoStack::with_limit(limit),
            None => UndoRedoStack::new(),
        };

        Ok(Self {
            editor: editor.with_history(history),
            config,
            steps: 0,
        })
    }

    /// Runs the event loop until the editor quits or the source is exhausted
    ///
    /// The surface is closed on every exit path.
    pub fn run<S, U>(&mut self, source: S, surface: &mut U) -> Result<ExitReason, HostRuntimeError>
    where
        S: KeySource + Send + 'static,
        U: Surface,
    {
        let result = self.pump(source, surface);
        let closed = surface.close();
        let reason = result?;
        closed?;
        info!(?reason, steps = self.steps, "event loop finished");
        Ok(reason)
    }

    fn pump<S, U>(&mut self, source: S, surface: &mut U) -> Result<ExitReason, HostRuntimeError>
    where
        S: KeySource + Send + 'static,
        U: Surface,
    {
        let (tx, rx) = sync_channel(self.config.queue_capacity);

        // Detached: an interactive source may be parked in a blocking read
        // when the editor quits.
        thread::Builder::new()
            .name("collect-input".into())
            .spawn(move || read_events(source, tx))?;

        surface.render(&self.editor.snapshot())?;

        for event in rx {
            let key = match event? {
                InputEvent::Key(key) => key,
                InputEvent::Resize => {
                    debug!("redraw after resize");
                    surface.render(&self.editor.snapshot())?;
                    continue;
                }
            };
            self.steps += 1;

            match self.editor.apply_key(key) {
                CoreOutcome::Quit => return Ok(ExitReason::Quit),
                CoreOutcome::StatusMessage(message) => debug!(%message, "status"),
                CoreOutcome::Changed | CoreOutcome::Continue => {}
            }

            surface.render(&self.editor.snapshot())?;
        }

        Ok(ExitReason::InputExhausted)
    }

    /// Final snapshot as pretty JSON
    pub fn snapshot_json(&self) -> Result<String, HostRuntimeError> {
        Ok(serde_json::to_string_pretty(&self.editor.snapshot())?)
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        self.editor.snapshot()
    }

    pub fn editor(&self) -> &EditorCore {
        &self.editor
    }

    pub fn config(&self) -> &HostRuntimeConfig {
        &self.config
    }

    /// Number of keys applied so far
    pub fn step_count(&self) -> usize {
        self.steps
    }
}

fn read_events<S: KeySource>(mut source: S, tx: SyncSender<Result<InputEvent, HostRuntimeError>>) {
    loop {
        let event = match source.next_event() {
            Ok(Some(event)) => Ok(event),
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "key source failed");
                Err(err)
            }
        };

        let failed = event.is_err();
        // A closed receiver means the editor has already stopped.
        if tx.send(event).is_err() || failed {
            break;
        }
    }
}
