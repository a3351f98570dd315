//! # collect Host Runtime
//!
//! This crate provides the host side of the collect editor.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The editor core never draws and never polls input
//! - **Output is snapshot rendering**: Surfaces only ever see `EditorSnapshot`s
//! - **Input is explicit events**: Keys are decoded before they reach the core
//! - **Deterministic mode is first-class**: Scripted input runs headless for tests
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Parses the command line into a `HostRuntimeConfig`
//! - Loads the document and sizes its undo history
//! - Runs the event loop (input thread → bounded queue → editor → surface)
//! - Drives either the crossterm terminal or a headless text surface
//! - Installs file-based tracing when asked to

pub mod config;
pub mod input_script;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod terminal;

pub use config::{Cli, HostRuntimeConfig, DEFAULT_QUEUE_CAPACITY};
pub use input_script::{InputScript, InputScriptError};
pub use render::{EditorView, TextSurface};
pub use runtime::{ExitReason, HostRuntime, HostRuntimeError, InputEvent, KeySource, Surface};
pub use terminal::{TerminalKeys, TerminalSurface};

/// Run a configured runtime to completion
///
/// Scripted configs run headless against a [`TextSurface`] and may print the
/// final snapshot; otherwise the terminal is taken over until the editor quits.
pub fn run(runtime: &mut HostRuntime) -> Result<ExitReason, HostRuntimeError> {
    let Some(script) = runtime.config().script.as_deref() else {
        let mut surface = TerminalSurface::enter()?;
        return runtime.run(TerminalKeys, &mut surface);
    };

    let script = InputScript::from_text(script)?;
    let mut surface = TextSurface::default();
    let reason = runtime.run(script, &mut surface)?;

    if runtime.config().dump_snapshot {
        println!("{}", runtime.snapshot_json()?);
    }
    Ok(reason)
}
