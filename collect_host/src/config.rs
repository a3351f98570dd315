//! Command line arguments and host configuration

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::runtime::HostRuntimeError;

/// Default capacity of the key queue between the input thread and the editor
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// collect: a small modal text editor
#[derive(Debug, Parser)]
#[command(name = "collect", version)]
pub struct Cli {
    /// File to edit; an empty buffer is used when omitted
    pub path: Option<PathBuf>,

    /// Run headless, reading keys from an input script
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Print the final editor snapshot as JSON after a scripted run
    #[arg(long, requires = "script")]
    pub dump_snapshot: bool,

    /// Number of keys buffered between the input reader and the editor
    #[arg(long, value_name = "N", default_value_t = DEFAULT_QUEUE_CAPACITY, value_parser = parse_capacity)]
    pub queue_capacity: usize,

    /// Keep at most N undo records
    #[arg(long, value_name = "N")]
    pub undo_limit: Option<usize>,

    /// Write logs to FILE (filter with COLLECT_LOG)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

fn parse_capacity(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("queue capacity must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    /// Resolve arguments into a runtime configuration, reading the script file
    pub fn into_config(self) -> Result<HostRuntimeConfig, HostRuntimeError> {
        let script = match &self.script {
            Some(path) => Some(fs::read_to_string(path).map_err(|source| {
                HostRuntimeError::ScriptReadError {
                    path: path.clone(),
                    source,
                }
            })?),
            None => None,
        };

        Ok(HostRuntimeConfig {
            path: self.path,
            script,
            dump_snapshot: self.dump_snapshot,
            queue_capacity: self.queue_capacity,
            undo_limit: self.undo_limit,
        })
    }
}

/// Host runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRuntimeConfig {
    /// File to open at startup
    pub path: Option<PathBuf>,
    /// Input script text (headless mode)
    pub script: Option<String>,
    /// Print the final snapshot as JSON (headless mode)
    pub dump_snapshot: bool,
    /// Capacity of the bounded key queue
    pub queue_capacity: usize,
    /// Undo history bound; unbounded when `None`
    pub undo_limit: Option<usize>,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            path: None,
            script: None,
            dump_snapshot: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            undo_limit: None,
        }
    }
}
