//! # collect
//!
//! Main entry point for the collect editor.

use std::process;

use clap::Parser;
use collect_host::{logging, Cli, HostRuntime};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let config = cli.into_config().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let mut runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        error!(error = %e, "startup failed");
        eprintln!("Failed to start editor: {}", e);
        process::exit(1);
    });

    match collect_host::run(&mut runtime) {
        Ok(reason) => info!(?reason, "exiting"),
        Err(e) => {
            error!(error = %e, "runtime failed");
            eprintln!("Runtime error: {}", e);
            process::exit(1);
        }
    }
}
