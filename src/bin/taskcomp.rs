// src/bin/taskcomp.rs

use clap::Parser;
use colored::*;
use taskcomp::cli::{Cli, dispatcher};

/// The main entry point of the `taskcomp` application.
/// It sets up logging, parses arguments, dispatches to the handler,
/// and performs centralized error handling.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr; stdout is reserved for the completion candidates.
    env_logger::init();

    if let Err(e) = dispatcher::dispatch(Cli::parse()).await {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
