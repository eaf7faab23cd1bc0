use crate::{
    cli::args::CompleteArgs,
    core::{
        completion::{self, CompletionRequest},
        environment::ProjectEnvironmentLoader,
    },
    dev_utils::BlockTimer,
};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::env;
use std::io::Write;

///
/// Main entry point for the 'complete' command.
/// Resolves the candidates for the request described by `args` and writes them to `out`.
///
/// A project that cannot be found or loaded produces no output rather than an
/// error: a broken project must never break the user's shell.
pub async fn handle(args: CompleteArgs, out: &mut impl Write) -> Result<()> {
    let _timer = BlockTimer::new("complete");

    let start_dir = match args.cwd {
        Some(dir) => dir,
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                log::debug!("Could not determine the current directory: {}", e);
                return write_suggestions(&BTreeSet::new(), args.json, out);
            }
        },
    };

    let mut loader = ProjectEnvironmentLoader::new(start_dir);
    if let Some(config_path) = args.config {
        loader = loader.with_config_path(config_path);
    }

    let request = match args.point {
        Some(point) => CompletionRequest::new(args.line, point),
        None => CompletionRequest::at_end(args.line),
    };
    log::debug!("Completion request: {:?}", request);

    let suggestions = completion::complete(&request, &loader).await;
    write_suggestions(&suggestions, args.json, out)
}

fn write_suggestions(suggestions: &BTreeSet<String>, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, suggestions).context("Failed to serialize suggestions")?;
        writeln!(out).context("Failed to write suggestions")?;
    } else {
        for suggestion in suggestions {
            writeln!(out, "{}", suggestion).context("Failed to write suggestions")?;
        }
    }
    out.flush().context("Failed to flush suggestions")?;
    Ok(())
}
