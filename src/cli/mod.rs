use clap::{Parser, Subcommand};

pub mod args;
pub mod dispatcher;
pub mod handlers;

use self::args::CompleteArgs;

/// taskcomp: shell completion for task-runner command lines.
///
/// A shell completion hook calls `taskcomp complete`, which reads the line and
/// cursor position the shell exports (`COMP_LINE`, `COMP_POINT`) and prints one
/// candidate per line.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prints the completion candidates for a partially typed command line.
    Complete(CompleteArgs),
}
