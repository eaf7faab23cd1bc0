use anyhow::Result;
use std::io;

use crate::cli::{Cli, Command, handlers};

/// Routes the parsed command line to its handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    log::debug!("Dispatching: {:?}", cli);

    match cli.command {
        Command::Complete(args) => {
            let stdout = io::stdout();
            handlers::complete::handle(args, &mut stdout.lock()).await
        }
    }
}
