// src/cli/args.rs

use crate::constants::{COMP_LINE_ENV_VAR, COMP_POINT_ENV_VAR, CONFIG_PATH_ENV_VAR};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default, Clone)]
pub struct CompleteArgs {
    /// The command line being completed, including the program name.
    #[arg(long, env = COMP_LINE_ENV_VAR, default_value = "", allow_hyphen_values = true)]
    pub line: String,

    /// Byte offset of the cursor in the line. Defaults to the end of the line.
    #[arg(long, env = COMP_POINT_ENV_VAR)]
    pub point: Option<usize>,

    /// The project config file to use instead of searching for `taskcomp.toml`.
    #[arg(long, env = CONFIG_PATH_ENV_VAR)]
    pub config: Option<String>,

    /// Directory to search for the project from. Defaults to the current directory.
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Print the candidates as a JSON array instead of one per line.
    #[arg(long)]
    pub json: bool,
}
