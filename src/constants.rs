// src/constants.rs

/// The name of the project configuration file, searched for from the working directory upwards.
pub const PROJECT_CONFIG_FILENAME: &str = "taskcomp.toml";

/// Environment variable holding an explicit path to the project configuration file.
pub const CONFIG_PATH_ENV_VAR: &str = "TASKCOMP_CONFIG";

/// Environment variable set by the shell with the full line being completed.
pub const COMP_LINE_ENV_VAR: &str = "COMP_LINE";

/// Environment variable set by the shell with the cursor offset into `COMP_LINE`.
pub const COMP_POINT_ENV_VAR: &str = "COMP_POINT";

/// Prefix of every long flag spelling on the command line.
pub const LONG_FLAG_PREFIX: &str = "--";

/// Separator between the namespace and the name of a subtask (e.g. `compile:solidity`).
pub const TASK_NAMESPACE_SEPARATOR: char = ':';

/// Networks every loaded environment knows about, even without a config entry.
pub const DEFAULT_NETWORK_NAMES: &[&str] = &["devnet", "localhost"];

/// JSON-RPC endpoint of the `localhost` default network.
pub const LOCALHOST_NETWORK_URL: &str = "http://127.0.0.1:8545";
