// src/core/params.rs

//! Parameter spellings and the registry of global parameters.
//!
//! Identifiers are camelCase (`maxMemory`); on the command line they are spelled
//! in kebab-case behind the long-flag prefix (`--max-memory`). The two
//! conversions in this module are exact inverses of each other.

use crate::{
    constants::LONG_FLAG_PREFIX,
    models::{ParamDefinition, ParamName, ParamRegistry},
};
use lazy_static::lazy_static;

/// Identifier of the global parameter that selects the target network.
pub const NETWORK_PARAM: &str = "network";

lazy_static! {
    static ref GLOBAL_PARAM_DEFINITIONS: ParamRegistry = build_global_param_definitions();
}

fn builtin_name(name: &str) -> ParamName {
    ParamName::new(name).expect("built-in parameter names are valid identifiers")
}

fn build_global_param_definitions() -> ParamRegistry {
    [
        ParamDefinition::value(
            builtin_name(NETWORK_PARAM),
            "The network to connect to.",
        ),
        ParamDefinition::flag(
            builtin_name("showStackTraces"),
            "Show stack traces when an error occurs.",
        ),
        ParamDefinition::flag(builtin_name("version"), "Shows the tool's version."),
        ParamDefinition::flag(builtin_name("help"), "Shows the help text, or a task's help."),
        ParamDefinition::flag(builtin_name("emoji"), "Use emoji in messages."),
        ParamDefinition::value(builtin_name("config"), "A config file to use instead of the default one."),
        ParamDefinition::flag(builtin_name("verbose"), "Enables verbose logging."),
        ParamDefinition::value(
            builtin_name("maxMemory"),
            "The maximum amount of memory the tool can use.",
        ),
        ParamDefinition::value(builtin_name("tsconfig"), "A TypeScript config file."),
    ]
    .into_iter()
    .collect()
}

/// Every parameter the tool accepts before a task name.
pub fn global_param_definitions() -> &'static ParamRegistry {
    &GLOBAL_PARAM_DEFINITIONS
}

/// Converts an identifier to its command-line spelling: `showStackTraces` -> `--show-stack-traces`.
pub fn param_name_to_cla(name: &ParamName) -> String {
    let mut cla = String::with_capacity(LONG_FLAG_PREFIX.len() + name.as_str().len() + 4);
    cla.push_str(LONG_FLAG_PREFIX);
    for c in name.as_str().chars() {
        if c.is_ascii_uppercase() {
            cla.push('-');
            cla.push(c.to_ascii_lowercase());
        } else {
            cla.push(c);
        }
    }
    cla
}

/// Converts a command-line spelling back to its identifier: `--max-memory` -> `maxMemory`.
///
/// Returns `None` for anything [`param_name_to_cla`] could not have produced,
/// such as a bare `--`, uppercase letters, or empty segments (`--foo--bar`).
pub fn cla_to_param_name(cla: &str) -> Option<ParamName> {
    let body = cla.strip_prefix(LONG_FLAG_PREFIX)?;
    let mut name = String::with_capacity(body.len());

    for (i, segment) in body.split('-').enumerate() {
        let mut chars = segment.chars();
        let first = chars.next()?;
        if !first.is_ascii_lowercase() {
            return None;
        }
        if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
            return None;
        }

        if i == 0 {
            name.push_str(segment);
        } else {
            name.push(first.to_ascii_uppercase());
            name.push_str(segment.get(1..).unwrap_or_default());
        }
    }

    ParamName::new(name).ok()
}

/// The command-line spelling of the network selector (`--network`).
pub fn network_flag_spelling() -> String {
    param_name_to_cla(&builtin_name(NETWORK_PARAM))
}

// MARK: --- UNIT TESTS ---
