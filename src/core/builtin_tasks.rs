// src/core/builtin_tasks.rs

//! The core tasks every project has, regardless of its configuration file.

use crate::models::{ParamDefinition, ParamName, TaskDefinition};
use std::collections::BTreeMap;

fn param(name: &str) -> ParamName {
    ParamName::new(name).expect("built-in parameter names are valid identifiers")
}

/// Builds the table of core tasks, keyed by task name.
///
/// Namespaced subtasks (`compile:solidity`, ...) are included so they can be
/// recognized when typed, but they are never listed as suggestions.
pub fn core_tasks() -> BTreeMap<String, TaskDefinition> {
    let no_compile = || ParamDefinition::flag(param("noCompile"), "Don't compile before running this task");

    let tasks = [
        TaskDefinition::new("check", "Check whatever you need"),
        TaskDefinition::new("clean", "Clears the cache and deletes all artifacts")
            .with_param(ParamDefinition::flag(param("global"), "Clear the global cache")),
        TaskDefinition::new("compile", "Compiles the entire project, building all artifacts")
            .with_param(ParamDefinition::flag(param("force"), "Force compilation ignoring cache"))
            .with_param(ParamDefinition::flag(param("quiet"), "Makes the compilation process less verbose")),
        TaskDefinition::new("console", "Opens an interactive console")
            .with_param(no_compile()),
        TaskDefinition::new("flatten", "Flattens and prints contracts and their dependencies")
            .with_positional("files"),
        TaskDefinition::new("help", "Prints this message").with_positional("task"),
        TaskDefinition::new("node", "Starts a JSON-RPC server on top of the development network")
            .with_param(ParamDefinition::value(param("hostname"), "The host to which to bind to for new connections"))
            .with_param(ParamDefinition::value(param("port"), "The port on which to listen for new connections"))
            .with_param(ParamDefinition::value(param("fork"), "The URL of the JSON-RPC server to fork from"))
            .with_param(ParamDefinition::value(param("forkBlockNumber"), "The block number to fork from")),
        TaskDefinition::new("run", "Runs a user-defined script after compiling the project")
            .with_param(no_compile())
            .with_positional("script"),
        TaskDefinition::new("test", "Runs the test suite")
            .with_param(no_compile())
            .with_positional("testFiles"),
        // --- Subtasks ---
        TaskDefinition::new("compile:solidity", "Compiles the Solidity sources")
            .with_param(ParamDefinition::flag(param("force"), "Force compilation ignoring cache"))
            .with_param(ParamDefinition::flag(param("quiet"), "Makes the compilation process less verbose")),
        TaskDefinition::new("compile:get-source-paths", "Resolves the source files of the project"),
        TaskDefinition::new("test:run-tests", "Runs the given test files")
            .with_positional("testFiles"),
        TaskDefinition::new("test:get-test-files", "Collects the test files to run")
            .with_positional("testFiles"),
    ];

    tasks
        .into_iter()
        .map(|task| (task.name.clone(), task))
        .collect()
}
