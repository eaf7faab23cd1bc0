// src/models.rs

use crate::constants::TASK_NAMESPACE_SEPARATOR;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

lazy_static! {
    static ref PARAM_NAME_RE: Regex =
        Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("parameter name pattern is valid");
}

// --- PARAMETER MODELS ---

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamNameError {
    #[error("Parameter name cannot be empty.")]
    Empty,
    #[error(
        "Invalid parameter name '{0}': expected a camelCase identifier starting with a lowercase letter."
    )]
    Invalid(String),
}

/// A validated parameter identifier, e.g. `maxMemory`.
///
/// Only camelCase identifiers are accepted, which keeps the mapping to the
/// `--max-memory` command-line spelling reversible.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ParamName(String);

impl ParamName {
    pub fn new(name: impl Into<String>) -> Result<Self, ParamNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ParamNameError::Empty);
        }
        if !PARAM_NAME_RE.is_match(&name) {
            return Err(ParamNameError::Invalid(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParamName {
    type Error = ParamNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParamName> for String {
    fn from(name: ParamName) -> Self {
        name.0
    }
}

impl Borrow<str> for ParamName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declares a parameter accepted on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDefinition {
    pub name: ParamName,
    /// `true` for a boolean switch, `false` when the parameter consumes the next word as its value.
    pub is_flag: bool,
    pub description: Option<String>,
}

impl ParamDefinition {
    /// A boolean switch, e.g. `--verbose`.
    pub fn flag(name: ParamName, description: &str) -> Self {
        Self {
            name,
            is_flag: true,
            description: Some(description.to_string()),
        }
    }

    /// A parameter that takes one value, e.g. `--network <name>`.
    pub fn value(name: ParamName, description: &str) -> Self {
        Self {
            name,
            is_flag: false,
            description: Some(description.to_string()),
        }
    }
}

/// An ordered, read-only lookup table of parameter definitions keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamRegistry {
    definitions: BTreeMap<ParamName, ParamDefinition>,
}

impl ParamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, replacing any previous definition with the same name.
    pub fn insert(&mut self, definition: ParamDefinition) -> Option<ParamDefinition> {
        self.definitions.insert(definition.name.clone(), definition)
    }

    pub fn get(&self, name: &str) -> Option<&ParamDefinition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn iter(&self) -> btree_map::Values<'_, ParamName, ParamDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<ParamDefinition> for ParamRegistry {
    fn from_iter<I: IntoIterator<Item = ParamDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for definition in iter {
            registry.insert(definition);
        }
        registry
    }
}

impl<'a> IntoIterator for &'a ParamRegistry {
    type Item = &'a ParamDefinition;
    type IntoIter = btree_map::Values<'a, ParamName, ParamDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --- TASK MODELS ---

/// A named unit of work with its own parameters, analogous to a subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    pub name: String,
    pub description: Option<String>,
    pub param_definitions: ParamRegistry,
    /// Positional parameters have no flag spelling and are never suggested.
    pub positional_params: Vec<String>,
}

impl TaskDefinition {
    pub fn new(name: impl Into<String>, description: &str) -> Self {
        Self {
            name: name.into(),
            description: Some(description.to_string()),
            param_definitions: ParamRegistry::new(),
            positional_params: Vec::new(),
        }
    }

    /// Builder-style helper used by the core task table.
    pub fn with_param(mut self, definition: ParamDefinition) -> Self {
        self.param_definitions.insert(definition);
        self
    }

    pub fn with_positional(mut self, name: &str) -> Self {
        self.positional_params.push(name.to_string());
        self
    }

    /// Subtasks such as `compile:solidity` live under a namespace and are hidden from listings.
    pub fn is_namespaced(&self) -> bool {
        self.name.contains(TASK_NAMESPACE_SEPARATOR)
    }
}

// --- `taskcomp.toml` MODELS (What is read from the configuration file) ---

/// Connection settings for a configured network.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkConfig {
    pub url: Option<String>,
    pub chain_id: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TomlParam {
    #[serde(default)]
    pub flag: bool,
    pub description: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TomlTask {
    pub description: Option<String>,
    #[serde(default)]
    pub positional: Vec<String>,
    #[serde(default)]
    pub params: BTreeMap<ParamName, TomlParam>,
}

impl TomlTask {
    /// Converts the raw table into a `TaskDefinition` registered under `name`.
    pub fn into_definition(self, name: &str) -> TaskDefinition {
        let param_definitions = self
            .params
            .into_iter()
            .map(|(param_name, param)| ParamDefinition {
                name: param_name,
                is_flag: param.flag,
                description: param.description,
            })
            .collect();

        TaskDefinition {
            name: name.to_string(),
            description: self.description,
            param_definitions,
            positional_params: self.positional,
        }
    }
}

/// Represents the deserialized structure of a `taskcomp.toml` file.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
    #[serde(default)]
    pub tasks: BTreeMap<String, TomlTask>,
}

// --- RUNTIME ENVIRONMENT ---

/// Configuration data of a loaded project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// The file the configuration was read from, if any.
    pub source: Option<PathBuf>,
    pub networks: BTreeMap<String, NetworkConfig>,
}

/// The loaded runtime state consulted by the completion resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub tasks: BTreeMap<String, TaskDefinition>,
    pub config: EnvironmentConfig,
}

impl Environment {
    pub fn task(&self, name: &str) -> Option<&TaskDefinition> {
        self.tasks.get(name)
    }

    pub fn network_names(&self) -> impl Iterator<Item = &str> {
        self.config.networks.keys().map(String::as_str)
    }

    /// Task names offered in listings: every task that is not a namespaced subtask.
    pub fn visible_task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks
            .values()
            .filter(|task| !task.is_namespaced())
            .map(|task| task.name.as_str())
    }
}

// MARK: --- UNIT TESTS ---
