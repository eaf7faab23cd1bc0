//! # Environment Loader
//!
//! Loading the project environment is the only asynchronous step of a
//! completion request. The resolver never loads anything itself: it is handed
//! an [`EnvironmentLoader`] and consumes the `Result` it produces, so a missing
//! or broken project is an ordinary value rather than a panic or an escaped error.
//!
//! [`ProjectEnvironmentLoader`] is the production implementation. It finds the
//! project's `taskcomp.toml`, parses it, and layers the configured networks and
//! tasks over the defaults that every project has.

use crate::{
    constants::{DEFAULT_NETWORK_NAMES, LOCALHOST_NETWORK_URL, PROJECT_CONFIG_FILENAME},
    core::builtin_tasks,
    models::{Environment, EnvironmentConfig, NetworkConfig, ProjectConfig},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Chain id reported by the in-process development network.
const DEVNET_CHAIN_ID: u64 = 31337;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No '{filename}' found in '{}' or any of its parent directories.", .start.display())]
    ProjectNotFound {
        filename: &'static str,
        start: PathBuf,
    },
    #[error("Config file '{}' does not exist.", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("Could not read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to expand config path '{template}': {message}")]
    PathExpansion { template: String, message: String },
}

/// A capability that produces the environment for one completion request.
#[async_trait]
pub trait EnvironmentLoader: Send + Sync {
    async fn load(&self) -> Result<Environment, LoadError>;
}

/// Loads the environment of the project that contains `start_dir`.
#[derive(Debug, Clone)]
pub struct ProjectEnvironmentLoader {
    start_dir: PathBuf,
    config_path: Option<String>,
}

impl ProjectEnvironmentLoader {
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
            config_path: None,
        }
    }

    /// Uses an explicit config file instead of searching for one.
    ///
    /// The path may contain `~` and environment variables; relative paths are
    /// resolved against the start directory.
    pub fn with_config_path(mut self, template: impl Into<String>) -> Self {
        self.config_path = Some(template.into());
        self
    }

    /// Determines which config file to read.
    async fn locate_config(&self) -> Result<PathBuf, LoadError> {
        if let Some(template) = &self.config_path {
            let expanded = shellexpand::full(template).map_err(|e| LoadError::PathExpansion {
                template: template.clone(),
                message: e.to_string(),
            })?;
            let path = self.start_dir.join(&*expanded);
            return if path_exists(&path).await? {
                Ok(path)
            } else {
                Err(LoadError::ConfigNotFound(path))
            };
        }

        let start = match tokio::fs::canonicalize(&self.start_dir).await {
            Ok(canonical) => dunce::simplified(&canonical).to_path_buf(),
            Err(e) => {
                log::debug!(
                    "Could not canonicalize '{}': {}. Searching from it as given.",
                    self.start_dir.display(),
                    e
                );
                self.start_dir.clone()
            }
        };

        for dir in start.ancestors() {
            let candidate = dir.join(PROJECT_CONFIG_FILENAME);
            log::trace!("Looking for project config at '{}'", candidate.display());
            if path_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(LoadError::ProjectNotFound {
            filename: PROJECT_CONFIG_FILENAME,
            start,
        })
    }
}

#[async_trait]
impl EnvironmentLoader for ProjectEnvironmentLoader {
    async fn load(&self) -> Result<Environment, LoadError> {
        let path = self.locate_config().await?;
        log::debug!("Loading project config from '{}'", path.display());

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?;
        let config: ProjectConfig = toml::from_str(&content).map_err(|source| LoadError::Parse {
            path: path.clone(),
            source,
        })?;

        Ok(build_environment(config, Some(path)))
    }
}

async fn path_exists(path: &Path) -> Result<bool, LoadError> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// The networks available before any configuration is applied.
fn default_networks() -> BTreeMap<String, NetworkConfig> {
    DEFAULT_NETWORK_NAMES
        .iter()
        .map(|&name| {
            let network = if name == "localhost" {
                NetworkConfig {
                    url: Some(LOCALHOST_NETWORK_URL.to_string()),
                    chain_id: None,
                }
            } else {
                NetworkConfig {
                    url: None,
                    chain_id: Some(DEVNET_CHAIN_ID),
                }
            };
            (name.to_string(), network)
        })
        .collect()
}

/// Layers a parsed project config over the defaults.
///
/// Configured networks replace a default network of the same name, and a
/// project task replaces the core task it shares a name with.
pub fn build_environment(config: ProjectConfig, source: Option<PathBuf>) -> Environment {
    let mut networks = default_networks();
    networks.extend(config.networks);

    let mut tasks = builtin_tasks::core_tasks();
    for (name, task) in config.tasks {
        if tasks.contains_key(&name) {
            log::debug!("Project task '{}' overrides the core task.", name);
        }
        let definition = task.into_definition(&name);
        tasks.insert(name, definition);
    }

    Environment {
        tasks,
        config: EnvironmentConfig { source, networks },
    }
}

// MARK: --- UNIT TESTS ---
