// src/core/completion.rs

//! # Completion Resolver
//!
//! Given the line typed so far and the cursor offset, produces the words a
//! shell should offer for the word under the cursor: task names, global flags,
//! the active task's flags, or configured network names after `--network`.
//!
//! The flags used anywhere on the line are excluded from the suggestions,
//! including flags typed after the cursor. Only the "previous token" (the word
//! ending at or right before the cursor) is cursor-relative.

use crate::{
    constants::LONG_FLAG_PREFIX,
    core::{
        environment::EnvironmentLoader,
        params::{cla_to_param_name, global_param_definitions, network_flag_spelling, param_name_to_cla},
    },
    models::{Environment, ParamDefinition, ParamRegistry},
};
use std::collections::{BTreeSet, HashSet};

/// A completion request as handed over by the shell integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// The full command line, including the invoked program name.
    pub line: String,
    /// Byte offset of the cursor into `line`.
    pub point: usize,
}

impl CompletionRequest {
    pub fn new(line: impl Into<String>, point: usize) -> Self {
        Self {
            line: line.into(),
            point,
        }
    }

    /// A request with the cursor at the end of the line.
    pub fn at_end(line: impl Into<String>) -> Self {
        let line = line.into();
        let point = line.len();
        Self { line, point }
    }
}

/// Loads the environment and resolves the suggestions for `request`.
///
/// Never fails: if the environment cannot be loaded, there is nothing to
/// suggest and the result is empty.
pub async fn complete<L>(request: &CompletionRequest, loader: &L) -> BTreeSet<String>
where
    L: EnvironmentLoader + ?Sized,
{
    let env = match loader.load().await {
        Ok(env) => env,
        Err(e) => {
            log::debug!("Environment unavailable, no suggestions: {}", e);
            return BTreeSet::new();
        }
    };

    resolve(&request.line, request.point, &env, global_param_definitions())
}

/// Resolves the suggestions for the word at `point` against a loaded environment.
pub fn resolve(
    line: &str,
    point: usize,
    env: &Environment,
    globals: &ParamRegistry,
) -> BTreeSet<String> {
    let words: Vec<&str> = tokenize(line).collect();
    let used: HashSet<&str> = words.iter().copied().collect();

    let task = find_task_name(&words, globals);
    log::debug!("Words: {:?}, active task: {:?}", words, task);

    let before_cursor = line.get(..clamp_to_char_boundary(line, point)).unwrap_or_default();
    if let Some(prev) = tokenize(before_cursor).next_back() {
        if prev == network_flag_spelling() {
            return env.network_names().map(str::to_string).collect();
        }

        // A global parameter that takes a free-form value: nothing sensible to offer.
        if prev.starts_with(LONG_FLAG_PREFIX) && is_global_param(prev, globals) {
            log::debug!("'{}' expects a free-form value.", prev);
            return BTreeSet::new();
        }
    }

    let mut suggestions = unused_spellings(globals, &used);

    match task.and_then(|name| env.task(name)) {
        Some(task) => {
            suggestions.extend(unused_spellings(&task.param_definitions, &used));
        }
        None => {
            suggestions.extend(env.visible_task_names().map(str::to_string));
        }
    }

    suggestions
}

fn tokenize(line: &str) -> impl DoubleEndedIterator<Item = &str> {
    line.split_whitespace()
}

/// Walks the words after the program name, skipping global flags (and the
/// values of global parameters) and any other long flag, until the first
/// plain word, which names the task.
fn find_task_name<'w>(words: &[&'w str], globals: &ParamRegistry) -> Option<&'w str> {
    let mut index = 1;
    while let Some(&word) = words.get(index) {
        if is_global_flag(word, globals) {
            index += 1;
        } else if is_global_param(word, globals) {
            index += 2;
        } else if word.starts_with(LONG_FLAG_PREFIX) {
            // Probably a task flag; the task itself may come later.
            index += 1;
        } else {
            return Some(word);
        }
    }
    None
}

fn lookup_global<'g>(word: &str, globals: &'g ParamRegistry) -> Option<&'g ParamDefinition> {
    let name = cla_to_param_name(word)?;
    globals.get(name.as_str())
}

/// Whether `word` spells a global boolean switch.
fn is_global_flag(word: &str, globals: &ParamRegistry) -> bool {
    lookup_global(word, globals).is_some_and(|def| def.is_flag)
}

/// Whether `word` spells a global parameter that consumes a value.
fn is_global_param(word: &str, globals: &ParamRegistry) -> bool {
    lookup_global(word, globals).is_some_and(|def| !def.is_flag)
}

fn unused_spellings(registry: &ParamRegistry, used: &HashSet<&str>) -> BTreeSet<String> {
    registry
        .iter()
        .map(|def| param_name_to_cla(&def.name))
        .filter(|cla| !used.contains(cla.as_str()))
        .collect()
}

fn clamp_to_char_boundary(line: &str, point: usize) -> usize {
    let mut point = point.min(line.len());
    while !line.is_char_boundary(point) {
        point -= 1;
    }
    point
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::environment::{LoadError, build_environment};
    use crate::models::{ProjectConfig, TaskDefinition};
    use async_trait::async_trait;
    use std::path::PathBuf;

    const CORE_TASKS: &[&str] = &[
        "check", "clean", "compile", "console", "flatten", "help", "node", "run", "test",
    ];

    const CORE_PARAMS: &[&str] = &[
        "--network",
        "--show-stack-traces",
        "--version",
        "--help",
        "--emoji",
        "--config",
        "--verbose",
        "--max-memory",
        "--tsconfig",
    ];

    struct FixedLoader(Environment);

    #[async_trait]
    impl EnvironmentLoader for FixedLoader {
        async fn load(&self) -> Result<Environment, LoadError> {
            Ok(self.0.clone())
        }
    }

    struct FailingLoader;

    #[async_trait]
    impl EnvironmentLoader for FailingLoader {
        async fn load(&self) -> Result<Environment, LoadError> {
            Err(LoadError::ConfigNotFound(PathBuf::from("missing.toml")))
        }
    }

    fn default_env() -> Environment {
        build_environment(ProjectConfig::default(), None)
    }

    /// Completes a line where `|` marks the cursor; without it the cursor is at the end.
    fn complete_line(env: &Environment, line_with_cursor: &str) -> BTreeSet<String> {
        let point = line_with_cursor.find('|');
        let line = line_with_cursor.replacen('|', "", 1);
        let point = point.unwrap_or(line.len());
        resolve(&line, point, env, global_param_definitions())
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn core_params_without(excluded: &[&str]) -> Vec<&'static str> {
        CORE_PARAMS
            .iter()
            .copied()
            .filter(|p| !excluded.contains(p))
            .collect()
    }

    fn union(parts: &[&[&str]]) -> BTreeSet<String> {
        parts.iter().flat_map(|p| p.iter()).map(|s| s.to_string()).collect()
    }

    // --- Task and global listing ---

    #[test]
    fn test_suggests_all_tasks_and_global_params() {
        let suggestions = complete_line(&default_env(), "tool ");
        assert_eq!(suggestions, union(&[CORE_TASKS, CORE_PARAMS]));
    }

    #[test]
    fn test_suggests_all_tasks_and_global_params_for_partial_param() {
        let suggestions = complete_line(&default_env(), "tool --");
        assert_eq!(suggestions, union(&[CORE_TASKS, CORE_PARAMS]));
    }

    #[test]
    fn test_empty_line_suggests_tasks_and_global_params() {
        let suggestions = complete_line(&default_env(), "");
        assert_eq!(suggestions, union(&[CORE_TASKS, CORE_PARAMS]));
    }

    #[test]
    fn test_does_not_suggest_used_global_flag() {
        let suggestions = complete_line(&default_env(), "tool --verbose ");
        assert_eq!(
            suggestions,
            union(&[CORE_TASKS, core_params_without(&["--verbose"]).as_slice()])
        );
    }

    #[test]
    fn test_suggests_tasks_after_global_param_value() {
        let suggestions = complete_line(&default_env(), "tool --network localhost ");
        assert_eq!(
            suggestions,
            union(&[CORE_TASKS, core_params_without(&["--network"]).as_slice()])
        );
    }

    #[test]
    fn test_unknown_task_falls_back_to_task_listing() {
        let suggestions = complete_line(&default_env(), "tool frobnicate ");
        assert_eq!(suggestions, union(&[CORE_TASKS, CORE_PARAMS]));
    }

    #[test]
    fn test_unknown_flag_is_skipped() {
        let suggestions = complete_line(&default_env(), "tool --unknown-flag ");
        assert_eq!(suggestions, union(&[CORE_TASKS, CORE_PARAMS]));
    }

    // --- Task flags ---

    #[test]
    fn test_suggests_task_flags() {
        let suggestions = complete_line(&default_env(), "tool compile ");
        assert_eq!(suggestions, union(&[CORE_PARAMS, &["--force", "--quiet"]]));
    }

    #[test]
    fn test_ignores_already_used_flags() {
        let suggestions = complete_line(&default_env(), "tool --verbose compile --quiet ");
        assert_eq!(
            suggestions,
            union(&[core_params_without(&["--verbose"]).as_slice(), &["--force"]])
        );
    }

    #[test]
    fn test_task_found_after_global_param_with_value() {
        let suggestions = complete_line(&default_env(), "tool --config alt.toml compile ");
        assert_eq!(
            suggestions,
            union(&[core_params_without(&["--config"]).as_slice(), &["--force", "--quiet"]])
        );
    }

    #[test]
    fn test_task_value_flag_does_not_block_suggestions() {
        // `--port` takes a value, but only global parameters stop the listing.
        let suggestions = complete_line(&default_env(), "tool node --port ");
        assert_eq!(
            suggestions,
            union(&[CORE_PARAMS, &["--hostname", "--fork", "--fork-block-number"]])
        );
    }

    #[test]
    fn test_all_task_flags_used() {
        let suggestions =
            complete_line(&default_env(), "tool --network devnet test --no-compile ");
        assert_eq!(suggestions, union(&[core_params_without(&["--network"]).as_slice()]));
    }

    #[test]
    fn test_namespaced_task_is_recognized_when_typed() {
        let suggestions = complete_line(&default_env(), "tool compile:solidity ");
        assert_eq!(suggestions, union(&[CORE_PARAMS, &["--force", "--quiet"]]));
    }

    // --- Value completion ---

    #[test]
    fn test_suggests_networks() {
        let suggestions = complete_line(&default_env(), "tool --network ");
        assert_eq!(suggestions, set(&["devnet", "localhost"]));
    }

    #[test]
    fn test_suggests_networks_after_task_and_flags() {
        let suggestions = complete_line(&default_env(), "tool compile --force --network ");
        assert_eq!(suggestions, set(&["devnet", "localhost"]));
    }

    #[test]
    fn test_no_suggestions_for_free_form_global_value() {
        assert!(complete_line(&default_env(), "tool --config ").is_empty());
        assert!(complete_line(&default_env(), "tool --max-memory ").is_empty());
        assert!(complete_line(&default_env(), "tool compile --tsconfig ").is_empty());
    }

    // --- Cursor position ---

    #[test]
    fn test_cursor_not_at_the_end() {
        let suggestions = complete_line(&default_env(), "tool --network | test");
        assert_eq!(suggestions, set(&["devnet", "localhost"]));
    }

    #[test]
    fn test_flags_used_after_the_cursor_are_excluded() {
        let suggestions = complete_line(&default_env(), "tool | test --verbose");
        assert_eq!(
            suggestions,
            union(&[core_params_without(&["--verbose"]).as_slice(), &["--no-compile"]])
        );
    }

    #[test]
    fn test_cursor_in_the_middle_of_a_partial_word() {
        let suggestions = complete_line(&default_env(), "tool com| --verbose");
        assert_eq!(
            suggestions,
            union(&[CORE_TASKS, core_params_without(&["--verbose"]).as_slice()])
        );
    }

    #[test]
    fn test_cursor_past_the_end_is_clamped() {
        let env = default_env();
        let suggestions = resolve("tool --network ", 1000, &env, global_param_definitions());
        assert_eq!(suggestions, set(&["devnet", "localhost"]));
    }

    #[test]
    fn test_cursor_inside_multibyte_character() {
        let env = default_env();
        let line = "tool --network é";
        // Offset 16 falls inside the two-byte 'é'.
        let suggestions = resolve(line, 16, &env, global_param_definitions());
        assert_eq!(suggestions, set(&["devnet", "localhost"]));
    }

    // --- Project-defined tasks and networks ---

    #[test]
    fn test_project_tasks_and_networks() {
        let config: ProjectConfig = toml::from_str(
            r#"
            [networks.sepolia]
            url = "https://rpc.sepolia.example"

            [tasks.deploy.params.dryRun]
            flag = true

            [tasks."deploy:verify"]
            "#,
        )
        .unwrap();
        let env = build_environment(config, None);

        let listing = complete_line(&env, "tool ");
        assert!(listing.contains("deploy"));
        assert!(!listing.contains("deploy:verify"));

        let deploy_flags = complete_line(&env, "tool deploy ");
        assert_eq!(deploy_flags, union(&[CORE_PARAMS, &["--dry-run"]]));

        let networks = complete_line(&env, "tool deploy --network ");
        assert_eq!(networks, set(&["devnet", "localhost", "sepolia"]));
    }

    #[test]
    fn test_task_without_params_suggests_only_globals() {
        let mut env = Environment::default();
        env.tasks
            .insert("lint".to_string(), TaskDefinition::new("lint", "Lints"));

        let suggestions = complete_line(&env, "tool lint ");
        assert_eq!(suggestions, union(&[CORE_PARAMS]));
    }

    // --- Classification helpers ---

    #[test]
    fn test_classification_helpers() {
        let globals = global_param_definitions();
        assert!(is_global_flag("--verbose", globals));
        assert!(!is_global_param("--verbose", globals));
        assert!(is_global_param("--network", globals));
        assert!(!is_global_flag("--network", globals));
        assert!(!is_global_flag("--force", globals));
        assert!(!is_global_param("--force", globals));
        assert!(!is_global_flag("verbose", globals));
    }

    // --- Loader boundary ---

    #[tokio::test]
    async fn test_complete_with_loaded_environment() {
        let loader = FixedLoader(default_env());
        let suggestions = complete(&CompletionRequest::at_end("tool --network "), &loader).await;
        assert_eq!(suggestions, set(&["devnet", "localhost"]));
    }

    #[tokio::test]
    async fn test_complete_returns_nothing_when_environment_fails_to_load() {
        let suggestions = complete(&CompletionRequest::at_end("tool "), &FailingLoader).await;
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_complete_accepts_dyn_loader() {
        let loader: Box<dyn EnvironmentLoader> = Box::new(FixedLoader(default_env()));
        let suggestions = complete(&CompletionRequest::new("tool compile ", 13), loader.as_ref()).await;
        assert_eq!(suggestions, union(&[CORE_PARAMS, &["--force", "--quiet"]]));
    }
}
