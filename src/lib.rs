//! Shell completion for task-runner command lines.
//!
//! The entry point is [`core::completion::complete`], which loads the project
//! environment through an [`core::environment::EnvironmentLoader`] and returns
//! the candidates for the word under the cursor.

pub mod cli;
pub mod constants;
pub mod core;
pub mod dev_utils;
pub mod models;
