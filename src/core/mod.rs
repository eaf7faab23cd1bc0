// src/core/mod.rs

pub mod builtin_tasks;
pub mod completion;
pub mod environment;
pub mod params;
