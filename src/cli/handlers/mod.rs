// src/cli/handlers/mod.rs

// This module contains the logic for each CLI action.

pub mod complete;
