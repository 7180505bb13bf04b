//! CLI command handlers

pub mod commands;

pub use commands::{add, delete, edit, export, favorite, import, list, show};
