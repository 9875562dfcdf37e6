//! Subcommand implementations

pub mod info;
pub mod render;
pub mod tokenize;
