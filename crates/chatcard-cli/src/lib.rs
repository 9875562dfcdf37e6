//! Command-line interface for Chatcard
//!
//! The `chatcard` binary renders message stacks from a JSON file, shows how
//! content is tokenized, and prints the font fallback chain it would use.

pub mod cli;
pub mod commands;
pub mod input;
