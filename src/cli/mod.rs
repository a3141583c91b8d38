//! CLI module
//!
//! Command-line interface for exporting an account's mentions.
//!
//! # Commands
//!
//! - `download` - Fetch every page for an account and write the archive file

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{export, Runner};
