//! Warmpath CLI library.
//!
//! This library provides the core functionality for the Warmpath
//! command-line interface, including command execution, JSON import
//! records, and output formatting.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod record;

pub use cli::{Cli, CliFormat, Command};
pub use error::{CliError, Result};
pub use output::Formatter;
pub use record::PersonRecord;
