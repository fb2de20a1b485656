//! CLI module
//!
//! Command-line interface for paginating JSON document sets.
//!
//! # Commands
//!
//! - `query` - Paginate a JSON array of documents
//! - `config` - Print the effective paginator configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
