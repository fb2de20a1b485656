//! CLI commands and argument parsing

use crate::types::Visibility;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docpage CLI
#[derive(Parser, Debug)]
#[command(name = "docpage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Paginator configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Paginate a JSON array of documents
    Query {
        /// Documents file (JSON array of objects)
        #[arg(short, long)]
        data: PathBuf,

        /// Which records are visible
        #[arg(long, value_enum, default_value = "default")]
        visibility: Visibility,

        /// Filter as inline JSON
        #[arg(long)]
        filter: Option<String>,

        /// Options as inline JSON, overridden by the flags below
        #[arg(long)]
        options: Option<String>,

        /// Offset (takes precedence over --page)
        #[arg(long, allow_negative_numbers = true)]
        offset: Option<i64>,

        /// Page number, starting at 1
        #[arg(long, allow_negative_numbers = true)]
        page: Option<i64>,

        /// Page size (0 = count only)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Sort, e.g. "-created name"
        #[arg(long)]
        sort: Option<String>,

        /// Field selection, e.g. "name email" or "-secret"
        #[arg(long)]
        select: Option<String>,

        /// Relation to expand, as PATH=FILE (repeatable)
        #[arg(long = "populate", value_name = "PATH=FILE")]
        populate: Vec<String>,

        /// Return plain records
        #[arg(long)]
        lean: bool,

        /// Do not copy the identity into `id` for lean records
        #[arg(long)]
        no_lean_id: bool,
    },

    /// Print the effective paginator configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
