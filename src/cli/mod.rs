//! CLI argument parsing for tagsel
//!
//! Global flags: --root, --config, --format, --quiet, --verbose

pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use parse::parse_output_format;
use tagsel_core::format::OutputFormat;

/// Tagsel - select tests by tag, module, class, method and file
#[derive(Parser, Debug)]
#[command(name = "tagsel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving tagsel.toml
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (human, json, records)
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (e.g. `debug` or `tagsel_core=trace`)
    #[arg(long, global = true, env = "TAGSEL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a selector expression and show its structure
    Parse {
        /// Selector expression (defaults to the configured expression)
        expression: Option<String>,

        /// Available modules, comma separated (overrides config)
        #[arg(long, value_delimiter = ',')]
        modules: Vec<String>,
    },

    /// Show the computed tags of every class in a manifest
    Tags {
        /// Path to the JSON manifest
        manifest: PathBuf,
    },

    /// Select tests from a manifest
    Select {
        /// Path to the JSON manifest
        manifest: PathBuf,

        /// Selector expression (defaults to the configured expression)
        #[arg(long, short)]
        tags: Option<String>,

        /// Available modules, comma separated (overrides config)
        #[arg(long, value_delimiter = ',')]
        modules: Vec<String>,

        /// Also list tests that were not selected
        #[arg(long)]
        all: bool,
    },
}
