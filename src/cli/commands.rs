//! CLI commands and argument parsing

use crate::policy::MergeStrategy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// typeforge CLI
#[derive(Parser, Debug)]
#[command(name = "typeforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Policy file (YAML); flags override its fields
    #[arg(short, long, global = true)]
    pub policy: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer a type declaration from sample files
    Infer {
        #[command(flatten)]
        input: InferArgs,
    },

    /// Print the merged variant model as JSON
    Model {
        #[command(flatten)]
        input: InferArgs,

        /// Dump every path key, not just the root model
        #[arg(long)]
        full: bool,
    },
}

/// Shared ingestion arguments
#[derive(Args, Debug)]
pub struct InferArgs {
    /// Sample files (JSON or NDJSON), or `-` for stdin
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Root type name
    #[arg(short, long, default_value = "Root")]
    pub name: String,

    /// Default object merge strategy
    #[arg(short, long)]
    pub strategy: Option<MergeStrategy>,

    /// Per-key strategy override (repeatable)
    #[arg(long = "hint", value_name = "KEY=STRATEGY")]
    pub hints: Vec<String>,

    /// Max distinct object variants before record promotion
    #[arg(long)]
    pub record_threshold: Option<usize>,

    /// Max object diff for an optional-strategy merge
    #[arg(long)]
    pub diff_threshold: Option<usize>,

    /// Treat a top-level JSON array as a stream of samples
    #[arg(long)]
    pub each: bool,
}
