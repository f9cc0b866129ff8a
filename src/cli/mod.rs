//! CLI module
//!
//! Command-line interface for running inference sessions over sample files.
//!
//! # Commands
//!
//! - `infer` - Infer a type declaration from sample files
//! - `model` - Print the merged variant model as JSON

mod commands;
mod runner;

pub use commands::{Cli, Commands, InferArgs};
pub use runner::Runner;
