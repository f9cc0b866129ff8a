//! Command execution

use super::commands::{Cli, Commands, InferArgs};
use crate::error::{Error, Result, ResultExt};
use crate::generator::TypeGenerator;
use crate::policy::{MergeStrategy, Policy};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Executes parsed CLI commands
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for a parsed command line
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer { input } => self.run_infer(input),
            Commands::Model { input, full } => self.run_model(input, *full),
        }
    }

    fn run_infer(&self, input: &InferArgs) -> Result<()> {
        let generator = self.build_session(input)?;
        println!("{}", generator.suggest()?);
        Ok(())
    }

    fn run_model(&self, input: &InferArgs, full: bool) -> Result<()> {
        let generator = self.build_session(input)?;
        let output = if full {
            serde_json::to_string_pretty(generator.store())?
        } else {
            serde_json::to_string_pretty(generator.model())?
        };
        println!("{output}");
        Ok(())
    }

    fn build_session(&self, input: &InferArgs) -> Result<TypeGenerator> {
        let policy = self.build_policy(input)?;
        let mut generator = TypeGenerator::with_policy(&input.name, policy)?;
        let mut observed = 0usize;
        for path in &input.inputs {
            for sample in read_samples(path, input.each)? {
                generator.observe(&sample)?;
                observed += 1;
            }
        }
        debug!(
            "observed {} samples across {} inputs",
            observed,
            input.inputs.len()
        );
        Ok(generator)
    }

    fn build_policy(&self, input: &InferArgs) -> Result<Policy> {
        let mut policy = match &self.cli.policy {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading policy file {}", path.display()))?;
                serde_yaml::from_str(&raw)?
            }
            None => Policy::default(),
        };
        if let Some(strategy) = input.strategy {
            policy.default_object_strategy = strategy;
        }
        if let Some(threshold) = input.record_threshold {
            policy.record_conversion_threshold = threshold;
        }
        if let Some(threshold) = input.diff_threshold {
            policy.object_diff_threshold = Some(threshold);
        }
        for hint in &input.hints {
            let (key, strategy) = parse_hint(hint)?;
            policy.strategy_hints.insert(key, strategy);
        }
        Ok(policy)
    }
}

/// Parse a `key=strategy` hint flag
fn parse_hint(raw: &str) -> Result<(String, MergeStrategy)> {
    let Some((key, strategy)) = raw.split_once('=') else {
        return Err(Error::policy(format!(
            "invalid hint '{raw}', expected key=strategy"
        )));
    };
    Ok((key.to_string(), strategy.parse()?))
}

/// Read samples from a JSON or NDJSON file; `-` reads stdin
fn read_samples(path: &Path, each: bool) -> Result<Vec<Value>> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading samples from {}", path.display()))?
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) if each => Ok(items),
        Ok(value) => Ok(vec![value]),
        // Not a single document: treat each non-empty line as one sample
        Err(_) => trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect(),
    }
}
