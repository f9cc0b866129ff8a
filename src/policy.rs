//! Session merge policy
//!
//! The policy is mutable state scoped to one inference session: record
//! promotion rewrites `strategy_hints` mid-session, so it is passed `&mut`
//! into every observe call and discarded with the session. All fields are
//! independently overridable, and partial YAML policy files deserialize with
//! the remaining fields defaulted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default for [`Policy::record_conversion_threshold`]
pub const DEFAULT_RECORD_CONVERSION_THRESHOLD: usize = 10;

/// Default for [`Policy::max_depth`]
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How object observations for a key are reconciled with the stored model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Keep distinct shapes as separate variants; union field types when the
    /// shallow shape matches
    Union,
    /// Merge near-identical shapes into one variant with optional fields
    Optional,
    /// Collapse every shape into one generic string-keyed record
    Record,
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::Union => write!(f, "union"),
            MergeStrategy::Optional => write!(f, "optional"),
            MergeStrategy::Record => write!(f, "record"),
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "union" => Ok(Self::Union),
            "optional" => Ok(Self::Optional),
            "record" => Ok(Self::Record),
            other => Err(Error::unknown_strategy(other)),
        }
    }
}

/// Per-session inference policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Strategy applied to object keys without an explicit hint
    pub default_object_strategy: MergeStrategy,

    /// Per-key strategy overrides; record promotion writes into this map
    pub strategy_hints: BTreeMap<String, MergeStrategy>,

    /// Max distinct object variants stored for a key before record promotion
    pub record_conversion_threshold: usize,

    /// Max diff for two object variants to merge instead of staying separate.
    /// Required whenever any key may use the `optional` strategy.
    pub object_diff_threshold: Option<usize>,

    /// Recursion bound on sample nesting
    pub max_depth: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            default_object_strategy: MergeStrategy::Union,
            strategy_hints: BTreeMap::new(),
            record_conversion_threshold: DEFAULT_RECORD_CONVERSION_THRESHOLD,
            object_diff_threshold: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Policy {
    /// Create a policy with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default object strategy
    #[must_use]
    pub fn with_default_object_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.default_object_strategy = strategy;
        self
    }

    /// Add a per-key strategy override
    #[must_use]
    pub fn with_strategy_hint(mut self, key: impl Into<String>, strategy: MergeStrategy) -> Self {
        self.strategy_hints.insert(key.into(), strategy);
        self
    }

    /// Set the record conversion threshold
    #[must_use]
    pub fn with_record_conversion_threshold(mut self, threshold: usize) -> Self {
        self.record_conversion_threshold = threshold;
        self
    }

    /// Set the object diff threshold
    #[must_use]
    pub fn with_object_diff_threshold(mut self, threshold: usize) -> Self {
        self.object_diff_threshold = Some(threshold);
        self
    }

    /// Set the recursion bound
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Resolve the strategy for an object observed under `key`
    pub fn strategy_for(&self, key: &str) -> MergeStrategy {
        self.strategy_hints
            .get(key)
            .copied()
            .unwrap_or(self.default_object_strategy)
    }

    /// Whether any key may dispatch to the optional strategy
    fn uses_optional(&self) -> bool {
        self.default_object_strategy == MergeStrategy::Optional
            || self
                .strategy_hints
                .values()
                .any(|s| *s == MergeStrategy::Optional)
    }

    /// Reject invalid configurations before any observation runs
    pub fn validate(&self) -> Result<()> {
        if self.record_conversion_threshold == 0 {
            return Err(Error::policy("record_conversion_threshold must be at least 1"));
        }
        if self.max_depth == 0 {
            return Err(Error::policy("max_depth must be at least 1"));
        }
        if self.object_diff_threshold == Some(0) {
            return Err(Error::policy("object_diff_threshold must be at least 1"));
        }
        if self.uses_optional() && self.object_diff_threshold.is_none() {
            return Err(Error::policy(
                "the optional strategy requires object_diff_threshold",
            ));
        }
        Ok(())
    }
}
