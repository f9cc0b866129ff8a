//! Variant store
//!
//! The arena holding every stored variant list, addressed by path key. The
//! store exclusively owns its variant nodes; strategies mutate them through
//! `&mut` borrows scoped to one key, so no aliased references exist. Entries
//! are created on first observation and never deleted.

use super::types::Variant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from path keys to stored variant lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantStore {
    models: BTreeMap<String, Vec<Variant>>,
}

impl VariantStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the entry for `key` if it does not exist yet
    pub(crate) fn ensure(&mut self, key: &str) {
        if !self.models.contains_key(key) {
            self.models.insert(key.to_string(), Vec::new());
        }
    }

    /// Read the fully merged model for `key`; empty if never observed
    pub fn model(&self, key: &str) -> &[Variant] {
        self.models.get(key).map_or(&[], Vec::as_slice)
    }

    /// Whether `key` has ever been observed
    pub fn contains(&self, key: &str) -> bool {
        self.models.contains_key(key)
    }

    /// All observed path keys, in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Number of observed path keys
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether nothing has been observed
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub(crate) fn model_mut(&mut self, key: &str) -> &mut Vec<Variant> {
        self.models.entry(key.to_string()).or_default()
    }

    pub(crate) fn replace(&mut self, key: &str, variants: Vec<Variant>) {
        self.models.insert(key.to_string(), variants);
    }
}
