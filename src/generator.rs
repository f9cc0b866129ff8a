//! Inference session orchestration
//!
//! `TypeGenerator` is the thin entry point over the observe pipeline: it owns
//! a root type name, the variant store, and the session policy, and renders
//! the suggested declaration once samples have been observed.

use crate::error::{Error, Result};
use crate::model::{Variant, VariantStore};
use crate::observe::observe;
use crate::policy::Policy;
use crate::render::render_declaration;
use serde_json::Value;

/// One inference session
#[derive(Debug, Clone)]
pub struct TypeGenerator {
    type_name: String,
    store: VariantStore,
    policy: Policy,
}

impl TypeGenerator {
    /// Create a session with the default policy
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            store: VariantStore::new(),
            policy: Policy::default(),
        }
    }

    /// Create a session with an explicit policy, validated up front
    pub fn with_policy(type_name: impl Into<String>, policy: Policy) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            type_name: type_name.into(),
            store: VariantStore::new(),
            policy,
        })
    }

    /// Ingest one sample under the root key
    pub fn observe(&mut self, sample: &Value) -> Result<()> {
        observe(&self.type_name, sample, &mut self.store, &mut self.policy)?;
        Ok(())
    }

    /// The fully merged model for the root key
    pub fn model(&self) -> &[Variant] {
        self.store.model(&self.type_name)
    }

    /// The full store, including child path keys
    pub fn store(&self) -> &VariantStore {
        &self.store
    }

    /// The session policy, promotion hints included
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The root type name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Render the suggested declaration for everything observed so far
    pub fn suggest(&self) -> Result<String> {
        let model = self.model();
        if model.is_empty() {
            return Err(Error::empty_model(&self.type_name));
        }
        Ok(render_declaration(&self.type_name, model))
    }
}
