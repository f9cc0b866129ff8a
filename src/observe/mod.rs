//! Observation pipeline
//!
//! One sample enters under a path key: the builder constructs a brand-new
//! candidate variant (recursing into nested fields and elements under derived
//! child keys), the dispatcher selects a merge strategy for the key, and the
//! strategy reconciles the candidate with the stored list — discarding it on
//! an exact match, appending it, merging it into an existing entry, or
//! promoting the key to a generic record.

mod builder;
mod strategies;

use crate::error::{Error, Result};
use crate::model::{classify, ObjectVariant, ValueKind, Variant, VariantStore};
use crate::policy::{MergeStrategy, Policy};
use serde_json::Value;

/// Ingest one sample under `key`, returning the updated stored list
///
/// Mutates `store` in place; `policy` is mutable because record promotion
/// rewrites its strategy hints for the rest of the session.
pub fn observe<'a>(
    key: &str,
    sample: &Value,
    store: &'a mut VariantStore,
    policy: &mut Policy,
) -> Result<&'a [Variant]> {
    observe_at(key, sample, store, policy, 0)?;
    Ok(store.model(key))
}

/// Depth-tracked recursive entry used by the strategies and the builder
pub(crate) fn observe_at(
    key: &str,
    sample: &Value,
    store: &mut VariantStore,
    policy: &mut Policy,
    depth: usize,
) -> Result<()> {
    if depth > policy.max_depth {
        return Err(Error::max_depth(key, policy.max_depth));
    }
    store.ensure(key);
    match classify(sample) {
        ValueKind::Basic(kind) => {
            strategies::basic_strategy(key, kind, store);
            Ok(())
        }
        ValueKind::Array(items) => {
            let candidate = builder::build_array(key, items, depth, policy.max_depth)?;
            strategies::array_strategy(key, items, candidate, store, policy, depth)
        }
        ValueKind::Object(entries) => {
            let candidate = builder::build_object(key, entries, depth, policy.max_depth)?;
            dispatch_object(key, candidate, store, policy, depth)
        }
    }
}

/// Object-strategy dispatch; promotion re-enters here with an updated hint
pub(crate) fn dispatch_object(
    key: &str,
    candidate: ObjectVariant,
    store: &mut VariantStore,
    policy: &mut Policy,
    depth: usize,
) -> Result<()> {
    debug_assert!(
        candidate.fields.values().all(|list| !list.is_empty()),
        "object candidate with an empty field variant list"
    );
    match policy.strategy_for(key) {
        MergeStrategy::Union => strategies::union_strategy(key, candidate, store, policy, depth),
        MergeStrategy::Optional => {
            let diff_threshold = policy.object_diff_threshold.ok_or_else(|| {
                Error::policy("the optional strategy requires object_diff_threshold")
            })?;
            strategies::optional_strategy(key, candidate, store, policy, diff_threshold, depth)
        }
        MergeStrategy::Record => {
            strategies::record_strategy(key, candidate, store);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
