//! Merge strategies
//!
//! Each strategy reconciles a freshly built candidate against the stored list
//! for its key. All mutation of stored variants happens here, through `&mut`
//! borrows scoped to one path key.

use super::{dispatch_object, observe_at};
use crate::compare::{compare, compare_object, object_compare};
use crate::error::Result;
use crate::model::{
    element_key, value_key, ArrayVariant, BasicVariant, Kind, ObjectVariant, RecordVariant,
    Variant, VariantStore,
};
use crate::policy::{MergeStrategy, Policy};
use serde_json::Value;
use tracing::{debug, trace};

/// Basic kinds never accumulate: a differing kind replaces the stored list
pub(crate) fn basic_strategy(key: &str, kind: Kind, store: &mut VariantStore) {
    let candidate = Variant::Basic(BasicVariant::new(key, kind));
    let stored = store.model_mut(key);
    if stored.iter().any(|m| compare(&candidate, m).exact_match) {
        return;
    }
    if !stored.is_empty() {
        debug!("basic kind changed for '{}', replacing stored model with {}", key, kind);
    }
    *stored = vec![candidate];
}

/// Arrays store a single variant whose elements are whatever has accumulated
/// under the derived element key
pub(crate) fn array_strategy(
    key: &str,
    items: &[Value],
    candidate: ArrayVariant,
    store: &mut VariantStore,
    policy: &mut Policy,
    depth: usize,
) -> Result<()> {
    let candidate = Variant::Array(candidate);
    if store
        .model(key)
        .iter()
        .any(|m| compare(&candidate, m).exact_match)
    {
        return Ok(());
    }
    let elem_key = element_key(key);
    for item in items {
        observe_at(&elem_key, item, store, policy, depth + 1)?;
    }
    let elements = store.model(&elem_key).to_vec();
    store.replace(key, vec![Variant::Array(ArrayVariant::new(key, elements))]);
    Ok(())
}

/// Keep distinct shapes as separate variants; same-shape observations union
/// their field types in place
pub(crate) fn union_strategy(
    key: &str,
    candidate: ObjectVariant,
    store: &mut VariantStore,
    policy: &mut Policy,
    depth: usize,
) -> Result<()> {
    if store.model(key).is_empty() {
        store.model_mut(key).push(Variant::Object(candidate));
        return Ok(());
    }

    let same_shape = store
        .model(key)
        .iter()
        .position(|m| m.as_object().is_some_and(|o| o.shallow_same_shape(&candidate)));

    match same_shape {
        Some(index) => {
            let field_names: Vec<String> = candidate.fields.keys().cloned().collect();
            if let Some(Variant::Object(target)) = store.model_mut(key).get_mut(index) {
                expand_object_fields(&field_names, &candidate, target);
            }
            Ok(())
        }
        None => append_or_promote(key, candidate, store, policy, depth),
    }
}

/// Merge near-identical shapes into one variant, marking non-common fields
/// optional; shapes past the diff threshold stay separate
pub(crate) fn optional_strategy(
    key: &str,
    candidate: ObjectVariant,
    store: &mut VariantStore,
    policy: &mut Policy,
    diff_threshold: usize,
    depth: usize,
) -> Result<()> {
    let mut best: Option<(usize, usize)> = None;
    for (index, stored) in store.model(key).iter().enumerate() {
        let result = compare_object(&candidate, stored);
        if result.exact_match {
            return Ok(());
        }
        if result.compatible && best.map_or(true, |(_, diff)| result.diff < diff) {
            best = Some((index, result.diff));
        }
    }

    let Some((best_index, best_diff)) = best else {
        store.model_mut(key).push(Variant::Object(candidate));
        return Ok(());
    };

    if best_diff >= diff_threshold {
        return append_or_promote(key, candidate, store, policy, depth);
    }

    match store.model_mut(key).get_mut(best_index) {
        Some(Variant::Object(target)) => {
            let parts = object_compare(&candidate, &*target);
            trace!(
                "widening '{}': {} missing, {} unmatched, {} extra",
                key,
                parts.missing.len(),
                parts.unmatched.len(),
                parts.extra.len()
            );
            for field in &parts.missing {
                if let Some(variants) = candidate.fields.get(field) {
                    target.fields.insert(field.clone(), variants.clone());
                    target.mark_optional(field);
                }
            }
            for field in &parts.extra {
                target.mark_optional(field);
            }
            expand_object_fields(&parts.unmatched, &candidate, target);
        }
        Some(Variant::Record(record)) => {
            // A promoted store driven by a non-promoted policy: widen the
            // record instead of resurrecting an object shape
            fold_object_into_values(key, &candidate, &mut record.values);
        }
        _ => {}
    }
    Ok(())
}

/// Fold the candidate into an existing record, or build the record by
/// collapsing every stored object shape
pub(crate) fn record_strategy(key: &str, candidate: ObjectVariant, store: &mut VariantStore) {
    let stored = store.model_mut(key);
    for entry in stored.iter_mut() {
        if let Variant::Record(record) = entry {
            fold_object_into_values(key, &candidate, &mut record.values);
            return;
        }
    }

    // First promotion for this key: every stored object shape collapses into
    // one string-keyed record; non-object variants ride along unchanged
    let entries = std::mem::take(stored);
    let mut values = Vec::new();
    let mut others = Vec::new();
    for entry in entries {
        match entry {
            Variant::Object(object) => fold_object_into_values(key, &object, &mut values),
            other => others.push(other),
        }
    }
    stored.push(Variant::Record(RecordVariant::new(key, values)));
    stored.extend(others);
}

/// Append a genuinely new shape, or flip the key to the record strategy and
/// run the observation back through the dispatcher
fn append_or_promote(
    key: &str,
    candidate: ObjectVariant,
    store: &mut VariantStore,
    policy: &mut Policy,
    depth: usize,
) -> Result<()> {
    if store.model(key).len() < policy.record_conversion_threshold {
        store.model_mut(key).push(Variant::Object(candidate));
        return Ok(());
    }
    debug!(
        "promoting '{}' to a record after {} stored variants",
        key,
        store.model(key).len()
    );
    policy
        .strategy_hints
        .insert(key.to_string(), MergeStrategy::Record);
    dispatch_object(key, candidate, store, policy, depth)
}

/// List-union `src`'s variants for each named field into `dst`'s lists,
/// appending only entries without an exact match
fn expand_object_fields(fields: &[String], src: &ObjectVariant, dst: &mut ObjectVariant) {
    for field in fields {
        let Some(src_variants) = src.fields.get(field) else {
            continue;
        };
        let Some(dst_variants) = dst.fields.get_mut(field) else {
            continue;
        };
        for variant in src_variants {
            if !dst_variants
                .iter()
                .any(|existing| compare(variant, existing).exact_match)
            {
                dst_variants.push(variant.clone());
            }
        }
    }
}

/// Flatten every field variant of `object` into `values`, deduplicated by
/// exact match; field names are dropped and folded variants take the record's
/// value key as their name
fn fold_object_into_values(key: &str, object: &ObjectVariant, values: &mut Vec<Variant>) {
    for field_variants in object.fields.values() {
        for variant in field_variants {
            if values
                .iter()
                .any(|existing| compare(variant, existing).exact_match)
            {
                continue;
            }
            let mut folded = variant.clone();
            folded.set_name(value_key(key));
            values.push(folded);
        }
    }
}
