//! Candidate construction
//!
//! Builds a brand-new candidate variant for one sample, deriving child path
//! keys for nested fields and elements. The session merge policy is never
//! consulted here: array elements are pre-merged in a scratch store under the
//! default union policy, so a candidate can be compared against the stored
//! model before any real mutation happens.

use super::observe_at;
use crate::error::{Error, Result};
use crate::model::{
    classify, element_key, field_key, ArrayVariant, BasicVariant, ObjectVariant, ValueKind,
    Variant, VariantStore,
};
use crate::policy::Policy;
use serde_json::{Map, Value};

/// Build a candidate variant for any sample
pub(crate) fn build_variant(
    key: &str,
    sample: &Value,
    depth: usize,
    max_depth: usize,
) -> Result<Variant> {
    if depth > max_depth {
        return Err(Error::max_depth(key, max_depth));
    }
    match classify(sample) {
        ValueKind::Basic(kind) => Ok(Variant::Basic(BasicVariant::new(key, kind))),
        ValueKind::Array(items) => Ok(Variant::Array(build_array(key, items, depth, max_depth)?)),
        ValueKind::Object(entries) => {
            Ok(Variant::Object(build_object(key, entries, depth, max_depth)?))
        }
    }
}

/// Build an Object candidate; each field starts as a single-variant list
pub(crate) fn build_object(
    key: &str,
    entries: &Map<String, Value>,
    depth: usize,
    max_depth: usize,
) -> Result<ObjectVariant> {
    let mut object = ObjectVariant::new(key);
    for (field, value) in entries {
        let child = build_variant(&field_key(key, field), value, depth + 1, max_depth)?;
        object.fields.insert(field.clone(), vec![child]);
    }
    Ok(object)
}

/// Build an Array candidate with its element variants already merged
pub(crate) fn build_array(
    key: &str,
    items: &[Value],
    depth: usize,
    max_depth: usize,
) -> Result<ArrayVariant> {
    let mut scratch = VariantStore::new();
    let mut scratch_policy = Policy {
        max_depth,
        ..Policy::default()
    };
    let elem_key = element_key(key);
    for item in items {
        observe_at(&elem_key, item, &mut scratch, &mut scratch_policy, depth + 1)?;
    }
    Ok(ArrayVariant::new(key, scratch.model(&elem_key).to_vec()))
}
