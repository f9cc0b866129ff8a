//! Strategy and dispatch tests

use super::observe;
use crate::error::Error;
use crate::model::{element_key, value_key, Kind, Variant, VariantStore};
use crate::policy::{MergeStrategy, Policy};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn observe_all(key: &str, samples: &[Value], store: &mut VariantStore, policy: &mut Policy) {
    for sample in samples {
        observe(key, sample, store, policy).unwrap();
    }
}

fn object_fixtures() -> [Value; 4] {
    [
        json!({"str": "string", "num": 9, "bool": true, "dynamicProp": "string"}),
        json!({"str": "AnotherString", "num": 1, "bool": false, "dynamicProp": 5, "extraProp": true}),
        json!({"str": "thirdString", "num": 1, "bool": false, "dynamicProp": true}),
        json!({"str": "obj4", "num": 12, "bool": false, "dynamicProp": "val"}),
    ]
}

// ============================================================================
// Basic strategy
// ============================================================================

#[test]
fn test_basic_sample_stored_once() {
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    observe_all("K", &[json!("hello"), json!("world")], &mut store, &mut policy);

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    assert!(matches!(&model[0], Variant::Basic(b) if b.kind == Kind::String));
}

#[test]
fn test_basic_kind_overwrite() {
    // A changing kind replaces the stored model rather than unioning
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    observe_all("K", &[json!("hello"), json!(9)], &mut store, &mut policy);

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    assert!(matches!(&model[0], Variant::Basic(b) if b.kind == Kind::Number));
}

// ============================================================================
// Union strategy
// ============================================================================

#[test]
fn test_union_same_shape_unions_field_types() {
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    observe_all(
        "K",
        &[json!({"d": "s"}), json!({"d": true})],
        &mut store,
        &mut policy,
    );

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    let object = model[0].as_object().unwrap();
    assert_eq!(object.fields["d"].len(), 2);
}

#[test]
fn test_union_distinct_shapes_accumulate() {
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    observe_all(
        "K",
        &[json!({"a": "a"}), json!({"b": "b"}), json!({"c": "c"})],
        &mut store,
        &mut policy,
    );
    assert_eq!(store.model("K").len(), 3);
}

#[test]
fn test_union_cardinality_bound_promotes_to_record() {
    let mut store = VariantStore::new();
    let mut policy = Policy::new().with_record_conversion_threshold(3);
    observe_all(
        "K",
        &[json!({"a": "a"}), json!({"b": "b"}), json!({"c": "c"})],
        &mut store,
        &mut policy,
    );
    assert_eq!(store.model("K").len(), 3);

    // The observation that would exceed the threshold collapses the key
    observe("K", &json!({"d": "d"}), &mut store, &mut policy).unwrap();

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    let record = model[0].as_record().unwrap();
    assert_eq!(record.values.len(), 1);
    assert!(matches!(&record.values[0], Variant::Basic(b) if b.kind == Kind::String));
    assert_eq!(record.values[0].name(), value_key("K"));
}

#[test]
fn test_union_promotion_rewrites_policy_hint() {
    let mut store = VariantStore::new();
    let mut policy = Policy::new().with_record_conversion_threshold(1);
    observe_all("K", &[json!({"a": "a"}), json!({"b": "b"})], &mut store, &mut policy);

    assert_eq!(policy.strategy_for("K"), MergeStrategy::Record);
    assert_eq!(store.model("K").len(), 1);
    assert!(store.model("K")[0].is_record());
}

#[test]
fn test_union_idempotent() {
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    let sample = json!({"a": "a", "nested": {"x": [1, 2]}});

    observe("K", &sample, &mut store, &mut policy).unwrap();
    let first = store.model("K").to_vec();

    observe("K", &sample, &mut store, &mut policy).unwrap();
    assert_eq!(store.model("K"), first.as_slice());
}

// ============================================================================
// Optional strategy
// ============================================================================

fn optional_policy(diff_threshold: usize) -> Policy {
    Policy::new()
        .with_default_object_strategy(MergeStrategy::Optional)
        .with_object_diff_threshold(diff_threshold)
}

#[test]
fn test_optional_merge_marks_extra_fields_optional() {
    let mut store = VariantStore::new();
    let mut policy = optional_policy(2);
    observe_all(
        "K",
        &[json!({"a": "a", "b": "b", "c": "c"}), json!({"a": "a", "b": "b"})],
        &mut store,
        &mut policy,
    );

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    let object = model[0].as_object().unwrap();
    assert!(object.is_optional("c"));
    assert!(!object.is_optional("a"));
}

#[test]
fn test_optional_merge_adopts_missing_fields_as_optional() {
    let mut store = VariantStore::new();
    let mut policy = optional_policy(3);
    observe_all(
        "K",
        &[
            json!({"a": "a", "b": "b", "c": "c"}),
            json!({"a": "a", "b": "b"}),
            json!({"a": "a", "b": "b", "d": 9}),
        ],
        &mut store,
        &mut policy,
    );

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    let object = model[0].as_object().unwrap();
    assert_eq!(object.fields.len(), 4);
    assert!(object.is_optional("c"));
    assert!(object.is_optional("d"));
    assert!(!object.is_optional("a"));
    assert!(!object.is_optional("b"));
}

#[test]
fn test_optional_unions_unmatched_field_types() {
    let mut store = VariantStore::new();
    let mut policy = optional_policy(2);
    observe_all("K", &[json!({"x": "s"}), json!({"x": 9})], &mut store, &mut policy);

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    let object = model[0].as_object().unwrap();
    assert_eq!(object.fields["x"].len(), 2);
    assert!(object.optional_fields.is_empty());
}

#[test]
fn test_optional_threshold_keeps_shapes_separate() {
    // Each pairwise diff is too large to merge
    let mut store = VariantStore::new();
    let mut policy = optional_policy(2).with_record_conversion_threshold(3);
    observe_all(
        "K",
        &[
            json!({"a": "a", "b": "b", "c": "c"}),
            json!({"b": 9}),
            json!({"c": false}),
        ],
        &mut store,
        &mut policy,
    );
    assert_eq!(store.model("K").len(), 3);

    // Any further distinct shape exceeds the cardinality bound
    observe("K", &json!({"d": 1}), &mut store, &mut policy).unwrap();
    let model = store.model("K");
    assert_eq!(model.len(), 1);
    let record = model[0].as_record().unwrap();
    assert_eq!(record.values.len(), 3);
}

#[test]
fn test_optional_exact_match_is_noop() {
    let mut store = VariantStore::new();
    let mut policy = optional_policy(2);
    let sample = json!({"a": "a", "b": 1});

    observe("K", &sample, &mut store, &mut policy).unwrap();
    let first = store.model("K").to_vec();
    observe("K", &sample, &mut store, &mut policy).unwrap();
    assert_eq!(store.model("K"), first.as_slice());
}

#[test]
fn test_optional_without_diff_threshold_fails() {
    let mut store = VariantStore::new();
    let mut policy = Policy::new().with_default_object_strategy(MergeStrategy::Optional);
    let err = observe("K", &json!({"a": 1}), &mut store, &mut policy).unwrap_err();
    assert!(matches!(err, Error::Policy { .. }));
}

// ============================================================================
// Array strategy
// ============================================================================

#[test]
fn test_array_element_accumulation() {
    let [o1, o2, o3, o4] = object_fixtures();
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    observe_all(
        "K",
        &[json!([o1, o2]), json!([o3, o4])],
        &mut store,
        &mut policy,
    );

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    let array = model[0].as_array().unwrap();
    assert_eq!(array.elements.len(), 2);
    assert_eq!(store.model(&element_key("K")).len(), 2);
}

#[test]
fn test_array_idempotent() {
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    let sample = json!([{"x": 1}, {"y": "s"}]);

    observe("K", &sample, &mut store, &mut policy).unwrap();
    let first = store.model("K").to_vec();
    observe("K", &sample, &mut store, &mut policy).unwrap();
    assert_eq!(store.model("K"), first.as_slice());
}

#[test]
fn test_array_of_mixed_primitives() {
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    observe("K", &json!([1, "a", true]), &mut store, &mut policy).unwrap();

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    // Basic kinds overwrite each other under one element key, so only the
    // last observed primitive kind survives
    let array = model[0].as_array().unwrap();
    assert_eq!(array.elements.len(), 1);
    assert!(matches!(&array.elements[0], Variant::Basic(b) if b.kind == Kind::Boolean));
}

#[test]
fn test_empty_array() {
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    observe("K", &json!([]), &mut store, &mut policy).unwrap();

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    assert!(model[0].as_array().unwrap().elements.is_empty());
}

// ============================================================================
// Record strategy
// ============================================================================

#[test]
fn test_record_stability_after_promotion() {
    let mut store = VariantStore::new();
    let mut policy = Policy::new().with_record_conversion_threshold(1);
    observe_all(
        "K",
        &[json!({"a": "a"}), json!({"b": "b"}), json!({"c": 3})],
        &mut store,
        &mut policy,
    );

    let model = store.model("K");
    assert_eq!(model.len(), 1);
    let record = model[0].as_record().unwrap();
    // string from the pre-promotion shape, number folded in afterwards
    assert_eq!(record.values.len(), 2);
    assert!(model.iter().all(|m| m.as_object().is_none()));
}

#[test]
fn test_record_hint_from_the_start() {
    let mut store = VariantStore::new();
    let mut policy = Policy::new().with_strategy_hint("K", MergeStrategy::Record);

    // The first observation builds the record from stored shapes, of which
    // there are none yet; the candidate's own values enter on the next one
    observe("K", &json!({"a": "a"}), &mut store, &mut policy).unwrap();
    let model = store.model("K");
    assert_eq!(model.len(), 1);
    assert!(model[0].as_record().unwrap().values.is_empty());

    observe("K", &json!({"b": 9}), &mut store, &mut policy).unwrap();
    let model = store.model("K");
    let record = model[0].as_record().unwrap();
    assert_eq!(record.values.len(), 1);
    assert!(matches!(&record.values[0], Variant::Basic(b) if b.kind == Kind::Number));
}

#[test]
fn test_record_fold_deduplicates_values() {
    let mut store = VariantStore::new();
    let mut policy = Policy::new().with_strategy_hint("K", MergeStrategy::Record);
    observe_all(
        "K",
        &[
            json!({"a": "a"}),
            json!({"b": "b", "c": "c"}),
            json!({"d": "d", "e": 1}),
        ],
        &mut store,
        &mut policy,
    );

    let record = store.model("K")[0].as_record().unwrap().clone();
    assert_eq!(record.values.len(), 2);
}

// ============================================================================
// Dispatch and recursion
// ============================================================================

#[test]
fn test_nested_object_child_names() {
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    observe("K", &json!({"user": {"id": 1}}), &mut store, &mut policy).unwrap();

    let object = store.model("K")[0].as_object().unwrap().clone();
    let user = object.fields["user"][0].as_object().unwrap().clone();
    assert_eq!(user.name, "K.user");
    assert_eq!(user.fields["id"][0].name(), "K.user.id");
}

#[test]
fn test_max_depth_exceeded() {
    let mut store = VariantStore::new();
    let mut policy = Policy::new().with_max_depth(3);
    let sample = json!({"a": {"a": {"a": {"a": {"a": 1}}}}});

    let err = observe("K", &sample, &mut store, &mut policy).unwrap_err();
    assert!(matches!(err, Error::MaxDepthExceeded { limit: 3, .. }));
}

#[test]
fn test_observe_returns_updated_list() {
    let mut store = VariantStore::new();
    let mut policy = Policy::default();
    let returned = observe("K", &json!({"a": 1}), &mut store, &mut policy)
        .unwrap()
        .len();
    assert_eq!(returned, 1);
}
