//! Model and store tests

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

#[test_case(json!(null), Kind::Null; "null sample")]
#[test_case(json!(true), Kind::Boolean; "boolean sample")]
#[test_case(json!(9), Kind::Number; "integer sample")]
#[test_case(json!(1.5), Kind::Number; "float sample")]
#[test_case(json!("hi"), Kind::String; "string sample")]
fn test_classify_basic(value: serde_json::Value, expected: Kind) {
    assert_eq!(classify(&value), ValueKind::Basic(expected));
}

#[test]
fn test_classify_compound() {
    let array = json!([1, 2]);
    assert!(matches!(classify(&array), ValueKind::Array(items) if items.len() == 2));

    let object = json!({"a": 1});
    assert!(matches!(classify(&object), ValueKind::Object(entries) if entries.len() == 1));
}

#[test]
fn test_path_keys() {
    assert_eq!(field_key("Root", "user"), "Root.user");
    assert_eq!(element_key("Root.items"), "Root.items[]");
    assert_eq!(value_key("Root.meta"), "Root.meta<>");
}

#[test]
fn test_kind_display() {
    assert_eq!(Kind::Null.to_string(), "null");
    assert_eq!(Kind::Boolean.to_string(), "boolean");
    assert_eq!(Kind::Number.to_string(), "number");
    assert_eq!(Kind::String.to_string(), "string");
}

#[test]
fn test_variant_name_accessors() {
    let basic = Variant::Basic(BasicVariant::new("Root.id", Kind::Number));
    assert_eq!(basic.name(), "Root.id");
    assert!(basic.as_object().is_none());

    let object = Variant::Object(ObjectVariant::new("Root"));
    assert_eq!(object.name(), "Root");
    assert!(object.as_object().is_some());
    assert!(!object.is_record());

    let record = Variant::Record(RecordVariant::new("Root", Vec::new()));
    assert!(record.is_record());
    assert!(record.as_record().is_some());
}

#[test]
fn test_shallow_same_shape() {
    let mut a = ObjectVariant::new("a");
    a.fields.insert(
        "x".to_string(),
        vec![Variant::Basic(BasicVariant::new("a.x", Kind::String))],
    );
    a.fields.insert(
        "y".to_string(),
        vec![Variant::Basic(BasicVariant::new("a.y", Kind::Number))],
    );

    // Same field names, different field types
    let mut b = ObjectVariant::new("b");
    b.fields.insert(
        "x".to_string(),
        vec![Variant::Basic(BasicVariant::new("b.x", Kind::Boolean))],
    );
    b.fields.insert(
        "y".to_string(),
        vec![Variant::Basic(BasicVariant::new("b.y", Kind::String))],
    );
    assert!(a.shallow_same_shape(&b));

    let mut c = ObjectVariant::new("c");
    c.fields.insert(
        "x".to_string(),
        vec![Variant::Basic(BasicVariant::new("c.x", Kind::String))],
    );
    assert!(!a.shallow_same_shape(&c));
}

#[test]
fn test_optional_fields() {
    let mut object = ObjectVariant::new("Root");
    object.fields.insert(
        "maybe".to_string(),
        vec![Variant::Basic(BasicVariant::new("Root.maybe", Kind::String))],
    );
    assert!(!object.is_optional("maybe"));
    object.mark_optional("maybe");
    assert!(object.is_optional("maybe"));
}

#[test]
fn test_store_model_and_replace() {
    let mut store = VariantStore::new();
    assert!(store.is_empty());
    assert!(store.model("Root").is_empty());

    store.ensure("Root");
    assert!(store.contains("Root"));
    assert_eq!(store.len(), 1);

    store
        .model_mut("Root")
        .push(Variant::Basic(BasicVariant::new("Root", Kind::String)));
    assert_eq!(store.model("Root").len(), 1);

    store.replace(
        "Root",
        vec![Variant::Basic(BasicVariant::new("Root", Kind::Number))],
    );
    assert_eq!(store.model("Root").len(), 1);
    assert_eq!(
        store.model("Root")[0],
        Variant::Basic(BasicVariant::new("Root", Kind::Number))
    );
}

#[test]
fn test_variant_serde_tag() {
    let variant = Variant::Basic(BasicVariant::new("Root", Kind::String));
    let value = serde_json::to_value(&variant).unwrap();
    assert_eq!(value["type"], "basic");
    assert_eq!(value["kind"], "string");

    let back: Variant = serde_json::from_value(value).unwrap();
    assert_eq!(back, variant);
}
