//! Variant types and path keys
//!
//! A model is an ordered list of candidate variants per path key. Path keys
//! are the sole addressing mechanism: the root type name, `parent.field` for
//! object fields, `parent[]` for array elements, and `parent<>` for the
//! values of a generic record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ============================================================================
// Kind classification
// ============================================================================

/// Basic runtime kind of a sampled JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Null => write!(f, "null"),
            Kind::Boolean => write!(f, "boolean"),
            Kind::Number => write!(f, "number"),
            Kind::String => write!(f, "string"),
        }
    }
}

/// Top-level classification of one sample: a basic kind or a compound value
/// carrying its payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind<'a> {
    /// A primitive value
    Basic(Kind),
    /// An array and its items
    Array(&'a [Value]),
    /// An object and its entries
    Object(&'a Map<String, Value>),
}

/// Classify one runtime sample
pub fn classify(value: &Value) -> ValueKind<'_> {
    match value {
        Value::Null => ValueKind::Basic(Kind::Null),
        Value::Bool(_) => ValueKind::Basic(Kind::Boolean),
        Value::Number(_) => ValueKind::Basic(Kind::Number),
        Value::String(_) => ValueKind::Basic(Kind::String),
        Value::Array(items) => ValueKind::Array(items),
        Value::Object(entries) => ValueKind::Object(entries),
    }
}

// ============================================================================
// Path keys
// ============================================================================

/// Path key for a field of an object observed under `parent`
pub fn field_key(parent: &str, field: &str) -> String {
    format!("{parent}.{field}")
}

/// Path key for the elements of an array observed under `parent`
pub fn element_key(parent: &str) -> String {
    format!("{parent}[]")
}

/// Path key for the values of a record stored under `parent`
pub fn value_key(parent: &str) -> String {
    format!("{parent}<>")
}

// ============================================================================
// Variants
// ============================================================================

/// One candidate structural type for a path key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Variant {
    /// A primitive kind
    Basic(BasicVariant),
    /// A concrete object shape
    Object(ObjectVariant),
    /// An array over the variants accumulated for its element key
    Array(ArrayVariant),
    /// A generic string-keyed map, produced by promotion
    Record(RecordVariant),
}

/// A primitive candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicVariant {
    pub name: String,
    pub kind: Kind,
}

/// A concrete object shape; each field admits a list of variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectVariant {
    pub name: String,
    pub fields: BTreeMap<String, Vec<Variant>>,
    /// Always a subset of `fields`' key set
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub optional_fields: BTreeSet<String>,
}

/// An array candidate; `elements` mirrors the stored list for `name[]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayVariant {
    pub name: String,
    pub elements: Vec<Variant>,
}

/// A generic string-keyed map; `values` unions every value shape seen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordVariant {
    pub name: String,
    pub values: Vec<Variant>,
}

impl Variant {
    /// Path-key name of this variant
    pub fn name(&self) -> &str {
        match self {
            Variant::Basic(v) => &v.name,
            Variant::Object(v) => &v.name,
            Variant::Array(v) => &v.name,
            Variant::Record(v) => &v.name,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        match self {
            Variant::Basic(v) => v.name = name,
            Variant::Object(v) => v.name = name,
            Variant::Array(v) => v.name = name,
            Variant::Record(v) => v.name = name,
        }
    }

    /// View as an object variant
    pub fn as_object(&self) -> Option<&ObjectVariant> {
        match self {
            Variant::Object(o) => Some(o),
            _ => None,
        }
    }

    /// View as an array variant
    pub fn as_array(&self) -> Option<&ArrayVariant> {
        match self {
            Variant::Array(a) => Some(a),
            _ => None,
        }
    }

    /// View as a record variant
    pub fn as_record(&self) -> Option<&RecordVariant> {
        match self {
            Variant::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Whether this is a record variant
    pub fn is_record(&self) -> bool {
        matches!(self, Variant::Record(_))
    }
}

impl BasicVariant {
    /// Create a primitive candidate
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl ObjectVariant {
    /// Create an empty object shape
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
            optional_fields: BTreeSet::new(),
        }
    }

    /// Whether `field` is an optional member
    pub fn is_optional(&self, field: &str) -> bool {
        self.optional_fields.contains(field)
    }

    /// Mark `field` as optional
    pub fn mark_optional(&mut self, field: &str) {
        self.optional_fields.insert(field.to_string());
    }

    /// Same field-name set as `other`, ignoring field types
    pub fn shallow_same_shape(&self, other: &ObjectVariant) -> bool {
        self.fields.len() == other.fields.len() && self.fields.keys().eq(other.fields.keys())
    }
}

impl ArrayVariant {
    /// Create an array candidate over `elements`
    pub fn new(name: impl Into<String>, elements: Vec<Variant>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }
}

impl RecordVariant {
    /// Create a record over `values`
    pub fn new(name: impl Into<String>, values: Vec<Variant>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}
