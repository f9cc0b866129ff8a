//! Recursive structural comparison between variants
//!
//! The comparator decides whether two candidate variants are exactly the same
//! shape, compatible shapes of the same kind, or unrelated, and how far apart
//! they are. Strategies use the result to discard duplicates, pick merge
//! targets, and count how much two object shapes disagree.

use crate::model::{ArrayVariant, ObjectVariant, Variant};

/// Outcome of comparing two variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    /// The two variants are structurally indistinguishable
    pub exact_match: bool,
    /// Count of structural discrepancies; lower means closer
    pub diff: usize,
    /// Same top-level kind, or the object/record widening
    pub compatible: bool,
}

impl Comparison {
    fn exact() -> Self {
        Self {
            exact_match: true,
            diff: 0,
            compatible: true,
        }
    }

    fn incompatible() -> Self {
        Self {
            exact_match: false,
            diff: 1,
            compatible: false,
        }
    }
}

/// Compare two variants of any kind
///
/// Different top-level kinds are incompatible with a diff of 1, except Object
/// vs Record: an object can always be widened into a compatible record, so
/// that pairing is compatible (but never exact) at diff 0. Two records are
/// compared by kind only and always match exactly; their value sets are not
/// diffed here.
pub fn compare(a: &Variant, b: &Variant) -> Comparison {
    match (a, b) {
        (Variant::Record(_), Variant::Record(_)) => Comparison::exact(),
        (Variant::Object(_), Variant::Record(_)) | (Variant::Record(_), Variant::Object(_)) => {
            Comparison {
                exact_match: false,
                diff: 0,
                compatible: true,
            }
        }
        (Variant::Object(a), Variant::Object(b)) => object_compare(a, b).comparison,
        (Variant::Array(a), Variant::Array(b)) => array_compare(a, b).comparison,
        (Variant::Basic(a), Variant::Basic(b)) if a.kind == b.kind => Comparison::exact(),
        _ => Comparison::incompatible(),
    }
}

/// Compare an object candidate against any stored variant
pub(crate) fn compare_object(candidate: &ObjectVariant, stored: &Variant) -> Comparison {
    match stored {
        Variant::Object(o) => object_compare(candidate, o).comparison,
        Variant::Record(_) => Comparison {
            exact_match: false,
            diff: 0,
            compatible: true,
        },
        _ => Comparison::incompatible(),
    }
}

/// Array comparison result, with the indices of `a`'s unmatched elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayComparison {
    pub comparison: Comparison,
    /// Indices into `a.elements` with no exact match among `b.elements`
    pub unmatched: Vec<usize>,
}

/// Element-wise comparison of two array variants
///
/// For every element variant of `a` there must be some element variant of `b`
/// it exact-matches, recursively. Asymmetric: only `a`'s elements must be
/// covered by `b`, so `b` may carry extra shapes without affecting the result.
pub fn array_compare(a: &ArrayVariant, b: &ArrayVariant) -> ArrayComparison {
    let mut unmatched = Vec::new();
    for (index, element) in a.elements.iter().enumerate() {
        if !b
            .elements
            .iter()
            .any(|other| compare(element, other).exact_match)
        {
            unmatched.push(index);
        }
    }
    let diff = unmatched.len();
    ArrayComparison {
        comparison: Comparison {
            exact_match: diff == 0,
            diff,
            compatible: true,
        },
        unmatched,
    }
}

/// Object comparison result with the three key partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectComparison {
    pub comparison: Comparison,
    /// Fields present in `a`, absent in `b` and not optional there
    pub missing: Vec<String>,
    /// Fields present in both whose variant sets do not match
    pub unmatched: Vec<String>,
    /// Fields present in `b` but absent from `a`
    pub extra: Vec<String>,
}

/// Field-wise comparison of two object variants
///
/// A field of `a` that `b` lacks is missing unless `b` marks it optional. A
/// field present in both matches only when every variant of `a`'s list
/// exact-matches some variant of `b`'s list, recursively. Fields only `b` has
/// are extra. `diff` is the total size of the three partitions.
pub fn object_compare(a: &ObjectVariant, b: &ObjectVariant) -> ObjectComparison {
    let mut missing = Vec::new();
    let mut unmatched = Vec::new();
    let mut extra = Vec::new();

    for (field, a_variants) in &a.fields {
        match b.fields.get(field) {
            None => {
                if !b.is_optional(field) {
                    missing.push(field.clone());
                }
            }
            Some(b_variants) => {
                let covered = a_variants
                    .iter()
                    .all(|va| b_variants.iter().any(|vb| compare(va, vb).exact_match));
                if !covered {
                    unmatched.push(field.clone());
                }
            }
        }
    }
    for field in b.fields.keys() {
        if !a.fields.contains_key(field) {
            extra.push(field.clone());
        }
    }

    let diff = missing.len() + unmatched.len() + extra.len();
    ObjectComparison {
        comparison: Comparison {
            exact_match: diff == 0,
            diff,
            compatible: true,
        },
        missing,
        unmatched,
        extra,
    }
}
