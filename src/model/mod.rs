//! Variant model
//!
//! The data model the inference engine operates on: runtime kind
//! classification, the `Variant` sum type, path-key derivation, and the
//! owning `VariantStore`.

mod store;
mod types;

pub use store::VariantStore;
pub use types::{
    classify, element_key, field_key, value_key, ArrayVariant, BasicVariant, Kind, ObjectVariant,
    RecordVariant, ValueKind, Variant,
};

#[cfg(test)]
mod tests;
