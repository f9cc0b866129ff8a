//! # typeforge
//!
//! Incremental structural type inference from sample JSON values.
//!
//! Feed a session example data and it maintains a best-effort structural
//! model, refined online as more samples arrive, then renders the model as a
//! TypeScript-style type declaration. Useful when you have example payloads
//! but no schema.
//!
//! ## Features
//!
//! - **Incremental merging**: every observation refines the stored model in
//!   place, with no full recomputation
//! - **Merge strategies**: `union`, `optional`, and `record` per path key
//! - **Record promotion**: keys whose object shapes vary too much collapse
//!   into one generic string-keyed record
//! - **Declaration rendering**: finished models print as `export type …`
//!   declarations, optional members included
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use typeforge::TypeGenerator;
//!
//! let mut generator = TypeGenerator::new("ApiResponse");
//! generator.observe(&serde_json::json!({"id": 1, "name": "a"}))?;
//! generator.observe(&serde_json::json!({"id": 2, "tags": ["x"]}))?;
//! println!("{}", generator.suggest()?);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Variant model and store
pub mod model;

/// Recursive structural comparison
pub mod compare;

/// Session merge policy
pub mod policy;

/// Observation pipeline: builder, dispatcher, strategies
pub mod observe;

/// Declaration rendering
pub mod render;

/// Inference session orchestration
pub mod generator;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use generator::TypeGenerator;
pub use model::{Kind, Variant, VariantStore};
pub use observe::observe;
pub use policy::{MergeStrategy, Policy};
pub use render::{render_declaration, render_type};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
