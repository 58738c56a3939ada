//! Knowledge base domain module.
//!
//! Immutable catalog of categories and symptoms with severity
//! descriptors and recommended actions.
//!
//! # Module Structure
//!
//! - `model`: Catalog entity types (`Category`, `Symptom`, `Severity`)
//! - `catalog`: Builtin catalog data and the shared `Catalog` accessor

mod catalog;
mod model;

pub use catalog::{catalog, Catalog};
pub use model::{Category, Severity, Symptom};
