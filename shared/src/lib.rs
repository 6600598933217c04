//! Shared types and models for the Coffee Shop Catalog
//!
//! This crate contains the domain records, the raw form input and its field
//! validation. It is used by the catalog core and by the browser bindings.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
