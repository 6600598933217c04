//! Domain models for the Coffee Shop Catalog

mod form;
mod shop;
mod style;

pub use form::*;
pub use shop::*;
pub use style::*;
