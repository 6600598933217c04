//! Catalog services

pub mod builder;
pub mod images;
pub mod store;

pub use builder::ShopBuilder;
pub use store::CatalogStore;
