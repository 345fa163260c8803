//! Component catalog and static engineering reference data.

pub mod models;
pub mod reference;
pub mod views;

pub use models::{CatalogFolder, CatalogItem, CatalogStore, NewCatalogItem};
