//! Slot and mass type catalogs.

pub mod service;

pub use service::CatalogService;
