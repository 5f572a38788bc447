//! # parish-core
//!
//! Core crate for the parish mass booking service. Contains configuration
//! schemas, typed identifiers, pagination types, the clock abstraction,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other parish crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
