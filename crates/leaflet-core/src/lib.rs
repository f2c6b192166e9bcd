//! # leaflet-core
//!
//! Core crate for Leaflet Layers. Contains the configuration schemas
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Leaflet crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
