//! Convenience result type alias for Leaflet Layers.

use crate::error::AppError;

/// A specialized `Result` type for Leaflet Layers operations.
pub type AppResult<T> = Result<T, AppError>;
