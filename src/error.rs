//! Error types for the shape store, scales and settings.
//!
//! Gesture anomalies (stray presses, drag events with nothing to drag) are not
//! errors; the editor ignores them. Only contract violations at the store
//! boundary and configuration problems surface here.

use crate::types::ShapeId;
use thiserror::Error;

/// Errors that can occur when accepting host data
#[derive(Error, Debug)]
pub enum ShapeError {
    /// A shape carries NaN or infinite geometry
    #[error("Shape {index} has non-finite {field}")]
    NonFiniteGeometry { index: usize, field: &'static str },

    /// Two shapes share an id
    #[error("Duplicate shape id {id} at index {index}")]
    DuplicateId { id: ShapeId, index: usize },

    /// A per-shape appearance value is out of range
    #[error("Shape {index} has invalid appearance {field}: {value}")]
    InvalidAppearance {
        index: usize,
        field: &'static str,
        value: f64,
    },

    /// Axis scale cannot be inverted
    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for shape operations
pub type ShapeResult<T> = Result<T, ShapeError>;
