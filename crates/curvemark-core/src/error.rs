//! Error types for the core geometry model.
//!
//! All error types use `thiserror`.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a construction cannot produce a valid edge or outline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Three points that should define a circle are (nearly) collinear
    #[error("Degenerate geometry: points are collinear (determinant {determinant:e})")]
    CollinearPoints {
        /// The determinant of the circumcircle system.
        determinant: f64,
    },

    /// Consecutive edges of an outline do not meet
    #[error("Outline not closed after edge {edge}: gap of {gap:.6} mm")]
    OutlineNotClosed {
        /// Index of the edge whose end does not meet the next start.
        edge: usize,
        /// Distance between the two points.
        gap: f64,
    },

    /// An outline without edges was requested
    #[error("Outline has no edges")]
    EmptyOutline,

    /// A coordinate is NaN or infinite
    #[error("Non-finite coordinate in {context}")]
    NonFinite {
        /// Where the coordinate was found.
        context: String,
    },
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
