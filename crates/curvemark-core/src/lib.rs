//! # Curvemark Core
//!
//! Core types and utilities shared by the Curvemark crates.
//! Provides the outline geometry model (points, line and arc edges,
//! closed outlines), length unit conversion, and the geometry error type.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{GeometryError, GeometryResult};
pub use geometry::{
    normalize_degrees, ArcEdge, Bounds, Edge, LineEdge, Outline, Point2D, GEOMETRY_EPSILON,
};
pub use units::{format_length, parse_length, LengthUnit};
