//! Error types for the marker engine.
//!
//! This module provides structured error types for job validation,
//! outline construction, segmentation, and DXF output.

use curvemark_core::GeometryError;
use std::io;
use thiserror::Error;

/// Errors that can occur while planning, building, or writing markers.
#[derive(Error, Debug)]
pub enum MarkerError {
    /// Three arc points are collinear, so no curved edge exists.
    #[error(transparent)]
    DegenerateGeometry(GeometryError),

    /// A built outline failed its closure or finiteness check.
    #[error("Invalid outline: {0}")]
    InvalidOutline(GeometryError),

    /// The job or configuration violates a dimensional constraint.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(#[from] ParameterError),

    /// The edge trim leaves no usable roll width.
    #[error(
        "Unreachable segmentation: roll width {roll_width} mm minus edge trim {edge_trim} mm leaves no usable width"
    )]
    UnreachableSegmentation { roll_width: f64, edge_trim: f64 },

    /// The DXF document could not be encoded.
    #[error("DXF export failed: {0}")]
    Export(String),

    /// I/O error while writing marker files.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl From<GeometryError> for MarkerError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::CollinearPoints { .. } => MarkerError::DegenerateGeometry(err),
            _ => MarkerError::InvalidOutline(err),
        }
    }
}

impl MarkerError {
    /// True for errors caused by the request values rather than the environment.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            MarkerError::InvalidDimensions(_) | MarkerError::UnreachableSegmentation { .. }
        )
    }
}

/// Errors related to job and configuration validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A length that must be strictly positive is not.
    #[error("'{name}' must be greater than 0 (got {value})")]
    NotPositive { name: String, value: f64 },

    /// A length that must not be negative is.
    #[error("'{name}' must not be negative (got {value})")]
    Negative { name: String, value: f64 },

    /// A value is NaN or infinite.
    #[error("'{name}' must be a finite number")]
    NonFinite { name: String },

    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),
}

impl ParameterError {
    pub(crate) fn check_positive(name: &str, value: f64) -> ParameterResult<()> {
        Self::check_finite(name, value)?;
        if value <= 0.0 {
            return Err(ParameterError::NotPositive {
                name: name.to_string(),
                value,
            });
        }
        Ok(())
    }

    pub(crate) fn check_non_negative(name: &str, value: f64) -> ParameterResult<()> {
        Self::check_finite(name, value)?;
        if value < 0.0 {
            return Err(ParameterError::Negative {
                name: name.to_string(),
                value,
            });
        }
        Ok(())
    }

    fn check_finite(name: &str, value: f64) -> ParameterResult<()> {
        if !value.is_finite() {
            return Err(ParameterError::NonFinite {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

/// Result type alias for marker operations.
pub type MarkerResult<T> = Result<T, MarkerError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
