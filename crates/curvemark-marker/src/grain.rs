//! Grain rotation for with-the-grain panels.
//!
//! A with-the-grain panel is built like any other segment, width along x.
//! On the roll the fabric height runs along the feed direction, so the
//! outline is turned a quarter turn clockwise and shifted back into the
//! non-negative quadrant: `(x, y) -> (y, W - x)`.

use curvemark_core::Outline;
use nalgebra::{Isometry2, Translation2, UnitComplex};

/// Rigid transform mapping `(x, y)` to `(y, local_width - x)`.
pub fn with_grain_transform(local_width: f64) -> Isometry2<f64> {
    // Exact cos/sin of -90 degrees so axis-aligned edges stay axis-aligned
    let rotation = UnitComplex::from_cos_sin_unchecked(0.0, -1.0);
    Isometry2::from_parts(Translation2::new(0.0, local_width), rotation)
}

/// Reframes a panel built `local_width` mm wide into the roll's axes.
pub fn rotate_to_grain(outline: &Outline, local_width: f64) -> Outline {
    outline.transformed(&with_grain_transform(local_width))
}
