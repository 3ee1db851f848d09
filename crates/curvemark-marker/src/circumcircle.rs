//! Circle through three points.
//!
//! Used for the curved top of a panel: the two top corners plus the sag
//! apex determine the arc the cutter follows.

use curvemark_core::{normalize_degrees, ArcEdge, GeometryError, GeometryResult, Point2D};

/// Below this |determinant| the three points are treated as collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-9;

/// Circle through three points plus the CCW angle pair spanning the
/// first two via the third.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    pub center: Point2D,
    pub radius: f64,
    /// Degrees, `[0, 360)`
    pub start_angle: f64,
    /// Degrees, `[0, 360)`
    pub end_angle: f64,
    /// The CCW sweep runs from p2 to p1 instead of p1 to p2
    pub swapped: bool,
}

impl Circumcircle {
    /// Arc edge walked from p1 to p2.
    pub fn to_arc(&self) -> ArcEdge {
        ArcEdge::new(self.center, self.radius, self.start_angle, self.end_angle)
            .with_reversed(self.swapped)
    }
}

/// Whether `b` lies strictly inside the counter-clockwise sweep from `a` to `c`.
///
/// All three angles are reduced to `[0, 360)` first.
pub fn is_between(a: f64, b: f64, c: f64) -> bool {
    let a = normalize_degrees(a);
    let b = normalize_degrees(b);
    let c = normalize_degrees(c);
    if a < c {
        a < b && b < c
    } else {
        b > a || b < c
    }
}

/// Computes the circle through `p1`, `p2`, `p3`.
///
/// `p1` and `p2` are the arc endpoints and `p3` a point the arc must pass
/// through. Start and end angles are swapped when the CCW sweep from p1 to
/// p2 would miss p3.
pub fn circle_from_three_points(
    p1: Point2D,
    p2: Point2D,
    p3: Point2D,
) -> GeometryResult<Circumcircle> {
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);

    let determinant = 2.0 * (x1 * (y2 - y3) + x2 * (y3 - y1) + x3 * (y1 - y2));
    if !determinant.is_finite() {
        return Err(GeometryError::NonFinite {
            context: "circumcircle determinant".to_string(),
        });
    }
    if determinant.abs() < COLLINEAR_EPSILON {
        return Err(GeometryError::CollinearPoints { determinant });
    }

    let s1 = x1 * x1 + y1 * y1;
    let s2 = x2 * x2 + y2 * y2;
    let s3 = x3 * x3 + y3 * y3;

    let center = Point2D::new(
        (s1 * (y2 - y3) + s2 * (y3 - y1) + s3 * (y1 - y2)) / determinant,
        (s1 * (x3 - x2) + s2 * (x1 - x3) + s3 * (x2 - x1)) / determinant,
    );
    let radius = center.distance_to(&p1);

    let mut start_angle = p1.bearing_from(&center);
    let mut end_angle = p2.bearing_from(&center);
    let apex_angle = p3.bearing_from(&center);

    let swapped = !is_between(start_angle, apex_angle, end_angle);
    if swapped {
        std::mem::swap(&mut start_angle, &mut end_angle);
    }

    Ok(Circumcircle {
        center,
        radius,
        start_angle,
        end_angle,
        swapped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_between_plain_range() {
        assert!(is_between(10.0, 45.0, 90.0));
        assert!(!is_between(10.0, 95.0, 90.0));
        assert!(!is_between(10.0, 10.0, 90.0));
    }

    #[test]
    fn test_is_between_wraps_zero() {
        assert!(is_between(300.0, 350.0, 30.0));
        assert!(is_between(300.0, 10.0, 30.0));
        assert!(!is_between(300.0, 100.0, 30.0));
        assert!(is_between(-60.0, 0.0, 390.0));
    }

    #[test]
    fn test_upper_semicircle() {
        let c = circle_from_three_points(
            Point2D::new(1.0, 0.0),
            Point2D::new(-1.0, 0.0),
            Point2D::new(0.0, 1.0),
        )
        .unwrap();
        assert!(c.center.approx_eq(&Point2D::ORIGIN, 1e-12));
        assert!((c.radius - 1.0).abs() < 1e-12);
        assert_eq!(c.start_angle, 0.0);
        assert!((c.end_angle - 180.0).abs() < 1e-12);
        assert!(!c.swapped);
    }

    #[test]
    fn test_clockwise_input_swaps() {
        // Lower semicircle walked from the right: CCW sweep runs from p2 to p1
        let c = circle_from_three_points(
            Point2D::new(1.0, 0.0),
            Point2D::new(-1.0, 0.0),
            Point2D::new(0.0, -1.0),
        )
        .unwrap();
        assert!(c.swapped);
        assert!((c.start_angle - 180.0).abs() < 1e-12);
        assert_eq!(c.end_angle, 0.0);

        let arc = c.to_arc();
        assert!(arc.start().approx_eq(&Point2D::new(1.0, 0.0), 1e-9));
        assert!(arc.end().approx_eq(&Point2D::new(-1.0, 0.0), 1e-9));
    }

    #[test]
    fn test_collinear_points_fail() {
        let err = circle_from_three_points(
            Point2D::new(0.0, 0.0),
            Point2D::new(5.0, 0.0),
            Point2D::new(10.0, 0.0),
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::CollinearPoints { .. }));
    }

    #[test]
    fn test_sag_apex_below_top_edge() {
        // Top edge of a 500 x 800 panel sagging 50 mm
        let c = circle_from_three_points(
            Point2D::new(500.0, 800.0),
            Point2D::new(0.0, 800.0),
            Point2D::new(250.0, 750.0),
        )
        .unwrap();
        // r = (h^2 + s^2) / 2s with half-chord h = 250, sag s = 50
        assert!((c.radius - 650.0).abs() < 1e-9);
        assert!(c.center.approx_eq(&Point2D::new(250.0, 1400.0), 1e-9));
        assert!(c.swapped);
    }
}
