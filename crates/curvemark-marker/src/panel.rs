//! Panel outline builders.
//!
//! Every panel is built in its local frame: first corner at the origin,
//! width along x, height along y, boundary walked counter-clockwise
//! starting with the bottom edge. The top edge optionally sags by the
//! tube deflection, and the zipper variant narrows the top into a sleeve
//! that wraps around the tube.

use crate::circumcircle::circle_from_three_points;
use crate::config::MarkerConfig;
use crate::error::{MarkerResult, ParameterError, ParameterResult};
use curvemark_core::{ArcEdge, Edge, Outline, Point2D};
use tracing::debug;

/// Outline family of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelShape {
    Rectangle,
    /// Rectangle whose top `wrap_length` mm are cut back to a sleeve
    ZipperSleeve { wrap_length: f64 },
}

/// Dimensions of one panel, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSpec {
    pub width: f64,
    pub height: f64,
    /// Sag of the top edge; 0 keeps it straight
    pub deflection: f64,
    pub shape: PanelShape,
}

impl PanelSpec {
    pub fn rectangle(width: f64, height: f64, deflection: f64) -> Self {
        Self {
            width,
            height,
            deflection,
            shape: PanelShape::Rectangle,
        }
    }

    pub fn zipper_sleeve(width: f64, height: f64, deflection: f64, wrap_length: f64) -> Self {
        Self {
            width,
            height,
            deflection,
            shape: PanelShape::ZipperSleeve { wrap_length },
        }
    }
}

/// Builds closed panel outlines.
#[derive(Debug, Clone, Copy)]
pub struct PanelBuilder {
    sleeve_width: f64,
    fillet_radius: f64,
}

impl PanelBuilder {
    pub fn new(config: &MarkerConfig) -> Self {
        Self {
            sleeve_width: config.sleeve_width,
            fillet_radius: config.fillet_radius,
        }
    }

    /// Checks that `spec` yields a closed, simple outline.
    pub fn validate(&self, spec: &PanelSpec) -> ParameterResult<()> {
        ParameterError::check_positive("width", spec.width)?;
        ParameterError::check_positive("height", spec.height)?;
        ParameterError::check_non_negative("deflection", spec.deflection)?;

        let span = match spec.shape {
            PanelShape::Rectangle => spec.width,
            PanelShape::ZipperSleeve { wrap_length } => {
                ParameterError::check_positive("wrap_length", wrap_length)?;
                let span = spec.width - 2.0 * self.sleeve_width;
                if span <= 0.0 {
                    return Err(ParameterError::Incompatible(format!(
                        "panel width {} mm leaves no sleeve between two {} mm shoulders",
                        spec.width, self.sleeve_width
                    )));
                }
                if wrap_length >= spec.height {
                    return Err(ParameterError::Incompatible(format!(
                        "tube wrap of {:.1} mm needs a segment taller than the {} mm given",
                        wrap_length, spec.height
                    )));
                }
                if wrap_length <= self.fillet_radius {
                    return Err(ParameterError::Incompatible(format!(
                        "tube wrap of {:.1} mm must be longer than the {} mm fillet radius",
                        wrap_length, self.fillet_radius
                    )));
                }
                span
            }
        };

        let max_deflection = span.min(spec.height) / 2.0;
        if spec.deflection >= max_deflection {
            return Err(ParameterError::OutOfRange {
                name: "deflection".to_string(),
                value: spec.deflection,
                min: 0.0,
                max: max_deflection,
            });
        }

        Ok(())
    }

    /// Builds the outline for `spec`.
    pub fn build(&self, spec: &PanelSpec) -> MarkerResult<Outline> {
        self.validate(spec)?;

        let outline = match spec.shape {
            PanelShape::Rectangle => self.rectangle(spec)?,
            PanelShape::ZipperSleeve { wrap_length } => self.zipper_sleeve(spec, wrap_length)?,
        };

        debug!(
            "Built {:?} panel {}x{} mm (deflection {} mm): {} lines, {} arcs",
            spec.shape,
            spec.width,
            spec.height,
            spec.deflection,
            outline.line_count(),
            outline.arc_count()
        );

        Ok(outline)
    }

    fn rectangle(&self, spec: &PanelSpec) -> MarkerResult<Outline> {
        let (w, h) = (spec.width, spec.height);
        let p0 = Point2D::new(0.0, 0.0);
        let p1 = Point2D::new(w, 0.0);
        let p2 = Point2D::new(w, h);
        let p3 = Point2D::new(0.0, h);

        Ok(Outline::new(vec![
            Edge::line(p0, p1),
            Edge::line(p1, p2),
            top_edge(p2, p3, spec.deflection)?,
            Edge::line(p3, p0),
        ]))
    }

    fn zipper_sleeve(&self, spec: &PanelSpec, wrap_length: f64) -> MarkerResult<Outline> {
        let (w, h) = (spec.width, spec.height);
        let a = self.sleeve_width;
        let r = self.fillet_radius;
        // Height where the shoulders stop and the sleeve begins
        let shoulder = h - wrap_length;

        let bottom_left = Point2D::new(0.0, 0.0);
        let bottom_right = Point2D::new(w, 0.0);
        let right_shoulder = Point2D::new(w, shoulder);
        let right_fillet_start = Point2D::new(w - a + r, shoulder);
        let right_fillet_end = Point2D::new(w - a, shoulder + r);
        let sleeve_top_right = Point2D::new(w - a, h);
        let sleeve_top_left = Point2D::new(a, h);
        let left_fillet_start = Point2D::new(a, shoulder + r);
        let left_fillet_end = Point2D::new(a - r, shoulder);
        let left_shoulder = Point2D::new(0.0, shoulder);

        let right_fillet =
            ArcEdge::new(Point2D::new(w - a + r, shoulder + r), r, 180.0, 270.0).with_reversed(true);
        let left_fillet =
            ArcEdge::new(Point2D::new(a - r, shoulder + r), r, 270.0, 360.0).with_reversed(true);

        Ok(Outline::new(vec![
            Edge::line(bottom_left, bottom_right),
            Edge::line(bottom_right, right_shoulder),
            Edge::line(right_shoulder, right_fillet_start),
            Edge::Arc(right_fillet),
            Edge::line(right_fillet_end, sleeve_top_right),
            top_edge(sleeve_top_right, sleeve_top_left, spec.deflection)?,
            Edge::line(sleeve_top_left, left_fillet_start),
            Edge::Arc(left_fillet),
            Edge::line(left_fillet_end, left_shoulder),
            Edge::line(left_shoulder, bottom_left),
        ]))
    }
}

/// Straight edge from `start` to `end`, or an arc sagging `deflection` mm
/// towards the panel interior at the midpoint.
fn top_edge(start: Point2D, end: Point2D, deflection: f64) -> MarkerResult<Edge> {
    if deflection == 0.0 {
        return Ok(Edge::line(start, end));
    }
    let apex = sag_apex(start, end, deflection);
    let circle = circle_from_three_points(start, end, apex)?;
    Ok(Edge::Arc(circle.to_arc()))
}

/// Midpoint of the edge moved along its left normal, which points inward
/// on a counter-clockwise boundary.
fn sag_apex(start: Point2D, end: Point2D, deflection: f64) -> Point2D {
    let mid = start.midpoint(&end);
    let length = start.distance_to(&end);
    let (dx, dy) = ((end.x - start.x) / length, (end.y - start.y) / length);
    Point2D::new(mid.x - dy * deflection, mid.y + dx * deflection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvemark_core::GEOMETRY_EPSILON;

    fn builder() -> PanelBuilder {
        PanelBuilder::new(&MarkerConfig::default())
    }

    #[test]
    fn test_plain_rectangle() {
        let outline = builder()
            .build(&PanelSpec::rectangle(500.0, 800.0, 0.0))
            .unwrap();
        assert_eq!(outline.line_count(), 4);
        assert_eq!(outline.arc_count(), 0);
        assert_eq!(outline.edges()[0].start(), Point2D::new(0.0, 0.0));
        assert_eq!(outline.edges()[1].end(), Point2D::new(500.0, 800.0));
        assert!(outline.is_closed(GEOMETRY_EPSILON));
    }

    #[test]
    fn test_sag_apex_points_inward() {
        let apex = sag_apex(Point2D::new(500.0, 800.0), Point2D::new(0.0, 800.0), 50.0);
        assert!(apex.approx_eq(&Point2D::new(250.0, 750.0), 1e-12));
    }

    #[test]
    fn test_curved_top_replaces_top_line() {
        let outline = builder()
            .build(&PanelSpec::rectangle(500.0, 800.0, 50.0))
            .unwrap();
        assert_eq!(outline.line_count(), 3);
        assert_eq!(outline.arc_count(), 1);
        assert!(outline.edges()[2].is_arc());
        assert!(outline.is_closed(GEOMETRY_EPSILON));
    }

    #[test]
    fn test_deflection_must_stay_below_half_span() {
        let err = builder()
            .validate(&PanelSpec::rectangle(100.0, 800.0, 50.0))
            .unwrap_err();
        assert!(matches!(err, ParameterError::OutOfRange { ref name, .. } if name == "deflection"));

        let err = builder()
            .validate(&PanelSpec::rectangle(800.0, 100.0, 60.0))
            .unwrap_err();
        assert!(matches!(err, ParameterError::OutOfRange { .. }));
    }

    #[test]
    fn test_zipper_sleeve_vertices() {
        let outline = builder()
            .build(&PanelSpec::zipper_sleeve(500.0, 800.0, 0.0, 200.0))
            .unwrap();
        assert_eq!(outline.len(), 10);
        assert_eq!(outline.arc_count(), 2);
        assert!(outline.is_closed(GEOMETRY_EPSILON));

        let e = outline.edges();
        assert!(e[3].start().approx_eq(&Point2D::new(495.0, 600.0), 1e-9));
        assert!(e[3].end().approx_eq(&Point2D::new(485.0, 610.0), 1e-9));
        assert_eq!(e[5].start(), Point2D::new(485.0, 800.0));
        assert_eq!(e[5].end(), Point2D::new(15.0, 800.0));
        assert!(e[7].start().approx_eq(&Point2D::new(15.0, 610.0), 1e-9));
        assert!(e[7].end().approx_eq(&Point2D::new(5.0, 600.0), 1e-9));
        assert_eq!(e[9].start(), Point2D::new(0.0, 600.0));
    }

    #[test]
    fn test_zipper_fillets_are_fixed() {
        let outline = builder()
            .build(&PanelSpec::zipper_sleeve(500.0, 800.0, 30.0, 200.0))
            .unwrap();
        let arcs: Vec<_> = outline.arcs().collect();
        assert_eq!(arcs.len(), 3);
        assert_eq!((arcs[0].start_angle, arcs[0].end_angle), (180.0, 270.0));
        assert_eq!(arcs[0].radius, 10.0);
        assert_eq!((arcs[2].start_angle, arcs[2].end_angle), (270.0, 0.0));
        assert!(arcs[0].reversed && arcs[2].reversed);
        assert!(outline.is_closed(GEOMETRY_EPSILON));
    }

    #[test]
    fn test_zipper_wrap_must_fit() {
        let err = builder()
            .validate(&PanelSpec::zipper_sleeve(500.0, 150.0, 0.0, 172.8))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Incompatible parameters: tube wrap of 172.8 mm needs a segment taller than the 150 mm given"
        );

        let err = builder()
            .validate(&PanelSpec::zipper_sleeve(500.0, 150.0, 0.0, 8.0))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Incompatible parameters: tube wrap of 8.0 mm must be longer than the 10 mm fillet radius"
        );

        let err = builder()
            .validate(&PanelSpec::zipper_sleeve(30.0, 800.0, 0.0, 172.8))
            .unwrap_err();
        assert!(matches!(err, ParameterError::Incompatible(_)));
    }
}
