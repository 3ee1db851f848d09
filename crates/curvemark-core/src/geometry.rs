//! Outline geometry model.
//!
//! A marker outline is an ordered list of [`Edge`]s: straight [`LineEdge`]s
//! and circular [`ArcEdge`]s. Arcs follow the drawing-exchange convention:
//! the sweep always runs counter-clockwise from `start_angle` to `end_angle`,
//! both in degrees within `[0, 360)`. An outline may walk an arc against that
//! sweep, which is recorded in [`ArcEdge::reversed`].

use crate::error::{GeometryError, GeometryResult};
use nalgebra::{Isometry2, Point2};
use serde::{Deserialize, Serialize};

/// Tolerance (mm) used for point coincidence and outline closure.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// Angles closer than this (degrees) to a full turn wrap to zero.
const ANGLE_EPSILON: f64 = 1e-9;

/// Reduce an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to 360.0
    if a >= 360.0 - ANGLE_EPSILON {
        0.0
    } else {
        a + 0.0
    }
}

/// A 2D point in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Bearing of this point seen from `center`, in degrees within `[0, 360)`.
    pub fn bearing_from(&self, center: &Point2D) -> f64 {
        normalize_degrees((self.y - center.y).atan2(self.x - center.x).to_degrees())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn approx_eq(&self, other: &Point2D, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }

    pub fn transformed(&self, iso: &Isometry2<f64>) -> Point2D {
        iso.transform_point(&Point2::from(*self)).into()
    }
}

impl From<Point2D> for Point2<f64> {
    fn from(p: Point2D) -> Self {
        Point2::new(p.x, p.y)
    }
}

impl From<Point2<f64>> for Point2D {
    fn from(p: Point2<f64>) -> Self {
        Point2D::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D::new(x, y)
    }
}

/// A straight edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineEdge {
    pub start: Point2D,
    pub end: Point2D,
}

impl LineEdge {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// A circular arc swept counter-clockwise from `start_angle` to `end_angle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcEdge {
    pub center: Point2D,
    pub radius: f64,
    /// Degrees, `[0, 360)`
    pub start_angle: f64,
    /// Degrees, `[0, 360)`
    pub end_angle: f64,
    /// The outline walks this arc from `end_angle` back to `start_angle`.
    #[serde(default)]
    pub reversed: bool,
}

impl ArcEdge {
    /// Creates a forward arc. Angles are normalised to `[0, 360)`.
    pub fn new(center: Point2D, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle: normalize_degrees(start_angle),
            end_angle: normalize_degrees(end_angle),
            reversed: false,
        }
    }

    /// Marks whether the outline traverses this arc clockwise.
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Counter-clockwise sweep in degrees, `(0, 360]`.
    pub fn sweep(&self) -> f64 {
        let sweep = (self.end_angle - self.start_angle).rem_euclid(360.0);
        if sweep == 0.0 {
            360.0
        } else {
            sweep
        }
    }

    pub fn point_at(&self, angle_deg: f64) -> Point2D {
        let rad = angle_deg.to_radians();
        Point2D::new(
            self.center.x + self.radius * rad.cos(),
            self.center.y + self.radius * rad.sin(),
        )
    }

    /// Point at `start_angle`.
    pub fn ccw_start(&self) -> Point2D {
        self.point_at(self.start_angle)
    }

    /// Point at `end_angle`.
    pub fn ccw_end(&self) -> Point2D {
        self.point_at(self.end_angle)
    }

    /// Whether `angle_deg` lies on the counter-clockwise sweep (endpoints included).
    pub fn contains_angle(&self, angle_deg: f64) -> bool {
        let offset = (angle_deg - self.start_angle).rem_euclid(360.0);
        offset <= self.sweep() + 1e-9
    }

    /// Start point in traversal order.
    pub fn start(&self) -> Point2D {
        if self.reversed {
            self.ccw_end()
        } else {
            self.ccw_start()
        }
    }

    /// End point in traversal order.
    pub fn end(&self) -> Point2D {
        if self.reversed {
            self.ccw_start()
        } else {
            self.ccw_end()
        }
    }

    /// Rigid transform. Radius, sweep, and traversal are preserved; both
    /// angles shift by the rotation.
    pub fn transformed(&self, iso: &Isometry2<f64>) -> ArcEdge {
        let rotation = iso.rotation.angle().to_degrees();
        ArcEdge {
            center: self.center.transformed(iso),
            radius: self.radius,
            start_angle: normalize_degrees(self.start_angle + rotation),
            end_angle: normalize_degrees(self.end_angle + rotation),
            reversed: self.reversed,
        }
    }
}

/// One edge of an outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Edge {
    Line(LineEdge),
    Arc(ArcEdge),
}

impl Edge {
    pub fn line(start: Point2D, end: Point2D) -> Self {
        Edge::Line(LineEdge::new(start, end))
    }

    pub fn start(&self) -> Point2D {
        match self {
            Edge::Line(line) => line.start,
            Edge::Arc(arc) => arc.start(),
        }
    }

    pub fn end(&self) -> Point2D {
        match self {
            Edge::Line(line) => line.end,
            Edge::Arc(arc) => arc.end(),
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Edge::Arc(_))
    }

    pub fn transformed(&self, iso: &Isometry2<f64>) -> Edge {
        match self {
            Edge::Line(line) => Edge::Line(LineEdge::new(
                line.start.transformed(iso),
                line.end.transformed(iso),
            )),
            Edge::Arc(arc) => Edge::Arc(arc.transformed(iso)),
        }
    }

    /// Axis-aligned bounds of the edge, including arc extremes.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        match self {
            Edge::Line(line) => {
                bounds.include(line.start);
                bounds.include(line.end);
            }
            Edge::Arc(arc) => {
                bounds.include(arc.ccw_start());
                bounds.include(arc.ccw_end());
                for quadrant in [0.0, 90.0, 180.0, 270.0] {
                    if arc.contains_angle(quadrant) {
                        bounds.include(arc.point_at(quadrant));
                    }
                }
            }
        }
        bounds
    }

    fn is_finite(&self) -> bool {
        match self {
            Edge::Line(line) => line.start.is_finite() && line.end.is_finite(),
            Edge::Arc(arc) => {
                arc.center.is_finite()
                    && arc.radius.is_finite()
                    && arc.start_angle.is_finite()
                    && arc.end_angle.is_finite()
            }
        }
    }
}

impl From<LineEdge> for Edge {
    fn from(line: LineEdge) -> Self {
        Edge::Line(line)
    }
}

impl From<ArcEdge> for Edge {
    fn from(arc: ArcEdge) -> Self {
        Edge::Arc(arc)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn include(&mut self, p: Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn union(&mut self, other: &Bounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A closed boundary made of line and arc edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    edges: Vec<Edge>,
}

impl Outline {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.edges.iter().filter(|e| !e.is_arc()).count()
    }

    pub fn arc_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_arc()).count()
    }

    pub fn arcs(&self) -> impl Iterator<Item = &ArcEdge> {
        self.edges.iter().filter_map(|e| match e {
            Edge::Arc(arc) => Some(arc),
            Edge::Line(_) => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineEdge> {
        self.edges.iter().filter_map(|e| match e {
            Edge::Line(line) => Some(line),
            Edge::Arc(_) => None,
        })
    }

    /// Checks that every edge ends where the next one starts (wrapping around).
    pub fn validate_closed(&self, tolerance: f64) -> GeometryResult<()> {
        if self.edges.is_empty() {
            return Err(GeometryError::EmptyOutline);
        }

        for (i, edge) in self.edges.iter().enumerate() {
            if !edge.is_finite() {
                return Err(GeometryError::NonFinite {
                    context: format!("edge {}", i),
                });
            }
            let next = &self.edges[(i + 1) % self.edges.len()];
            let gap = edge.end().distance_to(&next.start());
            if gap > tolerance {
                return Err(GeometryError::OutlineNotClosed { edge: i, gap });
            }
        }

        Ok(())
    }

    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.validate_closed(tolerance).is_ok()
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for edge in &self.edges {
            bounds.union(&edge.bounds());
        }
        bounds
    }

    /// Applies a rigid transform to every edge.
    pub fn transformed(&self, iso: &Isometry2<f64>) -> Outline {
        Outline {
            edges: self.edges.iter().map(|e| e.transformed(iso)).collect(),
        }
    }
}

impl FromIterator<Edge> for Outline {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Outline::new(iter.into_iter().collect())
    }
}
