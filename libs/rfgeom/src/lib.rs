//! Real-valued planar geometry for RF layout generation.
//!
//! Coordinates are `f64` design units throughout. Nothing in this crate
//! snaps to a manufacturing grid; gridding, where a target process requires
//! it, belongs to the layout serializer.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use self::curves::stroke;

pub mod bbox;
pub mod curves;
pub mod transform;

/// Normalizes an angle in degrees to the range `[0, 360)`.
pub fn wrap_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// A point in two-dimensional layout space.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new [`Point`] from (x, y) coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the origin, (0, 0).
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Returns the Euclidean distance between `self` and `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Creates a new [`Point`] shifted by `p.x` in x and by `p.y` in y.
    #[inline]
    pub fn translated(&self, p: Point) -> Self {
        Self {
            x: self.x + p.x,
            y: self.y + p.y,
        }
    }

    /// Returns a point on the circle of radius `radius` at `angle` degrees.
    pub fn on_circle(radius: f64, angle: f64) -> Self {
        let theta = angle.to_radians();
        Self {
            x: radius * theta.cos(),
            y: radius * theta.sin(),
        }
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Self;
    fn add(self, rhs: Point) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign<Point> for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Self;
    fn sub(self, rhs: Point) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::SubAssign<Point> for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from(value: (f64, f64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

/// A closed n-sided polygon with an arbitrary number of vertices.
///
/// Closure from the last point back to the first is implied;
/// the initial point need not be repeated at the end.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from an ordered list of vertices.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Creates an axis-aligned rectangle spanning two opposite corners.
    ///
    /// Corner ordering is normalized; the result is always wound
    /// counterclockwise starting from the lower-left vertex.
    pub fn rect(p0: Point, p1: Point) -> Self {
        let (x0, x1) = (p0.x.min(p1.x), p0.x.max(p1.x));
        let (y0, y1) = (p0.y.min(p1.y), p0.y.max(p1.y));
        Self {
            points: vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
        }
    }
}

/// An open-ended path with non-zero trace width.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Path {
    pub points: Vec<Point>,
    pub width: f64,
}

impl Path {
    /// Creates a path from an ordered centerline and a trace width.
    pub fn new(points: Vec<Point>, width: f64) -> Self {
        Self { points, width }
    }
}

/// Common shape operations, dispatched from [`Shape`] to its variants.
#[enum_dispatch]
pub trait ShapeOps {
    /// Converts the shape to a [`Polygon`], the most general of shapes.
    ///
    /// A [`Path`] is stroked: its centerline is outlined at half the trace
    /// width on each side, with flat end caps and mitered joins. Paths with
    /// fewer than two points stroke to an empty polygon.
    fn to_poly(&self) -> Polygon;
}

impl ShapeOps for Polygon {
    fn to_poly(&self) -> Polygon {
        self.clone()
    }
}

impl ShapeOps for Path {
    fn to_poly(&self) -> Polygon {
        stroke(self)
    }
}

/// The primary geometric primitive comprising generated layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[enum_dispatch(ShapeOps)]
pub enum Shape {
    Polygon(Polygon),
    Path(Path),
}
