//! Rotation and translation transforms.

use serde::{Deserialize, Serialize};

use super::{wrap_angle, Path, Point, Polygon, Shape};

/// A 2x2 rotation matrix and two-entry translation vector, used for
/// relative movement of [`Point`]s and [`Shape`]s.
///
/// Layout placement never reflects, so every transformation built by this
/// crate is a pure rotation followed by a translation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transformation {
    /// The rotation matrix, in row-major order.
    pub a: [[f64; 2]; 2],
    /// The x-y translation applied after the rotation.
    pub b: [f64; 2],
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    /// Returns the identity transform, leaving any transformed object unmodified.
    pub fn identity() -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [0., 0.],
        }
    }

    /// Returns a translation by `(x, y)`.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [x, y],
        }
    }

    /// Returns a rotation by `angle` degrees about the origin.
    pub fn rotate(angle: f64) -> Self {
        let sin = angle.to_radians().sin();
        let cos = angle.to_radians().cos();
        Self {
            a: [[cos, -sin], [sin, cos]],
            b: [0., 0.],
        }
    }

    /// Creates a transform that rotates by `angle` degrees and then moves
    /// the origin to `loc`.
    pub fn with_loc_and_angle(loc: Point, angle: f64) -> Self {
        Self::cascade(Self::translate(loc.x, loc.y), Self::rotate(angle))
    }

    /// Creates a new [`Transformation`] that is the cascade of `parent` and `child`.
    ///
    /// "Parents" and "children" refer to typical layout-instance hierarchies,
    /// in which each level of instance has a nested transformation relative
    /// to its top-level parent. This operation *is not* commutative.
    pub fn cascade(parent: Transformation, child: Transformation) -> Transformation {
        // The result's origin is the parent's origin plus the
        // parent-transformed child's origin.
        let mut b = matvec(&parent.a, &child.b);
        b[0] += parent.b[0];
        b[1] += parent.b[1];
        let a = matmul(&parent.a, &child.a);
        Self { a, b }
    }

    /// Returns the translation component as a [`Point`].
    pub fn offset_point(&self) -> Point {
        Point {
            x: self.b[0],
            y: self.b[1],
        }
    }

    /// Returns the rotation encoded by this transformation, in degrees
    /// normalized to `[0, 360)`.
    pub fn angle(&self) -> f64 {
        wrap_angle(self.a[1][0].atan2(self.a[0][0]).to_degrees())
    }
}

/// Multiplies two 2x2 matrices, returning a new 2x2 matrix.
fn matmul(a: &[[f64; 2]; 2], b: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}

/// Multiplies a 2x2 matrix by a 2-entry vector, returning a new 2-entry vector.
fn matvec(a: &[[f64; 2]; 2], b: &[f64; 2]) -> [f64; 2] {
    [
        a[0][0] * b[0] + a[0][1] * b[1],
        a[1][0] * b[0] + a[1][1] * b[1],
    ]
}

/// A trait for specifying how an object is changed by a transformation.
pub trait Transform {
    /// Applies matrix-vector [`Transformation`] `trans`.
    ///
    /// Creates a new shape at a location equal to the transformation of our own.
    fn transform(&self, trans: Transformation) -> Self;
}

impl Transform for Point {
    fn transform(&self, trans: Transformation) -> Self {
        Self {
            x: trans.a[0][0] * self.x + trans.a[0][1] * self.y + trans.b[0],
            y: trans.a[1][0] * self.x + trans.a[1][1] * self.y + trans.b[1],
        }
    }
}

impl Transform for Polygon {
    fn transform(&self, trans: Transformation) -> Self {
        Polygon {
            points: self.points.iter().map(|p| p.transform(trans)).collect(),
        }
    }
}

impl Transform for Path {
    fn transform(&self, trans: Transformation) -> Self {
        Path {
            points: self.points.iter().map(|p| p.transform(trans)).collect(),
            width: self.width,
        }
    }
}

impl Transform for Shape {
    fn transform(&self, trans: Transformation) -> Self {
        match self {
            Self::Polygon(s) => Self::Polygon(s.transform(trans)),
            Self::Path(s) => Self::Path(s.transform(trans)),
        }
    }
}

/// A trait for specifying how a shape is translated by a [`Point`].
pub trait Translate {
    /// Translates the shape by a [`Point`] through mutation.
    fn translate(&mut self, p: Point);
}

impl Translate for Point {
    fn translate(&mut self, p: Point) {
        self.x += p.x;
        self.y += p.y;
    }
}

impl Translate for Polygon {
    fn translate(&mut self, p: Point) {
        for pt in self.points.iter_mut() {
            pt.translate(p);
        }
    }
}

impl Translate for Path {
    fn translate(&mut self, p: Point) {
        for pt in self.points.iter_mut() {
            pt.translate(p);
        }
    }
}

impl Translate for Shape {
    fn translate(&mut self, p: Point) {
        match self {
            Self::Polygon(s) => s.translate(p),
            Self::Path(s) => s.translate(p),
        }
    }
}
