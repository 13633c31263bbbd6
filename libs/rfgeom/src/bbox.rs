//! Rectangular bounding boxes and associated trait implementations.

use serde::{Deserialize, Serialize};

use super::{Path, Point, Polygon, Shape};

/// An axis-aligned rectangular bounding box.
///
/// `p0` is always closest to negative infinity in both x and y,
/// and `p1` is always closest to positive infinity, except for the
/// [empty](Bbox::empty) box, which inverts them.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bbox {
    pub p0: Point,
    pub p1: Point,
}

impl Default for Bbox {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bbox {
    /// Creates a new [`Bbox`] from two corner [`Point`]s.
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// Creates an empty, otherwise invalid bounding box.
    pub fn empty() -> Self {
        Self {
            p0: Point::new(f64::INFINITY, f64::INFINITY),
            p1: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Returns `true` if the bounding box is empty.
    pub fn is_empty(&self) -> bool {
        self.p0.x > self.p1.x || self.p0.y > self.p1.y
    }

    /// Expands the box to include `pt`.
    pub fn expand_to(&mut self, pt: Point) {
        self.p0.x = self.p0.x.min(pt.x);
        self.p0.y = self.p0.y.min(pt.y);
        self.p1.x = self.p1.x.max(pt.x);
        self.p1.y = self.p1.y.max(pt.y);
    }

    /// Returns the union of `self` and `other`.
    pub fn union(self, other: Bbox) -> Bbox {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Bbox {
            p0: Point::new(self.p0.x.min(other.p0.x), self.p0.y.min(other.p0.y)),
            p1: Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
        }
    }

    /// Finds the width of the bounding box in the x-direction.
    #[inline]
    pub fn width(&self) -> f64 {
        self.p1.x - self.p0.x
    }

    /// Finds the height of the bounding box in the y-direction.
    #[inline]
    pub fn height(&self) -> f64 {
        self.p1.y - self.p0.y
    }

    /// Returns the center point of the bounding box.
    pub fn center(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2.0, (self.p0.y + self.p1.y) / 2.0)
    }

    /// Returns true if `pt` lies inside the bounding box, inclusive of its
    /// boundary.
    pub fn contains(&self, pt: Point) -> bool {
        self.p0.x <= pt.x && self.p1.x >= pt.x && self.p0.y <= pt.y && self.p1.y >= pt.y
    }
}

/// A trait for computing a rectangular bounding box.
pub trait BoundBox {
    /// Computes the bounding box of the object.
    fn bbox(&self) -> Bbox;
}

impl BoundBox for Point {
    fn bbox(&self) -> Bbox {
        Bbox { p0: *self, p1: *self }
    }
}

impl BoundBox for Polygon {
    fn bbox(&self) -> Bbox {
        let mut bbox = Bbox::empty();
        for pt in &self.points {
            bbox.expand_to(*pt);
        }
        bbox
    }
}

impl BoundBox for Path {
    /// The bounding box of the path's centerline, expanded by half the
    /// trace width on every side.
    fn bbox(&self) -> Bbox {
        let mut bbox = Bbox::empty();
        for pt in &self.points {
            bbox.expand_to(*pt);
        }
        if bbox.is_empty() {
            return bbox;
        }
        let hw = self.width / 2.0;
        Bbox {
            p0: Point::new(bbox.p0.x - hw, bbox.p0.y - hw),
            p1: Point::new(bbox.p1.x + hw, bbox.p1.y + hw),
        }
    }
}

impl BoundBox for Shape {
    fn bbox(&self) -> Bbox {
        match self {
            Self::Polygon(s) => s.bbox(),
            Self::Path(s) => s.bbox(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_with_empty_is_identity() {
        let b = Bbox::new(Point::new(-1.0, 0.0), Point::new(2.0, 3.0));
        assert_eq!(b.union(Bbox::empty()), b);
        assert_eq!(Bbox::empty().union(b), b);
        assert!(Bbox::empty().is_empty());
    }

    #[test]
    fn path_bbox_includes_width() {
        let path = Path::new(vec![Point::zero(), Point::new(10.0, 0.0)], 2.0);
        let b = path.bbox();
        assert_eq!(b.p0, Point::new(-1.0, -1.0));
        assert_eq!(b.p1, Point::new(11.0, 1.0));
    }
}
