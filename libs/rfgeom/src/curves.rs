//! Parametric outline builders for RF primitives.
//!
//! Every builder is a pure function from numeric parameters to geometry in a
//! local coordinate frame. Builders validate their inputs and fail on
//! non-positive dimensions; nothing here clamps.

use thiserror::Error;

use super::{Path, Point, Polygon};

/// An invalid numeric input to a geometry builder.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeometryError {
    /// A dimension that must be strictly positive was zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// An angular span outside `(0, 360]` degrees.
    #[error("angular span must lie in (0, 360] degrees, got {value}")]
    SpanOutOfRange { value: f64 },

    /// A trace too wide for the requested bend radius.
    #[error("trace width {width} does not fit a bend of radius {radius}")]
    RadiusTooSmall { radius: f64, width: f64 },

    /// Adjacent turns of a coil would touch or overlap.
    #[error("turn spacing {spacing} must exceed trace width {width}")]
    SpacingTooTight { spacing: f64, width: f64 },
}

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Checks that `value` is strictly positive, passing it through if so.
pub fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositive { name, value })
    }
}

/// A straight strip of the given length and width.
///
/// The strip runs from the origin along +x, centered on the x-axis, so the
/// origin sits at the midpoint of the input face.
pub fn strip(length: f64, width: f64) -> Result<Polygon> {
    positive("length", length)?;
    positive("width", width)?;
    Ok(Polygon::rect(
        Point::new(0.0, -width / 2.0),
        Point::new(length, width / 2.0),
    ))
}

/// A linear taper from `width_in` at the origin to `width_out` at `(length, 0)`.
pub fn taper(length: f64, width_in: f64, width_out: f64) -> Result<Polygon> {
    positive("length", length)?;
    positive("width_in", width_in)?;
    positive("width_out", width_out)?;
    Ok(Polygon::new(vec![
        Point::new(0.0, -width_in / 2.0),
        Point::new(length, -width_out / 2.0),
        Point::new(length, width_out / 2.0),
        Point::new(0.0, width_in / 2.0),
    ]))
}

/// Points along a circle of `radius` centered on the origin, swept from
/// `start` to `end` degrees over `segments` equal steps.
///
/// Returns `segments + 1` points including both endpoints.
pub fn arc_points(radius: f64, start: f64, end: f64, segments: usize) -> Vec<Point> {
    (0..=segments)
        .map(|i| {
            let t = start + (end - start) * (i as f64) / (segments as f64);
            Point::on_circle(radius, t)
        })
        .collect()
}

/// Number of sampled segments for an arc spanning `span` degrees.
///
/// One segment per five degrees, floor of ten.
fn arc_segments(span: f64) -> usize {
    ((span / 5.0).ceil() as usize).max(10)
}

/// An arc band: a trace of the given width following a circle of
/// `radius` (the trace centerline) from 0 degrees through `span` degrees,
/// counterclockwise about the origin.
///
/// The band's inner boundary has radius `radius - width / 2`, which must be
/// positive. A span of 360 degrees produces a full ring.
pub fn arc(radius: f64, width: f64, span: f64) -> Result<Polygon> {
    positive("radius", radius)?;
    positive("width", width)?;
    if !(span > 0.0 && span <= 360.0) {
        return Err(GeometryError::SpanOutOfRange { value: span });
    }
    let inner = radius - width / 2.0;
    let outer = radius + width / 2.0;
    if inner <= 0.0 {
        return Err(GeometryError::RadiusTooSmall { radius, width });
    }
    let n = arc_segments(span);
    let mut points = arc_points(inner, 0.0, span, n);
    let mut outer_points = arc_points(outer, 0.0, span, n);
    outer_points.reverse();
    points.extend(outer_points);
    Ok(Polygon::new(points))
}

/// A full annulus of the given centerline radius and trace width.
pub fn ring(radius: f64, width: f64) -> Result<Polygon> {
    arc(radius, width, 360.0)
}

/// An Archimedean spiral centerline starting at `(inner_radius, 0)` and
/// growing outward by `pitch` per turn: `r = inner_radius + pitch * t / 2pi`.
///
/// `turns` may be fractional. `pitch` must exceed `width` so adjacent turns
/// keep positive clearance. Returns the sampled centerline as a
/// width-carrying [`Path`].
pub fn spiral(turns: f64, pitch: f64, inner_radius: f64, width: f64) -> Result<Path> {
    positive("turns", turns)?;
    positive("pitch", pitch)?;
    positive("inner_radius", inner_radius)?;
    positive("width", width)?;
    if pitch <= width {
        return Err(GeometryError::SpacingTooTight {
            spacing: pitch,
            width,
        });
    }
    let n = ((turns * 20.0).ceil() as usize).max(100);
    let total = turns * 2.0 * std::f64::consts::PI;
    let points = (0..=n)
        .map(|i| {
            let theta = total * (i as f64) / (n as f64);
            let r = inner_radius + pitch * theta / (2.0 * std::f64::consts::PI);
            Point::new(r * theta.cos(), r * theta.sin())
        })
        .collect();
    Ok(Path::new(points, width))
}

/// Outlines a path's centerline at half the trace width on each side.
///
/// End caps are flat; joins are mitered, with the miter length limited to
/// five half-widths to keep sharp joins bounded. Paths with fewer than two
/// points produce an empty polygon.
pub(crate) fn stroke(path: &Path) -> Polygon {
    let pts: Vec<Point> = dedup_consecutive(&path.points);
    if pts.len() < 2 {
        return Polygon::default();
    }
    let hw = path.width / 2.0;

    // Unit normal of each segment, rotated +90 degrees from travel.
    let normals: Vec<Point> = pts
        .windows(2)
        .map(|w| {
            let d = w[1] - w[0];
            let len = d.x.hypot(d.y);
            Point::new(-d.y / len, d.x / len)
        })
        .collect();

    let mut left = Vec::with_capacity(pts.len());
    let mut right = Vec::with_capacity(pts.len());
    for (i, pt) in pts.iter().enumerate() {
        let n = if i == 0 {
            normals[0]
        } else if i == pts.len() - 1 {
            normals[i - 1]
        } else {
            let sum = normals[i - 1] + normals[i];
            let len = sum.x.hypot(sum.y);
            if len < 1e-12 {
                // The path doubles back on itself; fall back to the
                // incoming segment's normal.
                normals[i - 1]
            } else {
                Point::new(sum.x / len, sum.y / len)
            }
        };
        let scale = if i == 0 || i == pts.len() - 1 {
            hw
        } else {
            // Miter: lengthen the offset so the join's outer edges meet,
            // limited for nearly-reversing joins.
            let dot = (n.x * normals[i].x + n.y * normals[i].y).max(0.2);
            hw / dot
        };
        left.push(*pt + n * scale);
        right.push(*pt - n * scale);
    }
    right.reverse();
    left.extend(right);
    Polygon::new(left)
}

fn dedup_consecutive(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().map(|&q| p.distance_to(q) > 1e-12).unwrap_or(true) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;
    use crate::ShapeOps;

    #[test]
    fn strip_spans_length_and_width() {
        let s = strip(100.0, 5.0).unwrap();
        assert_eq!(s.points[0], Point::new(0.0, -2.5));
        assert_eq!(s.points[2], Point::new(100.0, 2.5));
    }

    #[test]
    fn strip_rejects_nonpositive_dimensions() {
        assert_eq!(
            strip(0.0, 5.0),
            Err(GeometryError::NonPositive {
                name: "length",
                value: 0.0
            })
        );
        assert!(strip(10.0, -1.0).is_err());
    }

    #[test]
    fn taper_interpolates_widths() {
        let t = taper(50.0, 10.0, 4.0).unwrap();
        assert_eq!(t.points[0], Point::new(0.0, -5.0));
        assert_eq!(t.points[1], Point::new(50.0, -2.0));
        assert_eq!(t.points[3], Point::new(0.0, 5.0));
    }

    #[test]
    fn arc_bounds_radii() {
        let a = arc(20.0, 4.0, 90.0).unwrap();
        for p in &a.points {
            let r = p.distance_to(Point::zero());
            assert!(r > 18.0 - 1e-9 && r < 22.0 + 1e-9);
        }
        // The inner boundary starts on the x axis.
        let first = a.points.first().unwrap();
        assert_float_eq!(first.y, 0.0, abs <= 1e-12);
        assert_float_eq!(first.x, 18.0, abs <= 1e-12);
    }

    #[test]
    fn arc_rejects_wide_trace() {
        assert_eq!(
            arc(2.0, 4.0, 90.0),
            Err(GeometryError::RadiusTooSmall {
                radius: 2.0,
                width: 4.0
            })
        );
        assert_eq!(
            arc(10.0, 1.0, 0.0),
            Err(GeometryError::SpanOutOfRange { value: 0.0 })
        );
        assert!(arc(10.0, 1.0, 361.0).is_err());
    }

    #[test]
    fn spiral_starts_inner_ends_outer() {
        let s = spiral(3.0, 8.0, 30.0, 5.0).unwrap();
        let first = s.points.first().unwrap();
        let last = s.points.last().unwrap();
        assert_float_eq!(first.distance_to(Point::zero()), 30.0, abs <= 1e-9);
        assert_float_eq!(last.distance_to(Point::zero()), 54.0, abs <= 1e-9);
    }

    #[test]
    fn spiral_rejects_tight_spacing() {
        assert_eq!(
            spiral(3.0, 5.0, 30.0, 5.0),
            Err(GeometryError::SpacingTooTight {
                spacing: 5.0,
                width: 5.0
            })
        );
    }

    #[test]
    fn stroked_path_has_full_width() {
        let path = Path::new(vec![Point::zero(), Point::new(10.0, 0.0)], 2.0);
        let poly = path.to_poly();
        assert_eq!(poly.points.len(), 4);
        assert_float_eq!(poly.points[0].y, 1.0, abs <= 1e-12);
        assert_float_eq!(poly.points[3].y, -1.0, abs <= 1e-12);
    }

    #[test]
    fn stroke_right_angle_miters_outward() {
        let path = Path::new(
            vec![Point::zero(), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
            2.0,
        );
        let poly = path.to_poly();
        // 6 vertices: 3 left, 3 right.
        assert_eq!(poly.points.len(), 6);
        // The outer corner of the elbow sits at (11, -1).
        assert!(poly
            .points
            .iter()
            .any(|p| p.distance_to(Point::new(11.0, -1.0)) < 1e-9));
    }
}
