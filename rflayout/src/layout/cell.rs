//! Generated component cells: local geometry plus named ports.

use arcstr::ArcStr;
use rfgeom::bbox::{Bbox, BoundBox};
use rfgeom::transform::{Transform, Transformation};
use rfgeom::{wrap_angle, Point, Shape};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layers::LayerSpec;

/// A primitive geometric element: a shape on a physical layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    /// The physical layer the shape is drawn on.
    pub layer: LayerSpec,
    /// The element's shape, in its owning cell's coordinate frame.
    pub shape: Shape,
}

impl Element {
    /// Creates a new [`Element`].
    pub fn new(layer: LayerSpec, shape: impl Into<Shape>) -> Self {
        Self {
            layer,
            shape: shape.into(),
        }
    }
}

impl Transform for Element {
    fn transform(&self, trans: Transformation) -> Self {
        Self {
            layer: self.layer,
            shape: self.shape.transform(trans),
        }
    }
}

impl BoundBox for Element {
    #[inline]
    fn bbox(&self) -> Bbox {
        self.shape.bbox()
    }
}

/// How many connections a port may participate in.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Fanout {
    /// The port joins at most one connection.
    #[default]
    Single,
    /// The port may source or sink several connections, e.g. a power
    /// divider output feeding more than one load.
    Multi,
}

/// A named, oriented attachment point on a component's geometry.
///
/// Ports are the only legal connection points between components.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Port {
    /// The port's name, unique within its owning cell.
    pub name: ArcStr,
    /// Port center, in the owning cell's coordinate frame.
    pub loc: Point,
    /// Outward-facing direction in degrees, normalized to `[0, 360)`.
    pub orientation: f64,
    /// Connection face width.
    pub width: f64,
    /// The physical layer the port connects on.
    pub layer: LayerSpec,
    /// How many connections the port accepts.
    pub fanout: Fanout,
}

impl Port {
    /// Creates a new single-connection [`Port`].
    pub fn new(
        name: impl Into<ArcStr>,
        loc: impl Into<Point>,
        orientation: f64,
        width: f64,
        layer: LayerSpec,
    ) -> Self {
        Self {
            name: name.into(),
            loc: loc.into(),
            orientation: wrap_angle(orientation),
            width,
            layer,
            fanout: Fanout::Single,
        }
    }

    /// Overrides the port's connection capacity.
    pub fn with_fanout(mut self, fanout: Fanout) -> Self {
        self.fanout = fanout;
        self
    }
}

impl Transform for Port {
    fn transform(&self, trans: Transformation) -> Self {
        Self {
            name: self.name.clone(),
            loc: self.loc.transform(trans),
            orientation: wrap_angle(self.orientation + trans.angle()),
            width: self.width,
            layer: self.layer,
            fanout: self.fanout,
        }
    }
}

/// An enumeration of port-related errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PortError {
    /// The desired port was not found.
    #[error("port not found: {0}")]
    PortNotFound(ArcStr),

    /// Port already exists.
    #[error("port already exists: {0}")]
    PortAlreadyExists(ArcStr),
}

/// The geometry a generator emits for one component: primitive elements
/// plus the component's documented ports, all in a local coordinate frame.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LayoutCell {
    /// The cell's name.
    name: ArcStr,
    /// The cell's geometric elements.
    elems: Vec<Element>,
    /// The cell's connection points.
    ports: Vec<Port>,
}

impl LayoutCell {
    /// Creates a new and empty cell.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the name of the cell.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Draws a shape on the given layer.
    pub fn draw(&mut self, layer: LayerSpec, shape: impl Into<Shape>) {
        self.elems.push(Element::new(layer, shape));
    }

    /// Adds a [`Port`] to the cell.
    pub fn add_port(&mut self, port: Port) -> Result<(), PortError> {
        if self.ports.iter().any(|p| p.name == port.name) {
            return Err(PortError::PortAlreadyExists(port.name));
        }
        self.ports.push(port);
        Ok(())
    }

    /// Retrieves a reference to the port named `name`.
    pub fn port(&self, name: &str) -> Result<&Port, PortError> {
        self.ports
            .iter()
            .find(|p| p.name.as_str() == name)
            .ok_or_else(|| PortError::PortNotFound(ArcStr::from(name)))
    }

    /// Returns an iterator over the ports in the cell.
    #[inline]
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter()
    }

    /// Returns an iterator over the elements in the cell.
    #[inline]
    pub fn elems(&self) -> impl Iterator<Item = &Element> {
        self.elems.iter()
    }

    /// Decomposes the cell into its name, elements, and ports.
    pub(crate) fn into_parts(self) -> (ArcStr, Vec<Element>, Vec<Port>) {
        (self.name, self.elems, self.ports)
    }
}

impl Transform for LayoutCell {
    fn transform(&self, trans: Transformation) -> Self {
        Self {
            name: self.name.clone(),
            elems: self.elems.iter().map(|e| e.transform(trans)).collect(),
            ports: self.ports.iter().map(|p| p.transform(trans)).collect(),
        }
    }
}

impl BoundBox for LayoutCell {
    fn bbox(&self) -> Bbox {
        let mut bbox = Bbox::empty();
        for elem in &self.elems {
            bbox = bbox.union(elem.bbox());
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;
    use rfgeom::Polygon;

    use super::*;

    #[test]
    fn duplicate_port_rejected() {
        let mut cell = LayoutCell::new("t");
        let layer = LayerSpec(1, 0);
        cell.add_port(Port::new("in", (0.0, 0.0), 180.0, 1.0, layer))
            .unwrap();
        assert_eq!(
            cell.add_port(Port::new("in", (1.0, 0.0), 0.0, 1.0, layer)),
            Err(PortError::PortAlreadyExists(ArcStr::from("in")))
        );
    }

    #[test]
    fn transform_rotates_port_orientation() {
        let layer = LayerSpec(1, 0);
        let port = Port::new("out", (10.0, 0.0), 0.0, 2.0, layer);
        let tf = Transformation::with_loc_and_angle(Point::new(5.0, 0.0), 90.0);
        let moved = port.transform(tf);
        assert_float_eq!(moved.orientation, 90.0, abs <= 1e-9);
        assert_float_eq!(moved.loc.x, 5.0, abs <= 1e-9);
        assert_float_eq!(moved.loc.y, 10.0, abs <= 1e-9);
    }

    #[test]
    fn cell_bbox_unions_elements() {
        let mut cell = LayoutCell::new("t");
        let layer = LayerSpec(1, 0);
        cell.draw(
            layer,
            Polygon::rect(Point::new(0.0, 0.0), Point::new(2.0, 1.0)),
        );
        cell.draw(
            layer,
            Polygon::rect(Point::new(-1.0, -3.0), Point::new(0.0, 0.0)),
        );
        let bbox = cell.bbox();
        assert_eq!(bbox.p0, Point::new(-1.0, -3.0));
        assert_eq!(bbox.p1, Point::new(2.0, 1.0));
    }
}
