//! APIs for assembled layouts.

use std::collections::BTreeMap;

use arcstr::ArcStr;
use rfgeom::{Polygon, ShapeOps};
use serde::Serialize;

use self::cell::{Element, Port, PortError};
use self::layers::LayerSpec;
use self::placement::Placement;

pub mod assemble;
pub mod cell;
pub mod layers;
pub mod placement;
pub mod validate;

/// The assembled, immutable layout of a complete design.
///
/// Produced by [`assemble`](assemble::assemble); consumed by the layout
/// serializer collaborator. Coordinates are in the design's units, carried
/// through verbatim, with no grid snapping applied.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    name: ArcStr,
    units: ArcStr,
    top: LayoutNode,
}

impl Layout {
    pub(crate) fn new(name: ArcStr, units: ArcStr, top: LayoutNode) -> Self {
        Self { name, units, top }
    }

    /// Returns the layout's name.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Returns the design units the coordinates are expressed in.
    #[inline]
    pub fn units(&self) -> &ArcStr {
        &self.units
    }

    /// Returns the root of the layout tree.
    #[inline]
    pub fn top(&self) -> &LayoutNode {
        &self.top
    }

    /// Flattens the tree into closed polygons grouped by physical layer.
    ///
    /// Paths are stroked to polygons; every polygon is an ordered vertex
    /// sequence with implied closure, ready for a GDSII/OASIS writer.
    pub fn polygons_by_layer(&self) -> BTreeMap<LayerSpec, Vec<Polygon>> {
        let mut by_layer = BTreeMap::new();
        self.top.collect_polygons(&mut by_layer);
        by_layer
    }
}

/// One node of the layout tree.
///
/// Each component becomes a child of the top node, carrying its resolved
/// placement together with its geometry and ports — both already
/// transformed into absolute coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutNode {
    name: ArcStr,
    placement: Placement,
    elems: Vec<Element>,
    ports: Vec<Port>,
    children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub(crate) fn new(
        name: ArcStr,
        placement: Placement,
        elems: Vec<Element>,
        ports: Vec<Port>,
    ) -> Self {
        Self {
            name,
            placement,
            elems,
            ports,
            children: Vec::new(),
        }
    }

    pub(crate) fn add_child(&mut self, child: LayoutNode) {
        self.children.push(child);
    }

    /// Returns the node's name.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Returns the resolved placement this node's geometry was produced
    /// with.
    #[inline]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns an iterator over the node's elements, in absolute
    /// coordinates.
    #[inline]
    pub fn elems(&self) -> impl Iterator<Item = &Element> {
        self.elems.iter()
    }

    /// Returns an iterator over the node's ports, in absolute coordinates.
    #[inline]
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter()
    }

    /// Returns an iterator over the node's children.
    #[inline]
    pub fn children(&self) -> impl Iterator<Item = &LayoutNode> {
        self.children.iter()
    }

    /// Finds the child node named `name`.
    pub fn child(&self, name: &str) -> Option<&LayoutNode> {
        self.children.iter().find(|c| c.name.as_str() == name)
    }

    /// Retrieves a reference to the port named `name`.
    pub fn port(&self, name: &str) -> Result<&Port, PortError> {
        self.ports
            .iter()
            .find(|p| p.name.as_str() == name)
            .ok_or_else(|| PortError::PortNotFound(ArcStr::from(name)))
    }

    fn collect_polygons(&self, by_layer: &mut BTreeMap<LayerSpec, Vec<Polygon>>) {
        for elem in &self.elems {
            by_layer
                .entry(elem.layer)
                .or_insert_with(Vec::new)
                .push(elem.shape.to_poly());
        }
        for child in &self.children {
            child.collect_polygons(by_layer);
        }
    }
}
