//! The parsed-design data model.
//!
//! Values of these types arrive from the parsing/validation front end
//! already syntactically well-formed: type-checked scalars and no missing
//! required top-level fields. The engine treats them as immutable and is
//! responsible for their *placement* feasibility, not their shape.

use arcstr::ArcStr;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::component::ComponentKind;
use crate::layout::placement::Placement;
use crate::param::Params;

/// A complete RF design: named component instances plus the connections
/// among them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    /// The design's name; becomes the top layout node's name.
    pub name: ArcStr,
    /// The technology whose layer bindings the design expects.
    pub technology: ArcStr,
    /// Length units of all coordinates, carried through to the output
    /// verbatim.
    #[serde(default = "default_units")]
    pub units: ArcStr,
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

fn default_units() -> ArcStr {
    arcstr::literal!("um")
}

impl Design {
    /// Creates an empty design.
    pub fn new(name: impl Into<ArcStr>, technology: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            technology: technology.into(),
            units: default_units(),
            components: Vec::new(),
        }
    }

    /// Adds a component, builder-style.
    pub fn with_component(mut self, spec: ComponentSpec) -> Self {
        self.components.push(spec);
        self
    }
}

/// One component instance in a design.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct ComponentSpec {
    /// The instance name, unique within the design.
    pub name: ArcStr,
    /// Selects the generator for this component.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// The generator's parameters.
    #[serde(default)]
    #[builder(default)]
    pub params: Params,
    /// Explicit placement. Exactly one component per connected group (the
    /// anchor) carries one; isolated components must.
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    pub placement: Option<Placement>,
    /// Outgoing connections from this component's ports.
    #[serde(default)]
    #[builder(default)]
    pub connections: Vec<Connection>,
}

impl ComponentSpec {
    /// Creates a new [`ComponentSpecBuilder`].
    #[inline]
    pub fn builder() -> ComponentSpecBuilder {
        ComponentSpecBuilder::default()
    }
}

/// A directed connection: a port on this component mates with a port on
/// the target component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection {
    /// The source port on the component carrying this connection.
    pub port: ArcStr,
    /// The target component's name.
    pub target: ArcStr,
    /// The port on the target component.
    pub target_port: ArcStr,
}

impl Connection {
    /// Creates a new [`Connection`].
    pub fn new(
        port: impl Into<ArcStr>,
        target: impl Into<ArcStr>,
        target_port: impl Into<ArcStr>,
    ) -> Self {
        Self {
            port: port.into(),
            target: target.into(),
            target_port: target_port.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{MicrostripLine, SpiralInductor};

    #[test]
    fn builder_fills_defaults() {
        let spec = ComponentSpec::builder()
            .name("feed")
            .kind(MicrostripLine)
            .build()
            .unwrap();
        assert_eq!(spec.name, "feed");
        assert!(spec.placement.is_none());
        assert!(spec.connections.is_empty());
    }

    #[test]
    fn kind_builds_from_any_generator() {
        let spec = ComponentSpec::builder()
            .name("l1")
            .kind(SpiralInductor)
            .build()
            .unwrap();
        assert_eq!(spec.kind.tag(), "spiral_inductor");
    }
}
