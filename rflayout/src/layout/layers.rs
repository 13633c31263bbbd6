//! Layer roles and the per-design technology mapping.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A physical mask layer: GDS layer and datatype indices.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct LayerSpec(pub i16, pub i16);

impl LayerSpec {
    /// Returns the layer index.
    #[inline]
    pub fn layer(&self) -> i16 {
        self.0
    }

    /// Returns the datatype index.
    #[inline]
    pub fn datatype(&self) -> i16 {
        self.1
    }
}

impl fmt::Display for LayerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}

/// A logical layer role referenced by component generators.
///
/// Roles are bound to physical layers per design by a [`LayerMap`], so the
/// same generator targets any process whose technology supplies bindings.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LayerRole {
    /// The primary signal conductor.
    Conductor,
    /// A lower conductor used for crossovers, solenoid return windings,
    /// and capacitor bottom plates.
    Underpass,
    /// Vias connecting the conductor and underpass layers.
    Via,
    /// Thin-film resistor material.
    Resistor,
    /// Capacitor dielectric.
    Dielectric,
    /// Named role, not first-class supported.
    Named(ArcStr),
}

impl fmt::Display for LayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conductor => write!(f, "conductor"),
            Self::Underpass => write!(f, "underpass"),
            Self::Via => write!(f, "via"),
            Self::Resistor => write!(f, "resistor"),
            Self::Dielectric => write!(f, "dielectric"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for LayerRole {
    type Err = std::convert::Infallible;
    fn from_str(role: &str) -> Result<Self, Self::Err> {
        Ok(match role {
            "conductor" => Self::Conductor,
            "underpass" => Self::Underpass,
            "via" => Self::Via,
            "resistor" => Self::Resistor,
            "dielectric" => Self::Dielectric,
            _ => Self::Named(ArcStr::from(role)),
        })
    }
}

/// An error looking up a layer binding.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LayerError {
    /// The technology does not bind the requested role.
    #[error("no layer bound for role `{0}`")]
    Unmapped(LayerRole),
}

/// Binds logical layer roles to physical layers for one technology.
///
/// Supplied per design by the technology collaborator; generators and the
/// assembler receive it explicitly so resolution runs stay reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerMap {
    name: ArcStr,
    bindings: HashMap<LayerRole, LayerSpec>,
}

impl LayerMap {
    /// Creates an empty mapping for the named technology.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            bindings: HashMap::new(),
        }
    }

    /// Returns the technology name.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Binds `role` to `spec`, builder-style, replacing any existing binding.
    pub fn bind(mut self, role: LayerRole, spec: LayerSpec) -> Self {
        self.bindings.insert(role, spec);
        self
    }

    /// Binds `role` to `spec`, replacing any existing binding.
    pub fn insert(&mut self, role: LayerRole, spec: LayerSpec) {
        self.bindings.insert(role, spec);
    }

    /// Looks up the physical layer bound to `role`.
    pub fn get(&self, role: &LayerRole) -> Result<LayerSpec, LayerError> {
        self.bindings
            .get(role)
            .copied()
            .ok_or_else(|| LayerError::Unmapped(role.clone()))
    }
}
