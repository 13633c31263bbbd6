//! A generic RF technology for tests and examples.
//!
//! Models a typical thin-film RF stack: two metal levels, a connecting
//! via, thin-film resistor material, and a MIM dielectric. Real target
//! processes supply their own [`LayerMap`] with the same roles.

use rflayout::layout::layers::{LayerMap, LayerRole, LayerSpec};

/// The technology name designs reference.
pub const TECHNOLOGY: &str = "generic";

/// The generic technology's layer bindings.
pub fn layer_map() -> LayerMap {
    LayerMap::new(TECHNOLOGY)
        .bind(LayerRole::Conductor, LayerSpec(1, 0))
        .bind(LayerRole::Underpass, LayerSpec(2, 0))
        .bind(LayerRole::Via, LayerSpec(4, 0))
        .bind(LayerRole::Resistor, LayerSpec(6, 0))
        .bind(LayerRole::Dielectric, LayerSpec(7, 0))
}
