//! The layout assembly pipeline.
//!
//! `assemble` runs the full synchronous pipeline over a design: generate
//! every component's cell, check global structure, resolve placements, and
//! merge everything into the final layout tree. Failures in one component
//! or connected group never stop the checks on unrelated ones; the caller
//! receives every error found in one [`ErrorReport`].

use std::collections::{HashMap, HashSet};

use arcstr::ArcStr;
use rfgeom::transform::Transform;
use slotmap::SlotMap;

use super::cell::LayoutCell;
use super::layers::LayerMap;
use super::placement::{resolve, CompKey, MatingRule, PlaceEdge, PlaceNode, Placement};
use super::validate::check;
use super::{Layout, LayoutNode};
use crate::component::Generate;
use crate::design::Design;
use crate::error::{Error, ErrorReport};
use crate::log::{debug, warn};

/// Assembles `design` into a layout using the default port-mating rule.
pub fn assemble(design: &Design, layers: &LayerMap) -> Result<Layout, ErrorReport> {
    assemble_with(design, layers, MatingRule::default())
}

/// Assembles `design` into a layout.
///
/// Pipeline: generate each component's cell, validate the design's
/// structure against the generated cells, resolve placements per connected
/// group, then apply each resolved transform and collect the layout tree.
/// On any failure, returns every error collected across the pipeline.
pub fn assemble_with(
    design: &Design,
    layers: &LayerMap,
    rule: MatingRule,
) -> Result<Layout, ErrorReport> {
    debug!(
        "assembling design `{}` with technology `{}`",
        design.name,
        layers.name()
    );
    if design.technology != *layers.name() {
        warn!(
            "design `{}` expects technology `{}` but was given `{}`",
            design.name,
            design.technology,
            layers.name()
        );
    }

    // Generate every component independently, collecting failures.
    let mut errors: Vec<Error> = Vec::new();
    let cells: Vec<Option<LayoutCell>> = design
        .components
        .iter()
        .map(|spec| match spec.kind.generate(&spec.params, layers) {
            Ok(cell) => Some(cell),
            Err(source) => {
                debug!("generation failed for component `{}`", spec.name);
                errors.push(Error::Generate {
                    component: spec.name.clone(),
                    kind: ArcStr::from(spec.kind.tag()),
                    source,
                });
                None
            }
        })
        .collect();

    // Structural checks run against whatever generated successfully.
    let mut cell_by_name: HashMap<ArcStr, &LayoutCell> = HashMap::new();
    for (spec, cell) in design.components.iter().zip(&cells) {
        if let Some(cell) = cell {
            cell_by_name.entry(spec.name.clone()).or_insert(cell);
        }
    }
    let violations = check(design, &cell_by_name);

    // Components with failed generation or structural defects taint their
    // connected groups; the resolver skips those groups since their
    // problems are already recorded.
    let mut tainted: HashSet<ArcStr> = HashSet::new();
    for (spec, cell) in design.components.iter().zip(&cells) {
        if cell.is_none() {
            tainted.insert(spec.name.clone());
        }
    }
    for violation in violations.iter() {
        for name in violation.touches() {
            tainted.insert(name.clone());
        }
    }

    // Build the placement arena in design order.
    let mut nodes: SlotMap<CompKey, PlaceNode> = SlotMap::with_key();
    let mut order = Vec::with_capacity(design.components.len());
    let mut key_by_name: HashMap<&ArcStr, CompKey> = HashMap::new();
    for (spec, cell) in design.components.iter().zip(&cells) {
        let cell = if tainted.contains(&spec.name) {
            None
        } else {
            cell.as_ref()
        };
        let key = nodes.insert(PlaceNode {
            name: spec.name.clone(),
            explicit: spec.placement,
            cell,
        });
        order.push(key);
        key_by_name.entry(&spec.name).or_insert(key);
    }
    let mut edges = Vec::new();
    for (spec, &source) in design.components.iter().zip(&order) {
        for conn in &spec.connections {
            let Some(&target) = key_by_name.get(&conn.target) else {
                continue;
            };
            edges.push(PlaceEdge {
                source,
                source_port: conn.port.clone(),
                target,
                target_port: conn.target_port.clone(),
            });
        }
    }

    let (placements, place_errors) = resolve(&nodes, &order, &edges, rule);

    if !violations.is_empty() {
        errors.push(Error::Validation(violations));
    }
    errors.extend(place_errors.into_iter().map(Error::from));
    if !errors.is_empty() {
        debug!(
            "design `{}` failed assembly with {} error(s)",
            design.name,
            errors.len()
        );
        return Err(ErrorReport::new(errors));
    }

    // Apply each resolved transform and collect the tree.
    let mut top = LayoutNode::new(
        design.name.clone(),
        Placement::default(),
        Vec::new(),
        Vec::new(),
    );
    for ((spec, cell), &key) in design.components.iter().zip(&cells).zip(&order) {
        let (Some(cell), Some(placement)) = (cell, placements.get(key).copied()) else {
            // Every error path returned above, so this cannot be reached
            // for a well-behaved resolver.
            return Err(ErrorReport::new(vec![Error::Internal(format!(
                "component `{}` left unresolved",
                spec.name
            ))]));
        };
        let placed = cell.transform(placement.transformation());
        let (_, elems, ports) = placed.into_parts();
        top.add_child(LayoutNode::new(spec.name.clone(), placement, elems, ports));
    }
    debug!(
        "assembled design `{}`: {} components",
        design.name,
        design.components.len()
    );
    Ok(Layout::new(design.name.clone(), design.units.clone(), top))
}
