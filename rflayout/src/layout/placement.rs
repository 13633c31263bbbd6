//! Placement resolution: from port connections to absolute transforms.
//!
//! Components form an undirected connectivity structure through their
//! connections. Each connected group must contain exactly one explicitly
//! placed component — the anchor — from which every other member's
//! transform is derived by chaining the port-mating rule breadth-first
//! along the edges. Traversal order is fixed by arena and edge insertion
//! order, so resolving the same design twice yields bit-identical
//! transforms.

use std::collections::VecDeque;

use arcstr::ArcStr;
use itertools::Itertools;
use rfgeom::transform::{Transform, Transformation};
use rfgeom::{wrap_angle, Point};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use thiserror::Error;

use super::cell::{LayoutCell, Port};

new_key_type! {
    /// A stable identifier for a component instance in the placement arena.
    pub struct CompKey;
}

/// Numeric tolerance for agreeing placements reached along different
/// paths, in design units and degrees.
pub const PLACEMENT_TOLERANCE: f64 = 1e-6;

/// An absolute component placement: translation plus rotation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    /// The component origin's absolute position.
    pub loc: Point,
    /// Rotation in degrees, counterclockwise about the component origin.
    pub rotation: f64,
}

impl Placement {
    /// Creates a new [`Placement`].
    pub fn new(loc: impl Into<Point>, rotation: f64) -> Self {
        Self {
            loc: loc.into(),
            rotation,
        }
    }

    /// The transformation taking local cell coordinates to absolute ones.
    pub fn transformation(&self) -> Transformation {
        Transformation::with_loc_and_angle(self.loc, self.rotation)
    }
}

/// The port-mating convention: the rotation from a source port's outward
/// direction to the mated target port's outward direction.
///
/// Ports connect face-to-face, so the default offset is 180 degrees. The
/// offset is kept configurable so the convention can be verified against a
/// reference layout before fabrication-grade use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatingRule {
    pub angle_offset: f64,
}

impl Default for MatingRule {
    fn default() -> Self {
        Self {
            angle_offset: 180.0,
        }
    }
}

/// A placement-resolution failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlaceError {
    /// A connected group with zero or several explicitly placed components.
    #[error(
        "ambiguous placement for connected components [{}]: found {} explicit placements, need exactly one",
        .components.iter().join(", "),
        .anchors
    )]
    Ambiguous {
        components: Vec<ArcStr>,
        anchors: usize,
    },

    /// A component with neither an explicit placement nor any connection.
    #[error("component `{component}` has no explicit placement and no connections")]
    Unplaced { component: ArcStr },

    /// A component reached along two paths that disagree about where it
    /// belongs.
    #[error(
        "conflicting placements for component `{component}`: positions differ by {position_error}, rotations by {rotation_error} degrees"
    )]
    Inconsistent {
        component: ArcStr,
        position_error: f64,
        rotation_error: f64,
    },
}

/// One component's inputs to placement resolution.
#[derive(Debug, Clone)]
pub struct PlaceNode<'a> {
    /// The component's name, for error reporting.
    pub name: ArcStr,
    /// The component's explicit placement, if the design gave one.
    pub explicit: Option<Placement>,
    /// The component's generated cell. `None` marks a component whose
    /// generation failed or whose connections were structurally invalid;
    /// groups containing such components are skipped here because their
    /// defects are reported elsewhere.
    pub cell: Option<&'a LayoutCell>,
}

/// A directed port-to-port connection between two arena components.
#[derive(Debug, Clone)]
pub struct PlaceEdge {
    pub source: CompKey,
    pub source_port: ArcStr,
    pub target: CompKey,
    pub target_port: ArcStr,
}

/// Computes the placement of the component owning `to_port` such that
/// `to_port` lands on `from_port` with its outward direction rotated by
/// `offset` degrees from `from_port`'s.
fn mate(from: Placement, from_port: &Port, to_port: &Port, offset: f64) -> Placement {
    let at = from_port.loc.transform(from.transformation());
    let facing = wrap_angle(from.rotation + from_port.orientation);
    let port_facing = wrap_angle(facing + offset);
    let rotation = wrap_angle(port_facing - to_port.orientation);
    let loc = at - to_port.loc.transform(Transformation::rotate(rotation));
    Placement { loc, rotation }
}

/// The smallest angular separation between two angles, in degrees.
fn angle_difference(a: f64, b: f64) -> f64 {
    let d = wrap_angle(a - b);
    d.min(360.0 - d)
}

fn port_of<'a>(
    nodes: &SlotMap<CompKey, PlaceNode<'a>>,
    key: CompKey,
    name: &str,
) -> Option<&'a Port> {
    nodes.get(key)?.cell?.port(name).ok()
}

/// Resolves one absolute placement per component.
///
/// `order` fixes the iteration order over the arena; `edges` are walked in
/// insertion order during the breadth-first traversal. Returns the
/// placements of every successfully resolved component together with all
/// placement errors found; one ambiguity error is reported per connected
/// group, and each inconsistent component is reported once.
pub fn resolve<'a>(
    nodes: &SlotMap<CompKey, PlaceNode<'a>>,
    order: &[CompKey],
    edges: &[PlaceEdge],
    rule: MatingRule,
) -> (SecondaryMap<CompKey, Placement>, Vec<PlaceError>) {
    let mut adjacency: SecondaryMap<CompKey, Vec<usize>> = SecondaryMap::new();
    for &key in order {
        adjacency.insert(key, Vec::new());
    }
    for (idx, edge) in edges.iter().enumerate() {
        adjacency[edge.source].push(idx);
        if edge.target != edge.source {
            adjacency[edge.target].push(idx);
        }
    }

    let mut placements: SecondaryMap<CompKey, Placement> = SecondaryMap::new();
    let mut errors = Vec::new();
    let mut visited: SecondaryMap<CompKey, ()> = SecondaryMap::new();

    for &start in order {
        if visited.contains_key(start) {
            continue;
        }

        // Gather the connected group and its edges.
        let mut members = vec![start];
        let mut group_edges = Vec::new();
        visited.insert(start, ());
        let mut queue = VecDeque::from([start]);
        while let Some(k) = queue.pop_front() {
            for &ei in &adjacency[k] {
                let e = &edges[ei];
                if !group_edges.contains(&ei) {
                    group_edges.push(ei);
                }
                let other = if e.source == k { e.target } else { e.source };
                if !visited.contains_key(other) {
                    visited.insert(other, ());
                    members.push(other);
                    queue.push_back(other);
                }
            }
        }

        // An unconnected component either anchors itself or is an error.
        if members.len() == 1 && group_edges.is_empty() {
            match nodes[start].explicit {
                Some(p) => {
                    placements.insert(start, p);
                }
                None if nodes[start].cell.is_some() => {
                    errors.push(PlaceError::Unplaced {
                        component: nodes[start].name.clone(),
                    });
                }
                None => {}
            }
            continue;
        }

        let anchors: Vec<CompKey> = members
            .iter()
            .copied()
            .filter(|&k| nodes[k].explicit.is_some())
            .collect();
        if anchors.len() != 1 {
            errors.push(PlaceError::Ambiguous {
                components: members.iter().map(|&k| nodes[k].name.clone()).collect(),
                anchors: anchors.len(),
            });
            continue;
        }

        // Groups with failed members are skipped: their defects are
        // already reported by generation or structural validation.
        let complete = members.iter().all(|&k| nodes[k].cell.is_some())
            && group_edges.iter().all(|&ei| {
                let e = &edges[ei];
                port_of(nodes, e.source, &e.source_port).is_some()
                    && port_of(nodes, e.target, &e.target_port).is_some()
            });
        if !complete {
            continue;
        }

        let anchor = anchors[0];
        let Some(anchor_placement) = nodes[anchor].explicit else {
            continue;
        };
        placements.insert(anchor, anchor_placement);

        let mut reported: SecondaryMap<CompKey, ()> = SecondaryMap::new();
        let mut queue = VecDeque::from([anchor]);
        while let Some(k) = queue.pop_front() {
            let from_place = placements[k];
            for &ei in &adjacency[k] {
                let e = &edges[ei];
                let (other, from_port, to_port, offset) = if e.source == k {
                    (e.target, &e.source_port, &e.target_port, rule.angle_offset)
                } else {
                    (e.source, &e.target_port, &e.source_port, -rule.angle_offset)
                };
                let (Some(from_port), Some(to_port)) =
                    (port_of(nodes, k, from_port), port_of(nodes, other, to_port))
                else {
                    continue;
                };
                let candidate = mate(from_place, from_port, to_port, offset);
                match placements.get(other).copied() {
                    None => {
                        placements.insert(other, candidate);
                        queue.push_back(other);
                    }
                    Some(existing) => {
                        let position_error = existing.loc.distance_to(candidate.loc);
                        let rotation_error =
                            angle_difference(existing.rotation, candidate.rotation);
                        if (position_error > PLACEMENT_TOLERANCE
                            || rotation_error > PLACEMENT_TOLERANCE)
                            && !reported.contains_key(other)
                        {
                            reported.insert(other, ());
                            errors.push(PlaceError::Inconsistent {
                                component: nodes[other].name.clone(),
                                position_error,
                                rotation_error,
                            });
                        }
                    }
                }
            }
        }
    }

    (placements, errors)
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;
    use crate::layout::layers::LayerSpec;

    #[test]
    fn angle_difference_wraps() {
        assert_float_eq!(angle_difference(359.0, 1.0), 2.0, abs <= 1e-12);
        assert_float_eq!(angle_difference(90.0, 270.0), 180.0, abs <= 1e-12);
        assert_float_eq!(angle_difference(5.0, 5.0), 0.0, abs <= 1e-12);
    }

    #[test]
    fn mate_places_ports_face_to_face() {
        let layer = LayerSpec(1, 0);
        let from = Port::new("out", (100.0, 0.0), 0.0, 5.0, layer);
        let to = Port::new("in", (0.0, 0.0), 180.0, 5.0, layer);
        let placement = mate(Placement::default(), &from, &to, 180.0);
        assert_float_eq!(placement.loc.x, 100.0, abs <= 1e-9);
        assert_float_eq!(placement.loc.y, 0.0, abs <= 1e-9);
        assert_float_eq!(placement.rotation, 0.0, abs <= 1e-9);
    }

    #[test]
    fn mate_rotates_the_target_component() {
        let layer = LayerSpec(1, 0);
        // Source port faces +y; a target port facing 180 locally must end
        // up facing 270, rotating its component by 90 degrees.
        let from = Port::new("out", (0.0, 50.0), 90.0, 5.0, layer);
        let to = Port::new("in", (10.0, 0.0), 180.0, 5.0, layer);
        let placement = mate(Placement::default(), &from, &to, 180.0);
        assert_float_eq!(placement.rotation, 90.0, abs <= 1e-9);
        // The target port must land on the source port.
        let landed = to
            .loc
            .transform(placement.transformation());
        assert_float_eq!(landed.x, 0.0, abs <= 1e-9);
        assert_float_eq!(landed.y, 50.0, abs <= 1e-9);
    }
}
