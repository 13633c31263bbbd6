//! Structural validation of a design against its generated cells.
//!
//! The checks here are global: names, connection endpoints, and port
//! fan-out. All violations found in one pass are reported together so a
//! malformed design surfaces every problem at once.

use std::collections::HashMap;
use std::fmt;

use arcstr::ArcStr;
use itertools::Itertools;
use thiserror::Error;

use super::cell::{Fanout, LayoutCell};
use crate::design::Design;

/// A single structural defect.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    /// Two or more components share a name.
    #[error("duplicate component name `{name}` ({count} definitions)")]
    DuplicateName { name: ArcStr, count: usize },

    /// A connection from a port its component does not have.
    #[error("component `{component}` connects from unknown port `{port}`")]
    UnknownSourcePort { component: ArcStr, port: ArcStr },

    /// A connection to a component the design does not contain.
    #[error("component `{component}` connects to unknown component `{target}`")]
    UnknownTarget { component: ArcStr, target: ArcStr },

    /// A connection to a port its target does not have.
    #[error("component `{component}` connects to unknown port `{target}.{port}`")]
    UnknownTargetPort {
        component: ArcStr,
        target: ArcStr,
        port: ArcStr,
    },

    /// A single-connection port sourcing several connections.
    #[error("port `{component}.{port}` sources {count} connections but allows one")]
    SourceFanout {
        component: ArcStr,
        port: ArcStr,
        count: usize,
    },

    /// A single-connection port consumed by several connections.
    #[error("port `{component}.{port}` is consumed by {count} connections but allows one")]
    TargetFanout {
        component: ArcStr,
        port: ArcStr,
        count: usize,
    },
}

impl Violation {
    /// The name of the component the violation is reported against.
    pub fn component(&self) -> &ArcStr {
        match self {
            Self::DuplicateName { name, .. } => name,
            Self::UnknownSourcePort { component, .. } => component,
            Self::UnknownTarget { component, .. } => component,
            Self::UnknownTargetPort { component, .. } => component,
            Self::SourceFanout { component, .. } => component,
            Self::TargetFanout { component, .. } => component,
        }
    }

    /// Every component name the violation involves.
    pub(crate) fn touches(&self) -> Vec<&ArcStr> {
        match self {
            Self::DuplicateName { name, .. } => vec![name],
            Self::UnknownSourcePort { component, .. } => vec![component],
            Self::UnknownTarget { component, target } => vec![component, target],
            Self::UnknownTargetPort {
                component, target, ..
            } => vec![component, target],
            Self::SourceFanout { component, .. } => vec![component],
            Self::TargetFanout { component, .. } => vec![component],
        }
    }
}

/// Every structural violation found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over the violations.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s)", self.0.len())?;
        for v in &self.0 {
            write!(f, "\n  - {v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

/// Checks the design's structure against its generated cells.
///
/// `cells` maps component names to their generated cells; components whose
/// generation failed are absent, and their port checks are skipped (the
/// generation failure is reported separately). Violations come out in
/// design order.
pub(crate) fn check(design: &Design, cells: &HashMap<ArcStr, &LayoutCell>) -> Violations {
    let mut violations = Vec::new();

    // Component names must be unique design-wide.
    let counts = design.components.iter().map(|c| &c.name).counts();
    let mut flagged: Vec<&ArcStr> = Vec::new();
    for spec in &design.components {
        let count = counts[&spec.name];
        if count > 1 && !flagged.contains(&&spec.name) {
            flagged.push(&spec.name);
            violations.push(Violation::DuplicateName {
                name: spec.name.clone(),
                count,
            });
        }
    }

    let known: HashMap<&ArcStr, ()> = design.components.iter().map(|c| (&c.name, ())).collect();

    // Connection endpoints must exist.
    for spec in &design.components {
        for conn in &spec.connections {
            if let Some(cell) = cells.get(&spec.name) {
                if cell.port(&conn.port).is_err() {
                    violations.push(Violation::UnknownSourcePort {
                        component: spec.name.clone(),
                        port: conn.port.clone(),
                    });
                }
            }
            if !known.contains_key(&conn.target) {
                violations.push(Violation::UnknownTarget {
                    component: spec.name.clone(),
                    target: conn.target.clone(),
                });
            } else if let Some(cell) = cells.get(&conn.target) {
                if cell.port(&conn.target_port).is_err() {
                    violations.push(Violation::UnknownTargetPort {
                        component: spec.name.clone(),
                        target: conn.target.clone(),
                        port: conn.target_port.clone(),
                    });
                }
            }
        }
    }

    // A port joins at most one connection unless its generator marked it
    // multi-connection (e.g. divider outputs).
    let mut sourced: HashMap<(&ArcStr, &ArcStr), usize> = HashMap::new();
    let mut consumed: HashMap<(&ArcStr, &ArcStr), usize> = HashMap::new();
    for spec in &design.components {
        for conn in &spec.connections {
            *sourced.entry((&spec.name, &conn.port)).or_insert(0) += 1;
            *consumed.entry((&conn.target, &conn.target_port)).or_insert(0) += 1;
        }
    }
    let multi = |component: &ArcStr, port: &ArcStr| {
        cells
            .get(component)
            .and_then(|cell| cell.port(port).ok())
            .map(|p| p.fanout == Fanout::Multi)
            .unwrap_or(false)
    };
    let mut seen_sources: Vec<(&ArcStr, &ArcStr)> = Vec::new();
    let mut seen_targets: Vec<(&ArcStr, &ArcStr)> = Vec::new();
    for spec in &design.components {
        for conn in &spec.connections {
            let source = (&spec.name, &conn.port);
            let count = sourced[&source];
            if count > 1 && !multi(source.0, source.1) && !seen_sources.contains(&source) {
                seen_sources.push(source);
                violations.push(Violation::SourceFanout {
                    component: spec.name.clone(),
                    port: conn.port.clone(),
                    count,
                });
            }
            let target = (&conn.target, &conn.target_port);
            let count = consumed[&target];
            if count > 1
                && known.contains_key(&conn.target)
                && !multi(target.0, target.1)
                && !seen_targets.contains(&target)
            {
                seen_targets.push(target);
                violations.push(Violation::TargetFanout {
                    component: conn.target.clone(),
                    port: conn.target_port.clone(),
                    count,
                });
            }
        }
    }

    Violations(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::MicrostripLine;
    use crate::design::{ComponentSpec, Connection, Design};
    use crate::layout::layers::{LayerMap, LayerRole, LayerSpec};
    use crate::layout::placement::Placement;
    use crate::param::Params;

    fn line(name: &str) -> ComponentSpec {
        ComponentSpec::builder()
            .name(name)
            .kind(MicrostripLine)
            .params(Params::new().with("length", 10.0).with("width", 2.0))
            .placement(Placement::default())
            .build()
            .unwrap()
    }

    fn tech() -> LayerMap {
        LayerMap::new("test").bind(LayerRole::Conductor, LayerSpec(1, 0))
    }

    #[test]
    fn reports_every_violation_at_once() {
        use crate::component::Generate;

        let mut a = line("a");
        a.connections.push(Connection::new("out", "ghost", "in"));
        a.connections.push(Connection::new("nope", "b", "in"));
        let b = line("b");
        let b2 = line("b");
        let design = Design::new("d", "test")
            .with_component(a)
            .with_component(b)
            .with_component(b2);

        let layers = tech();
        let params = Params::new().with("length", 10.0).with("width", 2.0);
        let cell = MicrostripLine.generate(&params, &layers).unwrap();
        let cells: HashMap<ArcStr, &LayoutCell> = design
            .components
            .iter()
            .map(|c| (c.name.clone(), &cell))
            .collect();

        let violations = check(&design, &cells);
        assert_eq!(violations.len(), 3);
        assert!(matches!(
            violations.0[0],
            Violation::DuplicateName { ref name, count: 2 } if name == "b"
        ));
        assert!(matches!(violations.0[1], Violation::UnknownTarget { .. }));
        assert!(matches!(
            violations.0[2],
            Violation::UnknownSourcePort { .. }
        ));
    }
}
