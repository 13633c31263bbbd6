//! Placement resolution tests: port mating, anchors, cycles, and
//! determinism, all through the public assembly pipeline.

use float_eq::assert_float_eq;
use rfgeom::Point;
use rflayout::component::{CurvedMicrostripLine, MicrostripLine};
use rflayout::design::{ComponentSpec, Connection, Design};
use rflayout::layout::placement::{MatingRule, PlaceError, Placement};
use rflayout::{assemble, assemble_with, Error};

fn tech() -> rflayout::layout::layers::LayerMap {
    generic_rf_pdk::layer_map()
}

fn line(name: &str, length: f64) -> ComponentSpec {
    ComponentSpec::builder()
        .name(name)
        .kind(MicrostripLine)
        .params(
            rflayout::param::Params::new()
                .with("length", length)
                .with("width", 5.0),
        )
        .build()
        .unwrap()
}

fn bend(name: &str, radius: f64, angle: f64) -> ComponentSpec {
    ComponentSpec::builder()
        .name(name)
        .kind(CurvedMicrostripLine)
        .params(
            rflayout::param::Params::new()
                .with("radius", radius)
                .with("width", 5.0)
                .with("angle", angle),
        )
        .build()
        .unwrap()
}

fn place_errors(report: &rflayout::ErrorReport) -> Vec<&PlaceError> {
    report
        .errors()
        .iter()
        .filter_map(|e| match e {
            Error::Place(p) => Some(p),
            _ => None,
        })
        .collect()
}

#[test]
fn two_line_chain_lands_at_the_far_face() {
    let mut a = line("a", 100.0);
    a.placement = Some(Placement::default());
    a.connections.push(Connection::new("out", "b", "in"));
    let b = line("b", 50.0);
    let design = Design::new("chain", "generic")
        .with_component(a)
        .with_component(b);

    let layout = assemble(&design, &tech()).unwrap();
    let node = layout.top().child("b").unwrap();
    assert_float_eq!(node.placement().loc.x, 100.0, abs <= 1e-9);
    assert_float_eq!(node.placement().loc.y, 0.0, abs <= 1e-9);
    assert_float_eq!(node.placement().rotation, 0.0, abs <= 1e-9);

    // The mated ports coincide, and their outward directions differ by
    // the mating angle.
    let a_out = layout.top().child("a").unwrap().port("out").unwrap().clone();
    let b_in = node.port("in").unwrap();
    assert_float_eq!(a_out.loc.x, b_in.loc.x, abs <= 1e-9);
    assert_float_eq!(a_out.loc.y, b_in.loc.y, abs <= 1e-9);
    assert_float_eq!(
        (b_in.orientation - a_out.orientation).rem_euclid(360.0),
        180.0,
        abs <= 1e-9
    );
}

#[test]
fn resolution_is_bit_identical_across_runs() {
    let mut a = bend("a", 40.0, 120.0);
    a.placement = Some(Placement::new((3.25, -7.5), 30.0));
    a.connections.push(Connection::new("out", "b", "in"));
    let mut b = bend("b", 40.0, 120.0);
    b.connections.push(Connection::new("out", "c", "in"));
    let c = line("c", 62.5);
    let design = Design::new("d", "generic")
        .with_component(a)
        .with_component(b)
        .with_component(c);

    let layers = tech();
    let first = assemble(&design, &layers).unwrap();
    let second = assemble(&design, &layers).unwrap();
    for node in first.top().children() {
        let twin = second.top().child(node.name()).unwrap();
        assert_eq!(
            node.placement().loc.x.to_bits(),
            twin.placement().loc.x.to_bits()
        );
        assert_eq!(
            node.placement().loc.y.to_bits(),
            twin.placement().loc.y.to_bits()
        );
        assert_eq!(
            node.placement().rotation.to_bits(),
            twin.placement().rotation.to_bits()
        );
    }
}

#[test]
fn consistent_ring_of_bends_closes() {
    let mut a = bend("a", 40.0, 120.0);
    a.placement = Some(Placement::default());
    a.connections.push(Connection::new("out", "b", "in"));
    let mut b = bend("b", 40.0, 120.0);
    b.connections.push(Connection::new("out", "c", "in"));
    let mut c = bend("c", 40.0, 120.0);
    c.connections.push(Connection::new("out", "a", "in"));
    let design = Design::new("ring", "generic")
        .with_component(a)
        .with_component(b)
        .with_component(c);

    let layout = assemble(&design, &tech()).unwrap();
    // Three 120-degree bends tile the full circle.
    let b_node = layout.top().child("b").unwrap();
    assert_float_eq!(b_node.placement().rotation, 120.0, abs <= 1e-6);
    let c_node = layout.top().child("c").unwrap();
    assert_float_eq!(c_node.placement().rotation, 240.0, abs <= 1e-6);
}

#[test]
fn mismatched_ring_is_rejected_as_inconsistent() {
    let mut a = bend("a", 40.0, 120.0);
    a.placement = Some(Placement::default());
    a.connections.push(Connection::new("out", "b", "in"));
    let mut b = bend("b", 40.0, 120.0);
    b.connections.push(Connection::new("out", "c", "in"));
    let mut c = bend("c", 43.0, 120.0);
    c.connections.push(Connection::new("out", "a", "in"));
    let design = Design::new("ring", "generic")
        .with_component(a)
        .with_component(b)
        .with_component(c);

    let report = assemble(&design, &tech()).unwrap_err();
    let errors = place_errors(&report);
    assert!(!errors.is_empty());
    // The short bend is caught where the cycle fails to close.
    assert!(errors.iter().any(|e| matches!(
        e,
        PlaceError::Inconsistent {
            component,
            position_error,
            ..
        } if component == "c" && *position_error > 1e-6
    )));
    assert!(errors
        .iter()
        .all(|e| matches!(e, PlaceError::Inconsistent { .. })));
}

#[test]
fn two_anchors_in_one_group_are_ambiguous() {
    let mut a = line("a", 100.0);
    a.placement = Some(Placement::default());
    a.connections.push(Connection::new("out", "b", "in"));
    let mut b = line("b", 50.0);
    b.placement = Some(Placement::new((10.0, 10.0), 0.0));
    let design = Design::new("d", "generic")
        .with_component(a)
        .with_component(b);

    let report = assemble(&design, &tech()).unwrap_err();
    let errors = place_errors(&report);
    assert_eq!(errors.len(), 1);
    match errors[0] {
        PlaceError::Ambiguous {
            components,
            anchors,
        } => {
            assert_eq!(*anchors, 2);
            assert_eq!(components.len(), 2);
        }
        other => panic!("expected ambiguity, got {other}"),
    }
}

#[test]
fn zero_anchors_in_a_group_are_ambiguous_too() {
    let mut a = line("a", 100.0);
    a.connections.push(Connection::new("out", "b", "in"));
    let b = line("b", 50.0);
    let design = Design::new("d", "generic")
        .with_component(a)
        .with_component(b);

    let report = assemble(&design, &tech()).unwrap_err();
    let errors = place_errors(&report);
    assert!(matches!(
        errors[0],
        PlaceError::Ambiguous { anchors: 0, .. }
    ));
}

#[test]
fn unconnected_unplaced_component_is_reported_by_name() {
    let design = Design::new("d", "generic").with_component(line("floating", 10.0));
    let report = assemble(&design, &tech()).unwrap_err();
    let errors = place_errors(&report);
    assert_eq!(errors.len(), 1);
    match errors[0] {
        PlaceError::Unplaced { component } => assert_eq!(component, "floating"),
        other => panic!("expected unplaced, got {other}"),
    }
}

#[test]
fn explicitly_placed_isolated_component_anchors_itself() {
    let mut island = line("island", 10.0);
    island.placement = Some(Placement::new((200.0, -30.0), 90.0));
    let design = Design::new("d", "generic").with_component(island);

    let layout = assemble(&design, &tech()).unwrap();
    let node = layout.top().child("island").unwrap();
    assert_eq!(node.placement().loc, Point::new(200.0, -30.0));
    assert_float_eq!(node.placement().rotation, 90.0, abs <= 1e-12);
}

#[test]
fn mating_angle_is_a_configurable_convention() {
    let mut a = line("a", 100.0);
    a.placement = Some(Placement::default());
    a.connections.push(Connection::new("out", "b", "in"));
    let b = line("b", 50.0);
    let design = Design::new("d", "generic")
        .with_component(a)
        .with_component(b);

    // With a zero offset the target port faces the same way as the
    // source port, flipping the second line back over the first.
    let layout = assemble_with(
        &design,
        &tech(),
        MatingRule { angle_offset: 0.0 },
    )
    .unwrap();
    let node = layout.top().child("b").unwrap();
    assert_float_eq!(node.placement().rotation, 180.0, abs <= 1e-9);
    assert_float_eq!(node.placement().loc.x, 100.0, abs <= 1e-9);
}
