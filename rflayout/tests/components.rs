//! Generator contract tests: documented ports, parameter validation, and
//! layer-role lookups.

use float_eq::assert_float_eq;
use rfgeom::curves::GeometryError;
use rfgeom::Point;
use rflayout::component::{ComponentKind, GenError, Generate};
use rflayout::layout::layers::{LayerError, LayerMap, LayerRole, LayerSpec};
use rflayout::param::{ParamError, Params};

fn tech() -> LayerMap {
    generic_rf_pdk::layer_map()
}

fn params_for(kind: ComponentKind) -> Params {
    match kind.tag() {
        "microstrip_line" => Params::new().with("length", 100.0).with("width", 5.0),
        "tapered_microstrip_line" => Params::new()
            .with("length", 80.0)
            .with("width_in", 10.0)
            .with("width_out", 4.0),
        "curved_microstrip_line" => Params::new().with("radius", 30.0).with("width", 5.0),
        "cpw_line" => Params::new()
            .with("length", 100.0)
            .with("width", 8.0)
            .with("gap", 4.0),
        "cpw_bend" => Params::new()
            .with("radius", 40.0)
            .with("width", 8.0)
            .with("gap", 4.0),
        "cpw_taper" => Params::new()
            .with("length", 60.0)
            .with("width_in", 8.0)
            .with("width_out", 4.0)
            .with("gap_in", 4.0)
            .with("gap_out", 2.0),
        "spiral_inductor" => Params::new()
            .with("n_turns", 3.5)
            .with("width", 4.0)
            .with("spacing", 9.0)
            .with("inner_radius", 25.0),
        "symmetric_inductor" => Params::new()
            .with("n_turns", 2.5)
            .with("width", 4.0)
            .with("spacing", 9.0)
            .with("inner_radius", 25.0),
        "solenoid_inductor" => Params::new()
            .with("n_turns", 4)
            .with("width", 2.0)
            .with("length", 80.0)
            .with("diameter", 20.0),
        "mim_capacitor" => Params::new().with("width", 20.0).with("length", 30.0),
        "interdigitated_capacitor" => Params::new()
            .with("n_fingers", 6)
            .with("finger_length", 40.0)
            .with("finger_width", 3.0)
            .with("finger_spacing", 2.0),
        "parallel_plate_capacitor" => Params::new()
            .with("width", 10.0)
            .with("length", 25.0)
            .with("plate_spacing", 4.0),
        "wilkinson_divider" => Params::new()
            .with("radius", 40.0)
            .with("width", 5.0)
            .with("isolation_resistor_width", 3.0)
            .with("isolation_resistor_length", 10.0),
        "branch_line_coupler" => Params::new().with("size", 30.0).with("width", 4.0),
        "rat_race_coupler" => Params::new().with("radius", 40.0).with("width", 4.0),
        other => panic!("no parameters defined for kind {other}"),
    }
}

fn expected_ports(kind: ComponentKind) -> &'static [&'static str] {
    match kind.tag() {
        "microstrip_line" | "tapered_microstrip_line" | "curved_microstrip_line" | "cpw_line"
        | "cpw_bend" | "cpw_taper" | "spiral_inductor" => &["in", "out"],
        "symmetric_inductor" | "solenoid_inductor" | "mim_capacitor"
        | "interdigitated_capacitor" | "parallel_plate_capacitor" => &["p1", "p2"],
        "wilkinson_divider" => &["in", "out1", "out2"],
        "branch_line_coupler" | "rat_race_coupler" => &["p1", "p2", "p3", "p4"],
        other => panic!("no ports defined for kind {other}"),
    }
}

#[test]
fn every_kind_emits_its_documented_ports() {
    let layers = tech();
    for kind in ComponentKind::all() {
        let cell = kind
            .generate(&params_for(kind), &layers)
            .unwrap_or_else(|e| panic!("{kind} failed: {e}"));
        let expected = expected_ports(kind);
        assert_eq!(
            cell.ports().count(),
            expected.len(),
            "wrong port count for {kind}"
        );
        for port in expected {
            assert!(cell.port(port).is_ok(), "{kind} missing port {port}");
        }
        assert!(cell.elems().count() > 0, "{kind} emitted no geometry");
    }
}

#[test]
fn line_ports_lie_on_the_strip_end_faces() {
    use rfgeom::bbox::BoundBox;

    let layers = tech();
    let kind: ComponentKind = "microstrip_line".parse().unwrap();
    let cell = kind.generate(&params_for(kind), &layers).unwrap();
    let bbox = cell.bbox();
    let input = cell.port("in").unwrap().loc;
    let output = cell.port("out").unwrap().loc;
    assert_float_eq!(input.x, bbox.p0.x, abs <= 1e-12);
    assert_float_eq!(output.x, bbox.p1.x, abs <= 1e-12);
    assert!(bbox.contains(input) && bbox.contains(output));
}

#[test]
fn bend_ports_stay_on_the_trace_centerline_radius() {
    let layers = tech();
    let kind: ComponentKind = "curved_microstrip_line".parse().unwrap();
    let cell = kind.generate(&params_for(kind), &layers).unwrap();
    for port in ["in", "out"] {
        let loc = cell.port(port).unwrap().loc;
        assert_float_eq!(loc.distance_to(Point::zero()), 30.0, abs <= 1e-9);
    }
}

#[test]
fn rat_race_ports_sit_at_the_stub_tips() {
    let layers = tech();
    let kind: ComponentKind = "rat_race_coupler".parse().unwrap();
    let cell = kind.generate(&params_for(kind), &layers).unwrap();
    for port in ["p1", "p2", "p3", "p4"] {
        let loc = cell.port(port).unwrap().loc;
        assert_float_eq!(loc.distance_to(Point::zero()), 60.0, abs <= 1e-9);
    }
}

#[test]
fn missing_required_parameter_names_it() {
    let layers = tech();
    let kind: ComponentKind = "microstrip_line".parse().unwrap();
    let err = kind
        .generate(&Params::new().with("width", 5.0), &layers)
        .unwrap_err();
    match err {
        GenError::Param(ParamError::Missing(name)) => assert_eq!(name, "length"),
        other => panic!("expected a missing-parameter error, got {other}"),
    }
}

#[test]
fn unmapped_layer_role_names_the_role() {
    let bare = LayerMap::new("bare").bind(LayerRole::Conductor, LayerSpec(1, 0));
    let kind: ComponentKind = "wilkinson_divider".parse().unwrap();
    let err = kind.generate(&params_for(kind), &bare).unwrap_err();
    assert_eq!(
        err,
        GenError::Layer(LayerError::Unmapped(LayerRole::Resistor))
    );
}

#[test]
fn nonpositive_dimensions_never_clamp() {
    let layers = tech();
    let kind: ComponentKind = "microstrip_line".parse().unwrap();
    let err = kind
        .generate(&Params::new().with("length", -4.0).with("width", 5.0), &layers)
        .unwrap_err();
    assert_eq!(
        err,
        GenError::Geometry(GeometryError::NonPositive {
            name: "length",
            value: -4.0
        })
    );
}

#[test]
fn unknown_kind_tags_are_rejected_at_the_front_end_boundary() {
    let err = serde_json::from_str::<ComponentKind>("\"magic_tee\"").unwrap_err();
    assert!(err.to_string().contains("unknown component type"));
}
