//! Inductor generators.

use rfgeom::curves::{positive, spiral, GeometryError};
use rfgeom::{wrap_angle, Path, Point, Polygon};

use super::{GenError, Generate};
use crate::layout::cell::{LayoutCell, Port};
use crate::layout::layers::{LayerMap, LayerRole};
use crate::param::Params;

/// A planar Archimedean spiral inductor.
///
/// Required: `n_turns` (fractional turns allowed), `width`, `spacing`
/// (centerline pitch per turn, must exceed `width`), `inner_radius`.
/// Ports: `in` on the innermost turn end, `out` on a straight lead-out
/// running tangentially past the outer turn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpiralInductor;

impl Generate for SpiralInductor {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let turns = params.require_f64("n_turns")?;
        let width = params.require_f64("width")?;
        let spacing = params.require_f64("spacing")?;
        let inner_radius = params.require_f64("inner_radius")?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let coil = spiral(turns, spacing, inner_radius, width)?;
        let end_angle = turns * 360.0;
        let outer_radius = inner_radius + spacing * turns;
        let end = Point::on_circle(outer_radius, end_angle);

        // Straight lead-out continuing tangentially from the outer end.
        let lead = wrap_angle(end_angle + 90.0);
        let lead_dir = Point::new(lead.to_radians().cos(), lead.to_radians().sin());
        let lead_len = outer_radius + width;
        let out_loc = end + lead_dir * lead_len;

        let mut cell = LayoutCell::new("spiral_inductor");
        cell.draw(cond, coil);
        cell.draw(cond, Path::new(vec![end, out_loc], width));
        cell.add_port(Port::new(
            "in",
            Point::new(inner_radius, 0.0),
            270.0,
            width,
            cond,
        ))?;
        cell.add_port(Port::new("out", out_loc, lead, width, cond))?;
        Ok(cell)
    }
}

/// A spiral inductor with an underpass bringing the inner end out,
/// giving two ports on opposite sides.
///
/// Required: `n_turns`, `width`, `spacing`, `inner_radius`.
/// Ports: `p1` on the innermost turn end (conductor), `p2` on the
/// underpass end beyond the outer turn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SymmetricInductor;

impl Generate for SymmetricInductor {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let turns = params.require_f64("n_turns")?;
        let width = params.require_f64("width")?;
        let spacing = params.require_f64("spacing")?;
        let inner_radius = params.require_f64("inner_radius")?;
        let cond = layers.get(&LayerRole::Conductor)?;
        let under = layers.get(&LayerRole::Underpass)?;

        let coil = spiral(turns, spacing, inner_radius, width)?;
        let outer_radius = inner_radius + spacing * turns;
        let p2_loc = Point::new(-outer_radius - width, 0.0);

        let mut cell = LayoutCell::new("symmetric_inductor");
        cell.draw(cond, coil);
        cell.draw(
            under,
            Path::new(vec![p2_loc, Point::new(-inner_radius, 0.0)], width),
        );
        cell.add_port(Port::new(
            "p1",
            Point::new(inner_radius, 0.0),
            270.0,
            width,
            cond,
        ))?;
        cell.add_port(Port::new("p2", p2_loc, 180.0, width, under))?;
        Ok(cell)
    }
}

/// A solenoid inductor wound between two metal levels.
///
/// Required: `n_turns` (a positive integer), `width`, `length`,
/// `diameter`. Optional: `via_size` (default 1). The upper winding runs on
/// the conductor layer, the return winding on the underpass layer, with a
/// via stitching each turn to the next. Ports: `p1` on the underpass at
/// the start of the winding, `p2` on the conductor at its end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SolenoidInductor;

impl Generate for SolenoidInductor {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let n_turns = params.require_usize("n_turns")?;
        if n_turns == 0 {
            return Err(GeometryError::NonPositive {
                name: "n_turns",
                value: 0.0,
            }
            .into());
        }
        let width = positive("width", params.require_f64("width")?)?;
        let length = positive("length", params.require_f64("length")?)?;
        let diameter = positive("diameter", params.require_f64("diameter")?)?;
        let via_size = positive("via_size", params.f64_or("via_size", 1.0)?)?;
        let cond = layers.get(&LayerRole::Conductor)?;
        let under = layers.get(&LayerRole::Underpass)?;
        let via = layers.get(&LayerRole::Via)?;

        let seg = length / n_turns as f64;
        let half = diameter / 2.0;
        let mut cell = LayoutCell::new("solenoid_inductor");
        for i in 0..n_turns {
            let x0 = i as f64 * seg;
            let x1 = x0 + seg;
            // Each turn alternates which side the upper trace runs on.
            let y_top = if i % 2 == 0 { -half } else { half };
            let y_bot = -y_top;
            cell.draw(
                cond,
                Polygon::rect(
                    Point::new(x0, y_top - width / 2.0),
                    Point::new(x1, y_top + width / 2.0),
                ),
            );
            cell.draw(
                under,
                Polygon::rect(
                    Point::new(x0, y_bot - width / 2.0),
                    Point::new(x1, y_bot + width / 2.0),
                ),
            );
            if i < n_turns - 1 {
                cell.draw(
                    via,
                    Polygon::rect(
                        Point::new(x1 - via_size / 2.0, y_top - via_size / 2.0),
                        Point::new(x1 + via_size / 2.0, y_top + via_size / 2.0),
                    ),
                );
            }
        }

        let p2_y = if (n_turns - 1) % 2 == 0 { -half } else { half };
        cell.add_port(Port::new("p1", Point::new(0.0, half), 180.0, width, under))?;
        cell.add_port(Port::new(
            "p2",
            Point::new(length, p2_y),
            0.0,
            width,
            cond,
        ))?;
        Ok(cell)
    }
}
