//! Coplanar waveguide generators.
//!
//! A CPW cross-section is a center conductor flanked by two ground strips,
//! all on the conductor layer; the gaps are etched, not drawn.

use rfgeom::curves::{arc, positive, strip, taper};
use rfgeom::{wrap_angle, Point, Polygon};

use super::{GenError, Generate};
use crate::layout::cell::{LayoutCell, Port};
use crate::layout::layers::{LayerMap, LayerRole};
use crate::param::Params;

/// A straight CPW section.
///
/// Required: `length`, `width` (center conductor), `gap`. Optional:
/// `ground_width` (default 10). Ports `in`/`out` at the center conductor's
/// end faces.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CpwLine;

impl Generate for CpwLine {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let length = params.require_f64("length")?;
        let width = params.require_f64("width")?;
        let gap = positive("gap", params.require_f64("gap")?)?;
        let ground_width = positive("ground_width", params.f64_or("ground_width", 10.0)?)?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let mut cell = LayoutCell::new("cpw_line");
        cell.draw(cond, strip(length, width)?);
        let inner = width / 2.0 + gap;
        for sign in [1.0, -1.0] {
            cell.draw(
                cond,
                Polygon::rect(
                    Point::new(0.0, sign * inner),
                    Point::new(length, sign * (inner + ground_width)),
                ),
            );
        }
        cell.add_port(Port::new("in", Point::zero(), 180.0, width, cond))?;
        cell.add_port(Port::new("out", Point::new(length, 0.0), 0.0, width, cond))?;
        Ok(cell)
    }
}

/// A circular CPW bend.
///
/// Required: `radius` (center conductor centerline), `width`, `gap`.
/// Optional: `ground_width` (default 10), `angle` (degrees, default 90).
/// Same sweep and port conventions as the microstrip bend; the ground
/// strips follow concentric arcs inside and outside the center conductor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CpwBend;

impl Generate for CpwBend {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let radius = params.require_f64("radius")?;
        let width = params.require_f64("width")?;
        let gap = positive("gap", params.require_f64("gap")?)?;
        let ground_width = positive("ground_width", params.f64_or("ground_width", 10.0)?)?;
        let angle = params.f64_or("angle", 90.0)?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let offset = width / 2.0 + gap + ground_width / 2.0;
        let mut cell = LayoutCell::new("cpw_bend");
        cell.draw(cond, arc(radius, width, angle)?);
        cell.draw(cond, arc(radius - offset, ground_width, angle)?);
        cell.draw(cond, arc(radius + offset, ground_width, angle)?);
        cell.add_port(Port::new("in", Point::new(radius, 0.0), 270.0, width, cond))?;
        cell.add_port(Port::new(
            "out",
            Point::on_circle(radius, angle),
            wrap_angle(angle + 90.0),
            width,
            cond,
        ))?;
        Ok(cell)
    }
}

/// A CPW taper between two cross-sections.
///
/// Required: `length`, `width_in`, `width_out`, `gap_in`, `gap_out`.
/// Optional: `ground_width` (default 10). The center conductor and both
/// gap edges interpolate linearly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CpwTaper;

impl Generate for CpwTaper {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let length = params.require_f64("length")?;
        let width_in = params.require_f64("width_in")?;
        let width_out = params.require_f64("width_out")?;
        let gap_in = positive("gap_in", params.require_f64("gap_in")?)?;
        let gap_out = positive("gap_out", params.require_f64("gap_out")?)?;
        let ground_width = positive("ground_width", params.f64_or("ground_width", 10.0)?)?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let mut cell = LayoutCell::new("cpw_taper");
        cell.draw(cond, taper(length, width_in, width_out)?);
        let in_edge = width_in / 2.0 + gap_in;
        let out_edge = width_out / 2.0 + gap_out;
        for sign in [1.0, -1.0] {
            cell.draw(
                cond,
                Polygon::new(vec![
                    Point::new(0.0, sign * in_edge),
                    Point::new(length, sign * out_edge),
                    Point::new(length, sign * (out_edge + ground_width)),
                    Point::new(0.0, sign * (in_edge + ground_width)),
                ]),
            );
        }
        cell.add_port(Port::new("in", Point::zero(), 180.0, width_in, cond))?;
        cell.add_port(Port::new(
            "out",
            Point::new(length, 0.0),
            0.0,
            width_out,
            cond,
        ))?;
        Ok(cell)
    }
}
