//! Microstrip transmission line generators.

use rfgeom::curves::{arc, strip, taper};
use rfgeom::{wrap_angle, Point};

use super::{GenError, Generate};
use crate::layout::cell::{LayoutCell, Port};
use crate::layout::layers::{LayerMap, LayerRole};
use crate::param::Params;

/// A straight microstrip line.
///
/// Required: `length`, `width`. Ports: `in` at the origin facing 180
/// degrees, `out` at `(length, 0)` facing 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MicrostripLine;

impl Generate for MicrostripLine {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let length = params.require_f64("length")?;
        let width = params.require_f64("width")?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let mut cell = LayoutCell::new("microstrip_line");
        cell.draw(cond, strip(length, width)?);
        cell.add_port(Port::new("in", Point::zero(), 180.0, width, cond))?;
        cell.add_port(Port::new("out", Point::new(length, 0.0), 0.0, width, cond))?;
        Ok(cell)
    }
}

/// A microstrip line tapering linearly between two widths.
///
/// Required: `length`, `width_in`, `width_out`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaperedMicrostripLine;

impl Generate for TaperedMicrostripLine {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let length = params.require_f64("length")?;
        let width_in = params.require_f64("width_in")?;
        let width_out = params.require_f64("width_out")?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let mut cell = LayoutCell::new("tapered_microstrip_line");
        cell.draw(cond, taper(length, width_in, width_out)?);
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

/// A circular microstrip bend.
///
/// Required: `radius` (trace centerline), `width`. Optional: `angle`
/// (degrees, default 90). The bend sweeps counterclockwise about the
/// origin, entering along +y: `in` sits at `(radius, 0)` facing 270
/// degrees (the outward normal of the entry face) and `out` sits on the
/// arc at `angle`, facing `angle + 90` (the exit travel direction).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CurvedMicrostripLine;

impl Generate for CurvedMicrostripLine {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let radius = params.require_f64("radius")?;
        let width = params.require_f64("width")?;
        let angle = params.f64_or("angle", 90.0)?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let mut cell = LayoutCell::new("curved_microstrip_line");
        cell.draw(cond, arc(radius, width, angle)?);
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
