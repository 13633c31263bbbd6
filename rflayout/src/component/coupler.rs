//! Power divider and hybrid coupler generators.

use rfgeom::curves::{arc, positive, ring, strip, GeometryError};
use rfgeom::transform::{Transform, Transformation};
use rfgeom::{Point, Polygon};

use super::{GenError, Generate};
use crate::layout::cell::{Fanout, LayoutCell, Port};
use crate::layout::layers::{LayerMap, LayerRole};
use crate::param::Params;

/// A Wilkinson power divider.
///
/// Required: `radius` (of the quarter-wave branches), `width`,
/// `isolation_resistor_width`, `isolation_resistor_length`. Two
/// quarter-circle branches split the input between mirrored output lines,
/// bridged by the isolation resistor on the resistor layer. Ports: `in`,
/// and multi-connection `out1`/`out2`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WilkinsonDivider;

impl Generate for WilkinsonDivider {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let radius = params.require_f64("radius")?;
        let width = params.require_f64("width")?;
        let res_width = positive(
            "isolation_resistor_width",
            params.require_f64("isolation_resistor_width")?,
        )?;
        let res_length = positive(
            "isolation_resistor_length",
            params.require_f64("isolation_resistor_length")?,
        )?;
        let cond = layers.get(&LayerRole::Conductor)?;
        let res = layers.get(&LayerRole::Resistor)?;
        if res_width >= 2.0 * radius {
            return Err(GeometryError::RadiusTooSmall {
                radius,
                width: res_width,
            }
            .into());
        }

        let stub = radius / 2.0;
        let mut cell = LayoutCell::new("wilkinson_divider");
        cell.draw(
            cond,
            Polygon::rect(
                Point::new(-stub, -width / 2.0),
                Point::new(0.0, width / 2.0),
            ),
        );
        // Quarter-wave branches from the junction at the origin up to
        // (radius, radius) and down to (radius, -radius).
        let branch = arc(radius, width, 90.0)?;
        cell.draw(
            cond,
            branch.transform(Transformation::with_loc_and_angle(
                Point::new(0.0, radius),
                -90.0,
            )),
        );
        cell.draw(
            cond,
            branch.transform(Transformation::translate(0.0, -radius)),
        );
        for sign in [1.0, -1.0] {
            cell.draw(
                cond,
                Polygon::rect(
                    Point::new(radius, sign * radius - width / 2.0),
                    Point::new(radius + stub, sign * radius + width / 2.0),
                ),
            );
        }
        cell.draw(
            res,
            Polygon::rect(
                Point::new(radius, -radius + res_width / 2.0),
                Point::new(radius + res_length, radius - res_width / 2.0),
            ),
        );

        cell.add_port(Port::new("in", Point::new(-stub, 0.0), 180.0, width, cond))?;
        cell.add_port(
            Port::new("out1", Point::new(radius + stub, radius), 0.0, width, cond)
                .with_fanout(Fanout::Multi),
        )?;
        cell.add_port(
            Port::new(
                "out2",
                Point::new(radius + stub, -radius),
                0.0,
                width,
                cond,
            )
            .with_fanout(Fanout::Multi),
        )?;
        Ok(cell)
    }
}

/// A branch-line (90 degree hybrid) coupler: four line sections forming a
/// square of side `size`.
///
/// Required: `size`, `width`. Ports `p1` (input), `p2` (direct), `p3`
/// (isolated), `p4` (coupled) at the four corners.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BranchLineCoupler;

impl Generate for BranchLineCoupler {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let size = positive("size", params.require_f64("size")?)?;
        let width = positive("width", params.require_f64("width")?)?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let mut cell = LayoutCell::new("branch_line_coupler");
        let hw = width / 2.0;
        // Bottom, top, left, right sections.
        cell.draw(
            cond,
            Polygon::rect(Point::new(0.0, -hw), Point::new(size, hw)),
        );
        cell.draw(
            cond,
            Polygon::rect(Point::new(0.0, size - hw), Point::new(size, size + hw)),
        );
        cell.draw(
            cond,
            Polygon::rect(Point::new(-hw, 0.0), Point::new(hw, size)),
        );
        cell.draw(
            cond,
            Polygon::rect(Point::new(size - hw, 0.0), Point::new(size + hw, size)),
        );

        cell.add_port(Port::new("p1", Point::new(-hw, 0.0), 180.0, width, cond))?;
        cell.add_port(Port::new("p2", Point::new(size, -hw), 270.0, width, cond))?;
        cell.add_port(Port::new("p3", Point::new(size + hw, size), 0.0, width, cond))?;
        cell.add_port(Port::new("p4", Point::new(0.0, size + hw), 90.0, width, cond))?;
        Ok(cell)
    }
}

/// A rat-race (180 degree hybrid) coupler: a ring with four radial feed
/// stubs at 0, 90, 180, and 270 degrees.
///
/// Required: `radius` (ring centerline), `width`. Ports `p1`..`p4` at the
/// stub ends, numbered counterclockwise from +x.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RatRaceCoupler;

impl Generate for RatRaceCoupler {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let radius = params.require_f64("radius")?;
        let width = params.require_f64("width")?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let mut cell = LayoutCell::new("rat_race_coupler");
        cell.draw(cond, ring(radius, width)?);
        let stub = strip(radius / 2.0, width)?;
        for (i, angle) in [0.0, 90.0, 180.0, 270.0].into_iter().enumerate() {
            cell.draw(
                cond,
                stub.transform(Transformation::with_loc_and_angle(
                    Point::on_circle(radius, angle),
                    angle,
                )),
            );
            cell.add_port(Port::new(
                arcstr::format!("p{}", i + 1),
                Point::on_circle(radius * 1.5, angle),
                angle,
                width,
                cond,
            ))?;
        }
        Ok(cell)
    }
}
