//! Capacitor generators.

use rfgeom::curves::positive;
use rfgeom::{Point, Polygon};

use super::{GenError, Generate};
use crate::layout::cell::{LayoutCell, Port};
use crate::layout::layers::{LayerMap, LayerRole};
use crate::param::Params;

/// A metal-insulator-metal capacitor.
///
/// Required: `width`, `length`. Optional: `bottom_margin` (default 1), the
/// overhang of the bottom plate past the top plate on every side. The top
/// plate draws on the conductor layer, the bottom plate on the underpass
/// layer, the insulator on the dielectric layer. Ports: `p1` above the top
/// plate, `p2` below the bottom plate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MimCapacitor;

impl Generate for MimCapacitor {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let width = positive("width", params.require_f64("width")?)?;
        let length = positive("length", params.require_f64("length")?)?;
        let margin = positive("bottom_margin", params.f64_or("bottom_margin", 1.0)?)?;
        let cond = layers.get(&LayerRole::Conductor)?;
        let under = layers.get(&LayerRole::Underpass)?;
        let diel = layers.get(&LayerRole::Dielectric)?;

        let mut cell = LayoutCell::new("mim_capacitor");
        cell.draw(
            under,
            Polygon::rect(
                Point::new(-margin, -width / 2.0 - margin),
                Point::new(length + margin, width / 2.0 + margin),
            ),
        );
        let plate = Polygon::rect(
            Point::new(0.0, -width / 2.0),
            Point::new(length, width / 2.0),
        );
        cell.draw(diel, plate.clone());
        cell.draw(cond, plate);
        cell.add_port(Port::new(
            "p1",
            Point::new(length / 2.0, width / 2.0 + margin),
            90.0,
            width / 4.0,
            cond,
        ))?;
        cell.add_port(Port::new(
            "p2",
            Point::new(length / 2.0, -width / 2.0 - margin),
            270.0,
            width / 4.0,
            under,
        ))?;
        Ok(cell)
    }
}

/// An interdigitated capacitor.
///
/// Required: `n_fingers` (a positive integer), `finger_length`,
/// `finger_width`, `finger_spacing`. Fingers alternate between the left
/// and right bus bars, each stopping one spacing short of the opposite
/// bus. Ports: `p1` on the left bus, `p2` on the right bus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InterdigitatedCapacitor;

impl Generate for InterdigitatedCapacitor {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let n_fingers = params.require_usize("n_fingers")?;
        if n_fingers == 0 {
            return Err(rfgeom::curves::GeometryError::NonPositive {
                name: "n_fingers",
                value: 0.0,
            }
            .into());
        }
        let finger_length = positive("finger_length", params.require_f64("finger_length")?)?;
        let finger_width = positive("finger_width", params.require_f64("finger_width")?)?;
        let finger_spacing = positive("finger_spacing", params.require_f64("finger_spacing")?)?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let n = n_fingers as f64;
        let total_width = (n + 1.0) * finger_spacing + n * finger_width;
        let mut cell = LayoutCell::new("interdigitated_capacitor");
        cell.draw(
            cond,
            Polygon::rect(
                Point::new(-finger_width, -total_width / 2.0),
                Point::new(0.0, total_width / 2.0),
            ),
        );
        cell.draw(
            cond,
            Polygon::rect(
                Point::new(finger_length, -total_width / 2.0),
                Point::new(finger_length + finger_width, total_width / 2.0),
            ),
        );
        for i in 0..n_fingers {
            let y = -total_width / 2.0
                + finger_spacing
                + i as f64 * (finger_width + finger_spacing);
            // Even fingers attach to the left bus, odd to the right,
            // each keeping one spacing of clearance to the far bus.
            let (x0, x1) = if i % 2 == 0 {
                (0.0, finger_length - finger_spacing)
            } else {
                (finger_spacing, finger_length)
            };
            cell.draw(
                cond,
                Polygon::rect(Point::new(x0, y), Point::new(x1, y + finger_width)),
            );
        }
        cell.add_port(Port::new(
            "p1",
            Point::new(-finger_width, 0.0),
            180.0,
            finger_width,
            cond,
        ))?;
        cell.add_port(Port::new(
            "p2",
            Point::new(finger_length + finger_width, 0.0),
            0.0,
            finger_width,
            cond,
        ))?;
        Ok(cell)
    }
}

/// An edge-coupled parallel-plate capacitor on a single layer.
///
/// Required: `width` (per plate), `length`, `plate_spacing`.
/// Ports: `p1` on the top plate's outer edge, `p2` on the bottom plate's.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParallelPlateCapacitor;

impl Generate for ParallelPlateCapacitor {
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError> {
        let width = positive("width", params.require_f64("width")?)?;
        let length = positive("length", params.require_f64("length")?)?;
        let spacing = positive("plate_spacing", params.require_f64("plate_spacing")?)?;
        let cond = layers.get(&LayerRole::Conductor)?;

        let mut cell = LayoutCell::new("parallel_plate_capacitor");
        for sign in [1.0, -1.0] {
            cell.draw(
                cond,
                Polygon::rect(
                    Point::new(0.0, sign * spacing / 2.0),
                    Point::new(length, sign * (spacing / 2.0 + width)),
                ),
            );
        }
        cell.add_port(Port::new(
            "p1",
            Point::new(length / 2.0, spacing / 2.0 + width),
            90.0,
            width / 2.0,
            cond,
        ))?;
        cell.add_port(Port::new(
            "p2",
            Point::new(length / 2.0, -spacing / 2.0 - width),
            270.0,
            width / 2.0,
            cond,
        ))?;
        Ok(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layers::{LayerError, LayerSpec};

    fn tech() -> LayerMap {
        LayerMap::new("test")
            .bind(LayerRole::Conductor, LayerSpec(1, 0))
            .bind(LayerRole::Underpass, LayerSpec(2, 0))
            .bind(LayerRole::Dielectric, LayerSpec(7, 0))
    }

    #[test]
    fn mim_spreads_across_three_layers() {
        let params = Params::new().with("width", 20.0).with("length", 30.0);
        let cell = MimCapacitor.generate(&params, &tech()).unwrap();
        let mut layers: Vec<LayerSpec> = cell.elems().map(|e| e.layer).collect();
        layers.sort();
        assert_eq!(layers, vec![LayerSpec(1, 0), LayerSpec(2, 0), LayerSpec(7, 0)]);
        assert_eq!(cell.port("p2").unwrap().layer, LayerSpec(2, 0));
    }

    #[test]
    fn mim_requires_dielectric_binding() {
        let params = Params::new().with("width", 20.0).with("length", 30.0);
        let bare = LayerMap::new("bare")
            .bind(LayerRole::Conductor, LayerSpec(1, 0))
            .bind(LayerRole::Underpass, LayerSpec(2, 0));
        let err = MimCapacitor.generate(&params, &bare).unwrap_err();
        assert_eq!(
            err,
            GenError::Layer(LayerError::Unmapped(LayerRole::Dielectric))
        );
    }

    #[test]
    fn interdigitated_fingers_alternate_buses() {
        let params = Params::new()
            .with("n_fingers", 4)
            .with("finger_length", 40.0)
            .with("finger_width", 3.0)
            .with("finger_spacing", 2.0);
        let cell = InterdigitatedCapacitor.generate(&params, &tech()).unwrap();
        // 2 buses + 4 fingers.
        assert_eq!(cell.elems().count(), 6);
        let p2 = cell.port("p2").unwrap();
        assert_eq!(p2.loc, Point::new(43.0, 0.0));
    }

    #[test]
    fn parallel_plate_ports_face_away_from_each_other() {
        let params = Params::new()
            .with("width", 10.0)
            .with("length", 25.0)
            .with("plate_spacing", 4.0);
        let cell = ParallelPlateCapacitor.generate(&params, &tech()).unwrap();
        assert_eq!(cell.port("p1").unwrap().orientation, 90.0);
        assert_eq!(cell.port("p2").unwrap().orientation, 270.0);
    }
}
