//! RF component generators.
//!
//! One generator per component kind. Dispatch is a closed registry over
//! [`ComponentKind`]: adding a kind means adding a variant here, so there
//! is no dynamic type lookup anywhere in the engine.
//!
//! Every generator obeys the same contract: validate its documented
//! parameters (unknown extras are ignored, missing required ones fail
//! naming the parameter), look up its layer roles in the caller-supplied
//! [`LayerMap`], and emit a [`LayoutCell`] carrying exactly its documented
//! ports.

use std::fmt;
use std::str::FromStr;

use arcstr::ArcStr;
use enum_dispatch::enum_dispatch;
use rfgeom::curves::GeometryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::cell::{LayoutCell, PortError};
use crate::layout::layers::{LayerError, LayerMap};
use crate::param::{ParamError, Params};

pub mod capacitor;
pub mod coupler;
pub mod cpw;
pub mod inductor;
pub mod microstrip;

pub use capacitor::{InterdigitatedCapacitor, MimCapacitor, ParallelPlateCapacitor};
pub use coupler::{BranchLineCoupler, RatRaceCoupler, WilkinsonDivider};
pub use cpw::{CpwBend, CpwLine, CpwTaper};
pub use inductor::{SolenoidInductor, SpiralInductor, SymmetricInductor};
pub use microstrip::{CurvedMicrostripLine, MicrostripLine, TaperedMicrostripLine};

/// An error produced while generating one component's geometry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenError {
    /// A parameter-contract violation.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// A layer role the design's technology does not bind.
    #[error(transparent)]
    Layer(#[from] LayerError),

    /// An invalid numeric input to a geometry builder.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A port-contract violation.
    #[error(transparent)]
    Port(#[from] PortError),
}

/// The capability interface every component generator implements.
#[enum_dispatch]
pub trait Generate {
    /// Produces the component's local geometry and documented ports from
    /// its parameters and the design's layer bindings.
    fn generate(&self, params: &Params, layers: &LayerMap) -> Result<LayoutCell, GenError>;
}

/// The closed set of component kinds.
///
/// Serializes as the snake_case tag used by declarative design files,
/// e.g. `microstrip_line`.
#[enum_dispatch(Generate)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ArcStr", into = "ArcStr")]
pub enum ComponentKind {
    MicrostripLine(MicrostripLine),
    TaperedMicrostripLine(TaperedMicrostripLine),
    CurvedMicrostripLine(CurvedMicrostripLine),
    CpwLine(CpwLine),
    CpwBend(CpwBend),
    CpwTaper(CpwTaper),
    SpiralInductor(SpiralInductor),
    SymmetricInductor(SymmetricInductor),
    SolenoidInductor(SolenoidInductor),
    MimCapacitor(MimCapacitor),
    InterdigitatedCapacitor(InterdigitatedCapacitor),
    ParallelPlateCapacitor(ParallelPlateCapacitor),
    WilkinsonDivider(WilkinsonDivider),
    BranchLineCoupler(BranchLineCoupler),
    RatRaceCoupler(RatRaceCoupler),
}

impl ComponentKind {
    /// Every registered component kind.
    pub fn all() -> [ComponentKind; 15] {
        [
            MicrostripLine.into(),
            TaperedMicrostripLine.into(),
            CurvedMicrostripLine.into(),
            CpwLine.into(),
            CpwBend.into(),
            CpwTaper.into(),
            SpiralInductor.into(),
            SymmetricInductor.into(),
            SolenoidInductor.into(),
            MimCapacitor.into(),
            InterdigitatedCapacitor.into(),
            ParallelPlateCapacitor.into(),
            WilkinsonDivider.into(),
            BranchLineCoupler.into(),
            RatRaceCoupler.into(),
        ]
    }

    /// The kind's snake_case tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MicrostripLine(_) => "microstrip_line",
            Self::TaperedMicrostripLine(_) => "tapered_microstrip_line",
            Self::CurvedMicrostripLine(_) => "curved_microstrip_line",
            Self::CpwLine(_) => "cpw_line",
            Self::CpwBend(_) => "cpw_bend",
            Self::CpwTaper(_) => "cpw_taper",
            Self::SpiralInductor(_) => "spiral_inductor",
            Self::SymmetricInductor(_) => "symmetric_inductor",
            Self::SolenoidInductor(_) => "solenoid_inductor",
            Self::MimCapacitor(_) => "mim_capacitor",
            Self::InterdigitatedCapacitor(_) => "interdigitated_capacitor",
            Self::ParallelPlateCapacitor(_) => "parallel_plate_capacitor",
            Self::WilkinsonDivider(_) => "wilkinson_divider",
            Self::BranchLineCoupler(_) => "branch_line_coupler",
            Self::RatRaceCoupler(_) => "rat_race_coupler",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A component type tag outside the closed registry.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("unknown component type `{0}`")]
pub struct UnknownKindError(pub ArcStr);

impl FromStr for ComponentKind {
    type Err = UnknownKindError;
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(match tag {
            "microstrip_line" => MicrostripLine.into(),
            "tapered_microstrip_line" => TaperedMicrostripLine.into(),
            "curved_microstrip_line" => CurvedMicrostripLine.into(),
            "cpw_line" => CpwLine.into(),
            "cpw_bend" => CpwBend.into(),
            "cpw_taper" => CpwTaper.into(),
            "spiral_inductor" => SpiralInductor.into(),
            "symmetric_inductor" => SymmetricInductor.into(),
            "solenoid_inductor" => SolenoidInductor.into(),
            "mim_capacitor" => MimCapacitor.into(),
            "interdigitated_capacitor" => InterdigitatedCapacitor.into(),
            "parallel_plate_capacitor" => ParallelPlateCapacitor.into(),
            "wilkinson_divider" => WilkinsonDivider.into(),
            "branch_line_coupler" => BranchLineCoupler.into(),
            "rat_race_coupler" => RatRaceCoupler.into(),
            other => return Err(UnknownKindError(ArcStr::from(other))),
        })
    }
}

impl TryFrom<ArcStr> for ComponentKind {
    type Error = UnknownKindError;
    fn try_from(tag: ArcStr) -> Result<Self, Self::Error> {
        tag.as_str().parse()
    }
}

impl From<ComponentKind> for ArcStr {
    fn from(kind: ComponentKind) -> Self {
        ArcStr::from(kind.tag())
    }
}
