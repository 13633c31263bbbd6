//! RF layout resolution and parametric geometry engine.
//!
//! Turns a declarative design — component kinds, parameters, explicit
//! placements, and port-to-port connections — into a hierarchical polygon
//! layout ready for serialization:
//!
//! 1. each component's generator emits local geometry and named ports;
//! 2. the placement resolver chains port-mating constraints outward from
//!    each connected group's anchor into one absolute transform per
//!    component;
//! 3. the assembler applies the transforms, checks global invariants, and
//!    emits an immutable layout tree.
//!
//! The pipeline is a pure, synchronous computation: no I/O, no shared
//! mutable state, and deterministic output for a given design. Independent
//! components and connected groups are checked independently, and all of
//! their failures are reported together in one [`ErrorReport`].
//!
//! Parsing of declarative design files, serialization to GDSII/OASIS, and
//! DRC/LVS are external collaborators: the front end produces
//! [`design::Design`] values and the serializer consumes
//! [`layout::Layout`] trees.

pub mod component;
pub mod design;
pub mod error;
pub mod layout;
pub mod param;

mod log;

pub use error::{Error, ErrorReport, Result};
pub use layout::assemble::{assemble, assemble_with};
