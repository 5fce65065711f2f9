//! Octant and Phase Codes
//!
//! Two small cyclic code spaces and the structures they index:
//!
//! - [`OctantCode`]: the 8 sign patterns of a position relative to a center,
//!   with the cube's rotation and reflection symmetries.
//! - [`PhaseCode`]: a 12-step circular counter whose values are the 12 edges
//!   of the cube (see [`phase_to_edge`]).
//! - [`ConfigMatrix`]: a dense 12×8 grid keyed by `(PhaseCode, OctantCode)`.
//! - [`Octree`]: a recursive spatial index that picks a child by
//!   [`OctantCode`] at every level.
//! - [`TemporalOctree`]: one [`Octree`] per phase.
//!
//! # Failure Modes
//!
//! Constructing a code never fails; raw values are masked or wrapped into
//! range. Matrix construction, checked matrix access and edge lookup return
//! [`Error`]. Tree operations never fail: positions outside the root bounds
//! and out-of-range phases are ignored.
//!
//! # Threading
//!
//! Nothing here locks. An [`Octree`] may be read from many threads while no
//! one writes to it, and the 12 sub-trees of a [`TemporalOctree`] may each be
//! written by a different thread.

mod bounds;
mod config;
mod error;
mod matrix;
mod octant;
mod octree;
mod phase;
mod temporal;

pub mod tables;

pub use bounds::*;
pub use config::*;
pub use error::*;
pub use matrix::*;
pub use octant::*;
pub use octree::*;
pub use phase::*;
pub use temporal::*;

pub use glam;
