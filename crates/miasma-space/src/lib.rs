//! Spatial primitives for miasma influence fields.
//!
//! Provides the world-level [`GridGeometry`] (cell size, odd grid
//! dimensions, world/grid conversions), the per-field [`FieldWindow`]
//! (a possibly clipped sub-rectangle of the world grid), the shared
//! read-only [`ValidityMask`] and the 4-neighbour traversal order used by
//! every flood-fill in the workspace.
//!
//! World positions are [`glam::Vec3`]; world x maps to grid x and world z
//! maps to grid y. Height is ignored.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod mask;
pub mod neighbours;
pub mod window;

pub use error::GridError;
pub use geometry::GridGeometry;
pub use mask::{ValidityMask, Walkability};
pub use neighbours::{neighbours_within, NEIGHBOUR_OFFSETS};
pub use window::FieldWindow;
