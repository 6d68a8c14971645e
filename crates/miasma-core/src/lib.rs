//! Core types for the miasma influence-field system.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other crate in the workspace: factions,
//! influence categories, agent identifiers, imprint specifications and the
//! falloff curve library.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod falloff;
pub mod id;
pub mod imprint;

pub use falloff::FalloffCurve;
pub use id::{AgentId, Category, Faction};
pub use imprint::{ImprintList, ImprintSpec};
