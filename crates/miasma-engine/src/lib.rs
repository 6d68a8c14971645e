//! Influence map registry for miasma.
//!
//! [`MapRegistry`] owns one [`InfluenceField`](miasma_field::InfluenceField)
//! per (faction, category), tracks registered agents, and keeps the fields
//! in step with agent movement by incremental repaint: only agents whose
//! grid cell changed are erased and repainted. Repaint can run inline or
//! on a background thread ([`UpdateMode`]).
//!
//! Queries go through [`MapRegistry::value_at`] for single cells and
//! [`MapRegistry::composition`] for blending fields around a position and
//! picking a destination.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod composition;
pub mod config;
pub mod registry;
pub mod repaint;
mod store;

pub use agent::{AgentSpec, Kinematics, SharedKinematics};
pub use composition::Composition;
pub use config::{ConfigError, RegistryConfig, UpdateMode};
pub use registry::{MapRegistry, RegistrationCounts, RegistryPhase};
pub use repaint::RepaintStats;
