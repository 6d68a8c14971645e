//! Miasma: obstacle-aware influence maps for game AI.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all miasma sub-crates. For most users, adding `miasma` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use miasma::prelude::*;
//!
//! let config = RegistryConfig {
//!     world_min: Vec2::splat(-16.0),
//!     world_max: Vec2::splat(16.0),
//!     ..Default::default()
//! };
//! // Everything walkable except a pillar around the origin.
//! let mut registry =
//!     MapRegistry::with_walkability(config, &|p: Vec3| p.length() > 1.5).unwrap();
//!
//! let guard = SharedKinematics::fixed(Vec3::new(6.0, 0.0, 0.0));
//! let id = registry.register(
//!     AgentSpec::new(Faction::Enemy, guard.clone())
//!         .with_imprint(ImprintSpec::new(Category::Threat, 5, 1.0)),
//! );
//! registry.update(std::time::Duration::from_millis(16));
//! assert!(registry.value_at(Vec3::new(6.0, 0.0, 0.0), Faction::Enemy, Category::Threat) > 0.9);
//!
//! // Least-threatened cell that still sees some of the guard's influence.
//! let retreat = registry
//!     .composition(Vec3::new(4.0, 0.0, 0.0), 6)
//!     .add(Faction::Enemy, Category::Threat, 1.0)
//!     .invert()
//!     .find_best_cell();
//! assert!(registry.mask().is_valid(registry.geometry().coordinate_of(retreat)));
//! # let _ = id;
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `miasma-core` | Factions, categories, agent ids, imprints, falloff curves |
//! | [`space`] | `miasma-space` | Grid geometry, field windows, validity masks |
//! | [`field`] | `miasma-field` | Templates, influence fields, composition buffers |
//! | [`engine`] | `miasma-engine` | Map registry, agents, repaint, composition queries |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary (`miasma-core`).
pub use miasma_core as types;

/// Grid geometry and masks (`miasma-space`).
///
/// [`space::GridGeometry`] converts between world positions and grid
/// cells; [`space::ValidityMask`] records which cells are walkable.
pub use miasma_space as space;

/// Templates and fields (`miasma-field`).
pub use miasma_field as field;

/// The registry (`miasma-engine`).
///
/// [`engine::MapRegistry`] is the entry point for most hosts.
pub use miasma_engine as engine;

/// Common imports for typical miasma usage.
pub mod prelude {
    // Math
    pub use glam::{IVec2, Vec2, Vec3};

    // Core types
    pub use miasma_core::{AgentId, Category, FalloffCurve, Faction, ImprintSpec};

    // Space
    pub use miasma_space::{GridGeometry, ValidityMask, Walkability};

    // Fields
    pub use miasma_field::{CompositionBuffer, FalloffTemplate, InfluenceField, TemplateCache};

    // Engine
    pub use miasma_engine::{
        AgentSpec, ConfigError, Kinematics, MapRegistry, RegistryConfig, RegistryPhase,
        RepaintStats, SharedKinematics, UpdateMode,
    };
}
