//! Benchmark profiles for miasma influence maps.
//!
//! - [`reference_config`]: 129×129 grid, the size of a typical skirmish map
//! - [`stress_config`]: 513×513 grid for large open worlds
//! - [`scatter_agents`]: deterministic agent placement via seed
//! - [`jitter_agents`]: deterministic per-frame movement

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;
use std::time::Duration;

use glam::{Vec2, Vec3};
use miasma_core::{Category, Faction, ImprintSpec};
use miasma_engine::{AgentSpec, Kinematics, MapRegistry, RegistryConfig, SharedKinematics, UpdateMode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 128 world units square, unit cells, 12 tiers.
pub fn reference_config(mode: UpdateMode) -> RegistryConfig {
    RegistryConfig {
        world_min: Vec2::splat(-64.0),
        world_max: Vec2::splat(64.0),
        max_template_tier: 12,
        repaint_interval: Duration::from_millis(100),
        update_mode: mode,
        seed: 0xBEEF,
        ..Default::default()
    }
}

/// 512 world units square, unit cells, 16 tiers.
pub fn stress_config(mode: UpdateMode) -> RegistryConfig {
    RegistryConfig {
        world_min: Vec2::splat(-256.0),
        world_max: Vec2::splat(256.0),
        max_template_tier: 16,
        ..reference_config(mode)
    }
}

/// Register `n` agents at seeded random positions, alternating factions.
///
/// Every agent carries a threat, a location and an attractor imprint.
/// Returns the kinematics handles so callers can move them.
pub fn scatter_agents(registry: &mut MapRegistry, n: usize, seed: u64) -> Vec<Arc<SharedKinematics>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let min = registry.config().world_min;
    let max = registry.config().world_max;
    (0..n)
        .map(|i| {
            let p = Vec3::new(rng.random_range(min.x..max.x), 0.0, rng.random_range(min.y..max.y));
            let k = SharedKinematics::moving(p, Vec3::ZERO);
            let faction = if i % 2 == 0 { Faction::Player } else { Faction::Enemy };
            registry.register(
                AgentSpec::new(faction, k.clone())
                    .with_imprint(ImprintSpec::new(Category::Threat, 8, 1.0))
                    .with_imprint(ImprintSpec::new(Category::Location, 2, 1.0))
                    .with_imprint(ImprintSpec::new(Category::Attractor, 6, 0.5)),
            );
            k
        })
        .collect()
}

/// Nudge every agent by up to `step` world units along x and z.
pub fn jitter_agents(agents: &[Arc<SharedKinematics>], step: f32, rng: &mut ChaCha8Rng) {
    for k in agents {
        let v = Vec3::new(rng.random_range(-step..=step), 0.0, rng.random_range(-step..=step));
        k.set_position(k.position() + v);
        k.set_velocity(Some(v));
    }
}
