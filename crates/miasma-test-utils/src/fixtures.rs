//! Reusable registry configurations and masks.

use std::time::Duration;

use glam::{IVec2, Vec2};
use miasma_engine::{MapRegistry, RegistryConfig, UpdateMode};
use miasma_space::{GridGeometry, ValidityMask};

/// A 17×17 world (`-8..8`, unit cells), 50 ms interval, 8 tiers.
pub fn small_config(mode: UpdateMode) -> RegistryConfig {
    RegistryConfig {
        world_min: Vec2::splat(-8.0),
        world_max: Vec2::splat(8.0),
        repaint_interval: Duration::from_millis(50),
        max_template_tier: 8,
        update_mode: mode,
        seed: 11,
        ..Default::default()
    }
}

pub fn geometry(config: &RegistryConfig) -> GridGeometry {
    config.geometry().expect("fixture config is valid")
}

/// A registry with every cell walkable.
pub fn open_registry(mode: UpdateMode) -> MapRegistry {
    let config = small_config(mode);
    let mask = ValidityMask::all_valid(&geometry(&config));
    MapRegistry::new(config, mask).expect("fixture registry")
}

/// A vertical wall at grid column `x`, open only at grid row `gap`.
pub fn wall_mask(geometry: &GridGeometry, x: i32, gap: Option<i32>) -> ValidityMask {
    ValidityMask::from_fn(geometry, |c: IVec2| c.x != x || Some(c.y) == gap)
}

/// A registry with a wall at grid column `x`.
pub fn walled_registry(mode: UpdateMode, x: i32, gap: Option<i32>) -> MapRegistry {
    let config = small_config(mode);
    let mask = wall_mask(&geometry(&config), x, gap);
    MapRegistry::new(config, mask).expect("fixture registry")
}
