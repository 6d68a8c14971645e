//! A squad of player agents flanking an enemy turret behind a wall.
//!
//! Run with `RUST_LOG=miasma_engine=debug cargo run --example quickstart`.

use std::time::Duration;

use glam::{Vec2, Vec3};
use miasma_core::{Category, Faction, ImprintSpec};
use miasma_engine::{
    AgentSpec, Kinematics, MapRegistry, RegistryConfig, SharedKinematics, UpdateMode,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = RegistryConfig {
        world_min: Vec2::splat(-16.0),
        world_max: Vec2::splat(16.0),
        update_mode: UpdateMode::Background,
        seed: 7,
        ..Default::default()
    };
    // A wall along x = 4 with a door at z in 0..2.
    let walkable = |p: Vec3| !(4.0..5.0).contains(&p.x) || (0.0..2.0).contains(&p.z);
    let mut registry = MapRegistry::with_walkability(config, &walkable)?;

    registry.register(
        AgentSpec::new(Faction::Enemy, SharedKinematics::fixed(Vec3::new(8.0, 0.0, 1.0)))
            .with_imprint(ImprintSpec::new(Category::Threat, 8, 2.0)),
    );

    let squad: Vec<_> = (0..3)
        .map(|i| {
            let k = SharedKinematics::moving(
                Vec3::new(-10.0, 0.0, -4.0 + 4.0 * i as f32),
                Vec3::new(1.0, 0.0, 0.0),
            );
            let id = registry.register(
                AgentSpec::new(Faction::Player, k.clone())
                    .with_imprint(ImprintSpec::new(Category::Location, 2, 1.0))
                    .with_imprint(ImprintSpec::new(Category::Attractor, 6, 0.5)),
            );
            (id, k)
        })
        .collect();

    let tick = Duration::from_millis(16);
    for frame in 0..120 {
        for (id, k) in &squad {
            let here = k.position();
            let target = registry
                .composition(here, 6)
                .add(Faction::Player, Category::Attractor, 1.0)
                .subtract(Faction::Enemy, Category::Threat, 1.5)
                .exclude_self_influence(*id, Category::Attractor)
                .find_best_cell();
            let step = (target - here).clamp_length_max(0.25);
            k.set_position(here + step);
            k.set_velocity(Some(step * 4.0));
        }
        registry.update(tick);
        if frame % 30 == 0 {
            let danger = registry.value_at(Vec3::new(3.0, 0.0, 1.0), Faction::Enemy, Category::Threat);
            println!("frame {frame:3}: threat at the door = {danger:.3}");
        }
    }
    registry.wait_for_repaint();

    if let Some(stats) = registry.last_repaint() {
        println!(
            "last repaint: {} of {} agents moved, {} paints, {:?}",
            stats.agents_moved, stats.agents_visited, stats.paints, stats.duration
        );
    }
    Ok(())
}
