//! Randomised register/move/deregister sequences against the registry.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec3;
use miasma_core::{Category, Faction, ImprintSpec};
use miasma_engine::{AgentSpec, MapRegistry, SharedKinematics, UpdateMode};
use miasma_test_utils::fixtures::{open_registry, walled_registry};
use miasma_test_utils::{assert_registries_match, total_influence};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Vec3> {
    (-7.9f32..7.9, -7.9f32..7.9).prop_map(|(x, z)| Vec3::new(x, 0.0, z))
}

fn trooper(faction: Faction, k: Arc<SharedKinematics>) -> AgentSpec {
    AgentSpec::new(faction, k)
        .with_imprint(ImprintSpec::new(Category::Threat, 4, 1.0))
        .with_imprint(ImprintSpec::new(Category::Location, 2, 2.0))
        .with_imprint(ImprintSpec::new(Category::Attractor, 5, 0.5))
}

fn max_residue(registry: &MapRegistry) -> f32 {
    let mut worst = 0.0f32;
    for faction in Faction::ALL {
        for category in Category::ALL {
            registry.with_field(faction, category, |f| {
                for v in f.values() {
                    worst = worst.max(v.abs());
                }
            });
        }
    }
    worst
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn full_deregistration_returns_fields_to_zero(
        starts in proptest::collection::vec((point(), any::<bool>(), any::<bool>()), 1..6),
        moves in proptest::collection::vec((0usize..6, point()), 0..16),
        walled in any::<bool>(),
    ) {
        let mut r = if walled {
            walled_registry(UpdateMode::Inline, 9, Some(3))
        } else {
            open_registry(UpdateMode::Inline)
        };
        let mut agents = Vec::new();
        for (position, enemy, moving) in &starts {
            let k = if *moving {
                SharedKinematics::moving(*position, Vec3::new(2.0, 0.0, -1.0))
            } else {
                SharedKinematics::fixed(*position)
            };
            let faction = if *enemy { Faction::Enemy } else { Faction::Player };
            agents.push((r.register(trooper(faction, k.clone())), k));
        }
        r.update(Duration::from_millis(1));

        for (pick, position) in &moves {
            let (_, k) = &agents[pick % agents.len()];
            k.set_position(*position);
            r.repaint();
        }

        for (id, _) in &agents {
            r.deregister(*id);
        }
        r.update(Duration::from_millis(1));
        prop_assert_eq!(r.agent_count(), 0);
        prop_assert!(max_residue(&r) < 1e-3, "residue {}", max_residue(&r));
    }

    #[test]
    fn static_agents_repaint_like_a_fresh_registry(
        starts in proptest::collection::vec(point(), 1..5),
        ends in proptest::collection::vec(point(), 5),
    ) {
        let mut moved = open_registry(UpdateMode::Inline);
        let mut handles = Vec::new();
        for position in &starts {
            let k = SharedKinematics::fixed(*position);
            moved.register(trooper(Faction::Enemy, k.clone()));
            handles.push(k);
        }
        moved.update(Duration::from_millis(1));
        for (k, end) in handles.iter().zip(&ends) {
            k.set_position(*end);
        }
        moved.repaint();

        let mut fresh = open_registry(UpdateMode::Inline);
        for end in ends.iter().take(starts.len()) {
            fresh.register(trooper(Faction::Enemy, SharedKinematics::fixed(*end)));
        }
        fresh.update(Duration::from_millis(1));

        assert_registries_match(&moved, &fresh, 1e-4);
        prop_assert!(total_influence(&moved) > 0.0);
    }
}
