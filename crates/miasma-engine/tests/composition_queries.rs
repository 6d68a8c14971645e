//! Composition queries through the registry.

use std::time::Duration;

use glam::Vec3;
use miasma_core::{AgentId, Category, Faction, ImprintSpec};
use miasma_engine::{AgentSpec, SharedKinematics, UpdateMode};
use miasma_test_utils::fixtures::open_registry;

fn skirmish() -> (miasma_engine::MapRegistry, AgentId, Vec3) {
    let mut r = open_registry(UpdateMode::Inline);
    let ally = Vec3::new(0.5, 0.0, 0.5);
    let id = r.register(
        AgentSpec::new(Faction::Player, SharedKinematics::fixed(ally))
            .with_imprint(ImprintSpec::new(Category::Location, 7, 1.0)),
    );
    r.register(
        AgentSpec::new(Faction::Enemy, SharedKinematics::fixed(Vec3::new(3.5, 0.0, 0.5)))
            .with_imprint(ImprintSpec::new(Category::Threat, 6, 1.0)),
    );
    r.update(Duration::from_millis(1));
    (r, id, ally)
}

#[test]
fn best_cell_avoids_enemy_threat() {
    let (mut r, _, ally) = skirmish();
    let best = r
        .composition(ally, 6)
        .add(Faction::Player, Category::Location, 1.0)
        .subtract(Faction::Enemy, Category::Threat, 2.0)
        .find_best_cell();
    assert!(best.x <= ally.x, "{best}");
    assert!(r.mask().is_valid(r.geometry().coordinate_of(best)));
}

#[test]
fn multiply_behaves_as_subtract() {
    let (mut r, _, ally) = skirmish();
    let subtracted = r
        .composition(ally, 4)
        .add(Faction::Player, Category::Location, 1.0)
        .subtract(Faction::Enemy, Category::Threat, 0.5)
        .buffer()
        .field()
        .values()
        .to_vec();
    let multiplied = r
        .composition(ally, 4)
        .add(Faction::Player, Category::Location, 1.0)
        .multiply(Faction::Enemy, Category::Threat, 0.5)
        .buffer()
        .field()
        .values()
        .to_vec();
    assert_eq!(subtracted, multiplied);
}

#[test]
fn exclude_self_removes_own_presence() {
    let (mut r, id, ally) = skirmish();
    let mut query = r.composition(ally, 8);
    query
        .add(Faction::Player, Category::Location, 1.0)
        .exclude_self_influence(id, Category::Location);
    assert!(query.buffer().field().values().iter().all(|v| v.abs() < 1e-5));
}

#[test]
fn exclude_self_uses_committed_cells() {
    let mut r = open_registry(UpdateMode::Inline);
    let k = SharedKinematics::fixed(Vec3::new(0.5, 0.0, 0.5));
    let id = r.register(
        AgentSpec::new(Faction::Player, k.clone())
            .with_imprint(ImprintSpec::new(Category::Location, 7, 1.0)),
    );
    r.update(Duration::from_millis(1));
    // Moved, but not yet repainted.
    let live = Vec3::new(2.5, 0.0, 0.5);
    k.set_position(live);

    for anchor in [live, Vec3::new(-3.5, 0.0, -2.5)] {
        let mut query = r.composition(anchor, 8);
        query
            .add(Faction::Player, Category::Location, 1.0)
            .exclude_self_influence(id, Category::Location);
        let residue = query.buffer().field().values().iter().fold(0.0f32, |m, v| m.max(v.abs()));
        assert!(residue < 1e-5, "anchor {anchor}: {residue}");
    }
}

#[test]
fn exclude_self_unknown_is_noop() {
    let (mut r, id, ally) = skirmish();
    let mut query = r.composition(ally, 8);
    query.add(Faction::Player, Category::Location, 1.0);
    let before = query.buffer().field().values().to_vec();
    query
        .exclude_self_influence(AgentId::next(), Category::Location)
        .exclude_self_influence(id, Category::Attractor);
    assert_eq!(query.buffer().field().values(), before.as_slice());
}

#[test]
fn normalize_then_invert() {
    let (mut r, _, ally) = skirmish();
    let mut query = r.composition(ally, 5);
    query
        .add(Faction::Enemy, Category::Threat, 3.0)
        .normalize();
    assert_eq!(query.buffer().field().max_value(), 1.0);
    query.invert();
    assert_eq!(query.buffer().field().max_value(), 0.0);
}

#[test]
fn empty_query_returns_anchor() {
    let (mut r, _, _) = skirmish();
    let anchor = Vec3::new(-6.3, 2.0, 6.1);
    assert_eq!(r.composition(anchor, 3).find_best_cell(), anchor);
}
