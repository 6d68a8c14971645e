//! Registry-level composition queries.
//!
//! A [`Composition`] borrows its [`MapRegistry`] mutably for as long as it
//! lives, so only one query can use the registry's buffer at a time.

use glam::Vec3;
use miasma_core::{AgentId, Category, Faction};
use miasma_field::{CompositionBuffer, InfluenceField};

use crate::registry::MapRegistry;

/// A composition query in progress. Created by
/// [`MapRegistry::composition`].
///
/// ```no_run
/// # use miasma_engine::{MapRegistry, RegistryConfig};
/// # use miasma_core::{Category, Faction};
/// # use miasma_space::ValidityMask;
/// # use glam::Vec3;
/// # let config = RegistryConfig::default();
/// # let mask = ValidityMask::all_valid(&config.geometry().unwrap());
/// # let mut registry = MapRegistry::new(config, mask).unwrap();
/// let target = registry
///     .composition(Vec3::ZERO, 8)
///     .add(Faction::Player, Category::Location, 1.0)
///     .subtract(Faction::Enemy, Category::Threat, 2.0)
///     .find_best_cell();
/// ```
pub struct Composition<'a> {
    registry: &'a mut MapRegistry,
    radius: u32,
}

impl<'a> Composition<'a> {
    pub(crate) fn new(registry: &'a mut MapRegistry, radius: u32) -> Self {
        Self { registry, radius }
    }

    fn blend(
        &mut self,
        faction: Faction,
        category: Category,
        op: impl FnOnce(&mut CompositionBuffer, &InfluenceField),
    ) -> &mut Self {
        let registry = &mut *self.registry;
        let field = registry.fields.get(faction, category).lock();
        op(&mut registry.buffer, &*field);
        drop(field);
        self
    }

    /// Add `(faction, category)` scaled by `weight`.
    pub fn add(&mut self, faction: Faction, category: Category, weight: f32) -> &mut Self {
        self.blend(faction, category, |buf, field| buf.add_field(field, weight))
    }

    /// Subtract `(faction, category)` scaled by `weight`.
    pub fn subtract(&mut self, faction: Faction, category: Category, weight: f32) -> &mut Self {
        self.blend(faction, category, |buf, field| {
            buf.subtract_field(field, weight)
        })
    }

    /// See [`CompositionBuffer::multiply_field`]: this subtracts.
    pub fn multiply(&mut self, faction: Faction, category: Category, weight: f32) -> &mut Self {
        self.blend(faction, category, |buf, field| {
            buf.multiply_field(field, weight)
        })
    }

    /// Scale so the maximum is 1, if the maximum is positive.
    pub fn normalize(&mut self) -> &mut Self {
        self.registry.buffer.normalize();
        self
    }

    /// Negate every cell.
    pub fn invert(&mut self) -> &mut Self {
        self.registry.buffer.invert();
        self
    }

    /// Remove `agent`'s own `category` imprints from the buffer, at the
    /// cells they are currently committed to.
    ///
    /// The erase is placed at the agent's committed cells, not at the
    /// buffer's centre. When the query is anchored on the agent's live
    /// position and the agent has moved since the last repaint, or the
    /// query is anchored somewhere else entirely, the removed imprint sits
    /// where the fields actually hold it rather than under the anchor.
    ///
    /// No-op if the agent is not active or carries no such imprint.
    pub fn exclude_self_influence(&mut self, agent: AgentId, category: Category) -> &mut Self {
        let registry = &mut *self.registry;
        if let Some(record) = registry.agents.get(&agent) {
            for imprint in record.spec.imprints.iter().filter(|i| i.category == category) {
                registry
                    .buffer
                    .exclude_imprint(&registry.templates, imprint, record.location, record.future);
            }
        }
        self
    }

    /// World position of the best walkable cell in the window, weighted
    /// by the interest template for the query radius.
    pub fn find_best_cell(&mut self) -> Vec3 {
        let registry = &mut *self.registry;
        let interest = registry.templates.interest(self.radius);
        registry.buffer.find_best_cell(interest)
    }

    /// The buffer as composed so far.
    pub fn buffer(&self) -> &CompositionBuffer {
        &self.registry.buffer
    }
}
