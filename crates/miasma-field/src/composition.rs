//! Scratch buffer for blending fields around a query point.
//!
//! A [`CompositionBuffer`] is re-anchored for every query, accumulates
//! weighted copies of whole-world fields over its window, and then
//! searches that window for the best-scoring walkable cell.

use std::collections::VecDeque;

use glam::{IVec2, Vec3};
use miasma_core::ImprintSpec;
use miasma_space::{FieldWindow, GridGeometry, ValidityMask, NEIGHBOUR_OFFSETS};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::field::InfluenceField;
use crate::template::{FalloffTemplate, TemplateCache};

/// A reusable local field for combining influence around one position.
#[derive(Debug)]
pub struct CompositionBuffer {
    field: InfluenceField,
    anchor_position: Vec3,
    rng: ChaCha8Rng,
}

impl CompositionBuffer {
    /// An empty buffer on `geometry`. `seed` drives the search order.
    pub fn new(geometry: &GridGeometry, mask: ValidityMask, seed: u64) -> Self {
        let window = FieldWindow::around(geometry, geometry.world_origin(), 0);
        Self {
            field: InfluenceField::new(window, mask),
            anchor_position: geometry.position_of_coord(geometry.world_origin()),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Re-anchor on `position` with a window of `2 * radius + 1` cells and
    /// zero every value.
    pub fn reinit(&mut self, position: Vec3, radius: u32) {
        let geometry = *self.field.window().geometry();
        let anchor = geometry.coordinate_of(position);
        self.field.reinit(FieldWindow::around(&geometry, anchor, radius));
        self.anchor_position = position;
    }

    /// The buffer's contents.
    pub fn field(&self) -> &InfluenceField {
        &self.field
    }

    /// The position the buffer was last anchored on.
    pub fn anchor_position(&self) -> Vec3 {
        self.anchor_position
    }

    /// `value += source · weight` over the overlap with `source`.
    pub fn add_field(&mut self, source: &InfluenceField, weight: f32) {
        self.accumulate(source, weight);
    }

    /// `value -= source · weight` over the overlap with `source`.
    pub fn subtract_field(&mut self, source: &InfluenceField, weight: f32) {
        self.accumulate(source, -weight);
    }

    /// Subtracts, exactly like [`subtract_field`](Self::subtract_field).
    ///
    /// Kept under this name for callers that combine fields by "masking"
    /// one against another; it is not a cell-wise product.
    pub fn multiply_field(&mut self, source: &InfluenceField, weight: f32) {
        self.accumulate(source, -weight);
    }

    fn accumulate(&mut self, source: &InfluenceField, scale: f32) {
        let window = *self.field.window();
        if window.is_empty() {
            return;
        }
        let (lo, hi) = (window.bounds_min(), window.bounds_max());
        let values = self.field.values_mut();
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                let local = IVec2::new(x, y);
                let v = source.value_at_world(window.to_world(local));
                if v == 0.0 {
                    continue;
                }
                if let Some(i) = window.index_of_local(local) {
                    values[i] += v * scale;
                }
            }
        }
    }

    /// Divide every cell by the maximum value, if the maximum is positive.
    pub fn normalize(&mut self) {
        let max = self.field.max_value();
        if max > 0.0 {
            for v in self.field.values_mut() {
                *v /= max;
            }
        }
    }

    /// Negate every cell.
    pub fn invert(&mut self) {
        for v in self.field.values_mut() {
            *v = -*v;
        }
    }

    /// Remove one imprint painted at world cells `location`/`future`.
    pub fn exclude_imprint(
        &mut self,
        templates: &TemplateCache,
        imprint: &ImprintSpec,
        location: IVec2,
        future: IVec2,
    ) {
        self.field.paint_imprint(templates, imprint, location, future, -1.0);
    }

    /// World position of the best walkable cell reachable from the centre.
    ///
    /// Each cell's value is weighted by `interest` aligned on the window
    /// centre. Blocked cells are neither scored nor expanded, so a pocket
    /// behind a wall only wins if a walkable path inside the window leads
    /// to it. The search is breadth-first with a neighbour order shuffled
    /// on every call, so ties are broken differently from query to query
    /// while staying reproducible for a given seed. Falls back to the
    /// anchor position when nothing non-zero is found.
    pub fn find_best_cell(&mut self, interest: &FalloffTemplate) -> Vec3 {
        let window = *self.field.window();
        let centre = window.centre();
        if !window.in_bounds(centre) {
            return self.anchor_position;
        }
        let reach = IVec2::splat(interest.center());
        let scored = |field: &InfluenceField, local: IVec2| {
            field.value_at_local(local) * interest.weight(local - centre + reach)
        };

        let mut order = NEIGHBOUR_OFFSETS;
        order.shuffle(&mut self.rng);

        let mut best: Option<(IVec2, f32)> = None;
        let mut consider = |local: IVec2, score: f32| {
            if score != 0.0 && best.is_none_or(|(_, b)| score > b) {
                best = Some((local, score));
            }
        };

        if self.field.is_valid_local(centre) {
            consider(centre, scored(&self.field, centre));
        }

        let mut visited = vec![false; window.len()];
        let mut frontier = VecDeque::new();
        if let Some(i) = window.index_of_local(centre) {
            visited[i] = true;
        }
        frontier.push_back(centre);

        while let Some(cell) = frontier.pop_front() {
            for offset in order {
                let next = cell + offset;
                let Some(i) = window.index_of_local(next) else {
                    continue;
                };
                if visited[i] || !self.field.is_valid_local(next) {
                    continue;
                }
                visited[i] = true;
                frontier.push_back(next);
                consider(next, scored(&self.field, next));
            }
        }

        best.map_or(self.anchor_position, |(local, _)| window.position_of_local(local))
    }
}
