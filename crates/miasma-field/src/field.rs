//! Influence fields and the obstacle-aware flood-fill.
//!
//! [`InfluenceField::paint`] stamps a [`FalloffTemplate`] onto the field by
//! breadth-first search from the origin cell, so influence only reaches a
//! cell through a chain of walkable neighbours. Each BFS ring is further
//! attenuated by the template's own curve evaluated at the hop count
//! (`max_hops = radius + 1`), which makes paths that wind around
//! obstacles decay faster than the straight-line template alone.
//!
//! Painting is purely additive: painting the same template with `-amount`
//! at the same origin undoes it exactly, as long as the mask is unchanged.

use std::collections::VecDeque;

use glam::{IVec2, Vec3};
use miasma_core::ImprintSpec;
use miasma_space::{neighbours_within, FieldWindow, GridGeometry, ValidityMask};

use crate::template::{FalloffTemplate, TemplateCache};

/// A rectangular grid of influence values over (part of) the world.
#[derive(Clone, Debug)]
pub struct InfluenceField {
    window: FieldWindow,
    mask: ValidityMask,
    values: Vec<f32>,
}

impl InfluenceField {
    /// A zeroed field placed at `window`.
    pub fn new(window: FieldWindow, mask: ValidityMask) -> Self {
        Self {
            values: vec![0.0; window.len()],
            window,
            mask,
        }
    }

    /// A zeroed field covering the whole world grid.
    pub fn whole(geometry: &GridGeometry, mask: ValidityMask) -> Self {
        Self::new(FieldWindow::whole(geometry), mask)
    }

    /// Move the field to `window` and zero it, reusing the allocation.
    pub fn reinit(&mut self, window: FieldWindow) {
        self.window = window;
        self.values.clear();
        self.values.resize(window.len(), 0.0);
    }

    /// Placement on the world grid.
    pub fn window(&self) -> &FieldWindow {
        &self.window
    }

    /// The shared validity mask.
    pub fn mask(&self) -> &ValidityMask {
        &self.mask
    }

    /// Row-major values over the window.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.values.fill(0.0);
    }

    /// Whether `local` is inside the clipped bounds and walkable.
    pub fn is_valid_local(&self, local: IVec2) -> bool {
        self.window.in_bounds(local) && self.mask.is_valid(self.window.to_world(local))
    }

    /// Value at a local coordinate, `0.0` outside the clipped bounds.
    pub fn value_at_local(&self, local: IVec2) -> f32 {
        self.window
            .index_of_local(local)
            .map_or(0.0, |i| self.values[i])
    }

    /// Value at a world grid coordinate, `0.0` outside the field.
    pub fn value_at_world(&self, world: IVec2) -> f32 {
        self.value_at_local(self.window.to_local(world))
    }

    /// Value of the cell containing `position`, `0.0` outside the field.
    pub fn value_at_position(&self, position: Vec3) -> f32 {
        self.value_at_local(self.coordinate_of(position))
    }

    /// Local coordinate of the cell containing `position`.
    pub fn coordinate_of(&self, position: Vec3) -> IVec2 {
        self.window.coordinate_of(position)
    }

    /// Flat index of the cell containing `position`, if inside the field.
    pub fn index_of_position(&self, position: Vec3) -> Option<usize> {
        self.window.index_of_position(position)
    }

    /// World position of the cell at flat `index`.
    pub fn position_of_index(&self, index: usize) -> Vec3 {
        self.window.position_of_index(index)
    }

    /// Largest value in the field, or `0.0` if none is positive.
    pub fn max_value(&self) -> f32 {
        self.values.iter().copied().fold(0.0, f32::max)
    }

    /// Flood-fill `template` scaled by `amount` from the local cell `origin`.
    ///
    /// Returns the number of cells written. Nothing is written when the
    /// origin lies outside the clipped bounds. A blocked origin is not
    /// written but still seeds the search.
    pub fn paint(&mut self, origin: IVec2, template: &FalloffTemplate, amount: f32) -> usize {
        if !self.window.in_bounds(origin) {
            return 0;
        }
        let radius = template.center();
        let max_hops = (radius + 1) as f32;
        let curve = template.curve();
        let reach = IVec2::splat(radius);
        let clip_min = self.window.bounds_min().max(origin - reach);
        let clip_max = self.window.bounds_max().min(origin + reach);
        let clip_w = (clip_max.x - clip_min.x + 1) as usize;
        let clip_h = (clip_max.y - clip_min.y + 1) as usize;
        let slot = |c: IVec2| (c.y - clip_min.y) as usize * clip_w + (c.x - clip_min.x) as usize;
        // Template coordinate of a local cell.
        let stencil = |c: IVec2| c - origin + reach;

        let mut visited = vec![false; clip_w * clip_h];
        let mut frontier = VecDeque::new();
        let mut written = 0;

        visited[slot(origin)] = true;
        if self.is_valid_local(origin) {
            if let Some(i) = self.window.index_of_local(origin) {
                self.values[i] += template.centre_weight() * amount;
                written += 1;
            }
        }
        frontier.push_back((origin, 1u32));

        while let Some((cell, hop)) = frontier.pop_front() {
            let decay = curve.evaluate(hop as f32, max_hops);
            for next in neighbours_within(cell, clip_min, clip_max) {
                let s = slot(next);
                if visited[s] || !self.mask.is_valid(self.window.to_world(next)) {
                    continue;
                }
                visited[s] = true;
                if let Some(i) = self.window.index_of_local(next) {
                    self.values[i] += template.weight(stencil(next)) * decay * amount;
                    written += 1;
                }
                frontier.push_back((next, hop + 1));
            }
        }
        written
    }

    /// Paint one imprint at world grid coordinates, scaled by `sign`.
    ///
    /// Categories that split presence paint half the peak at `current` and
    /// half at `future`; all others paint the full peak at `current` only.
    /// Returns the number of paint passes issued.
    pub fn paint_imprint(
        &mut self,
        templates: &TemplateCache,
        imprint: &ImprintSpec,
        current: IVec2,
        future: IVec2,
        sign: f32,
    ) -> usize {
        let template = templates.imprint(imprint.category, imprint.radius);
        if imprint.category.splits_presence() {
            let half = 0.5 * imprint.peak * sign;
            self.paint(self.window.to_local(current), template, half);
            self.paint(self.window.to_local(future), template, half);
            2
        } else {
            self.paint(self.window.to_local(current), template, imprint.peak * sign);
            1
        }
    }
}
