//! Field windows: a field's placement on the world grid.
//!
//! A registry field covers the whole grid with zero offset. A composition
//! buffer covers a small square around an anchor cell and may hang off the
//! edge of the world; its `bounds` are the clipped part that overlaps the
//! grid. Local coordinates are relative to the window's `(0, 0)` cell.

use glam::{IVec2, Vec3};

use crate::geometry::GridGeometry;

/// Placement of a field on the world grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldWindow {
    geometry: GridGeometry,
    size: IVec2,
    anchor: IVec2,
    offset: IVec2,
    bounds_min: IVec2,
    bounds_max: IVec2,
}

impl FieldWindow {
    /// A window covering the entire world grid.
    pub fn whole(geometry: &GridGeometry) -> Self {
        let size = geometry.grid_size();
        Self {
            geometry: *geometry,
            size,
            anchor: geometry.world_origin(),
            offset: IVec2::ZERO,
            bounds_min: IVec2::ZERO,
            bounds_max: size - IVec2::ONE,
        }
    }

    /// A square window of side `2 * radius + 1` centred on `anchor`.
    ///
    /// The anchor may lie off the grid, in which case the window may be
    /// partially or entirely clipped (see [`is_empty`](Self::is_empty)).
    pub fn around(geometry: &GridGeometry, anchor: IVec2, radius: u32) -> Self {
        let r = radius as i32;
        let size = IVec2::splat(2 * r + 1);
        let offset = anchor - IVec2::splat(r);
        let bounds_min = IVec2::ZERO.max(-offset);
        let bounds_max = (size - IVec2::ONE).min(geometry.grid_size() - IVec2::ONE - offset);
        Self {
            geometry: *geometry,
            size,
            anchor,
            offset,
            bounds_min,
            bounds_max,
        }
    }

    /// The world geometry this window lives on.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Window dimensions in cells.
    pub fn size(&self) -> IVec2 {
        self.size
    }

    /// World grid coordinate of the window's centre cell.
    pub fn anchor(&self) -> IVec2 {
        self.anchor
    }

    /// World grid coordinate of local `(0, 0)`.
    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Inclusive lower corner of the part overlapping the world (local).
    pub fn bounds_min(&self) -> IVec2 {
        self.bounds_min
    }

    /// Inclusive upper corner of the part overlapping the world (local).
    pub fn bounds_max(&self) -> IVec2 {
        self.bounds_max
    }

    /// Local coordinate of the centre cell.
    pub fn centre(&self) -> IVec2 {
        self.size / 2
    }

    /// Number of cells in the window, clipped or not.
    pub fn len(&self) -> usize {
        self.size.x as usize * self.size.y as usize
    }

    /// Whether no part of the window overlaps the world grid.
    pub fn is_empty(&self) -> bool {
        self.bounds_min.x > self.bounds_max.x || self.bounds_min.y > self.bounds_max.y
    }

    /// Whether `local` lies in the clipped bounds.
    pub fn in_bounds(&self, local: IVec2) -> bool {
        local.cmpge(self.bounds_min).all() && local.cmple(self.bounds_max).all()
    }

    /// Local to world grid coordinate.
    pub fn to_world(&self, local: IVec2) -> IVec2 {
        local + self.offset
    }

    /// World grid to local coordinate.
    pub fn to_local(&self, world: IVec2) -> IVec2 {
        world - self.offset
    }

    /// Flat index of `local`, or `None` outside the clipped bounds.
    pub fn index_of_local(&self, local: IVec2) -> Option<usize> {
        if self.in_bounds(local) {
            Some(local.y as usize * self.size.x as usize + local.x as usize)
        } else {
            None
        }
    }

    /// Local coordinate of a flat index.
    pub fn local_of_index(&self, index: usize) -> IVec2 {
        let width = self.size.x as usize;
        IVec2::new((index % width) as i32, (index / width) as i32)
    }

    /// Local coordinate of the cell containing `position`.
    pub fn coordinate_of(&self, position: Vec3) -> IVec2 {
        self.to_local(self.geometry.coordinate_of(position))
    }

    /// World position of the centre of a local cell.
    pub fn position_of_local(&self, local: IVec2) -> Vec3 {
        self.geometry.position_of_coord(self.to_world(local))
    }

    /// Flat index of the cell containing `position`, or `None` when it
    /// falls outside the clipped bounds.
    pub fn index_of_position(&self, position: Vec3) -> Option<usize> {
        self.index_of_local(self.coordinate_of(position))
    }

    /// World position of the centre of the cell at `index`.
    pub fn position_of_index(&self, index: usize) -> Vec3 {
        self.position_of_local(self.local_of_index(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn geometry() -> GridGeometry {
        GridGeometry::new(1.0, Vec2::splat(-4.0), Vec2::splat(4.0)).unwrap()
    }

    #[test]
    fn whole_window_is_identity() {
        let g = geometry();
        let w = FieldWindow::whole(&g);
        assert_eq!(w.size(), g.grid_size());
        assert_eq!(w.offset(), IVec2::ZERO);
        assert_eq!(w.to_world(IVec2::new(3, 5)), IVec2::new(3, 5));
        assert_eq!(w.len(), g.cell_count());
        assert!(!w.is_empty());
    }

    #[test]
    fn interior_window_is_unclipped() {
        let g = geometry();
        let w = FieldWindow::around(&g, IVec2::new(4, 4), 2);
        assert_eq!(w.size(), IVec2::splat(5));
        assert_eq!(w.offset(), IVec2::splat(2));
        assert_eq!(w.bounds_min(), IVec2::ZERO);
        assert_eq!(w.bounds_max(), IVec2::splat(4));
        assert_eq!(w.to_world(w.centre()), IVec2::new(4, 4));
    }

    #[test]
    fn corner_window_is_clipped() {
        let g = geometry();
        let w = FieldWindow::around(&g, IVec2::ZERO, 2);
        assert_eq!(w.bounds_min(), IVec2::splat(2));
        assert_eq!(w.bounds_max(), IVec2::splat(4));
        assert_eq!(w.index_of_local(IVec2::ZERO), None);
        assert_eq!(w.index_of_local(IVec2::splat(2)), Some(12));

        let far = FieldWindow::around(&g, IVec2::splat(8), 1);
        assert_eq!(far.bounds_min(), IVec2::ZERO);
        assert_eq!(far.bounds_max(), IVec2::ONE);
        assert!(!far.is_empty());
    }

    #[test]
    fn window_off_the_grid_is_empty() {
        let g = geometry();
        let w = FieldWindow::around(&g, IVec2::new(-10, 4), 2);
        assert!(w.is_empty());
        assert_eq!(w.index_of_local(w.centre()), None);
    }

    #[test]
    fn positions_map_through_offset() {
        let g = geometry();
        let w = FieldWindow::around(&g, IVec2::new(4, 4), 1);
        let p = g.position_of_coord(IVec2::new(5, 3));
        assert_eq!(w.coordinate_of(p), IVec2::new(2, 0));
        assert_eq!(w.index_of_position(p), Some(2));
        assert_eq!(w.position_of_index(2), p);
    }
}
