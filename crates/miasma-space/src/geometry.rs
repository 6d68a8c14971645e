//! World-level grid geometry and coordinate conversions.

use glam::{IVec2, Vec2, Vec3};

use crate::error::GridError;

/// The world grid: a rectangle of square cells laid over the x/z plane.
///
/// Both grid dimensions are odd so a unique centre cell exists. The cell
/// count per axis is `trunc(|max - min| / cell_size)`, bumped by one when
/// even.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    cell_size: f32,
    grid_size: IVec2,
    world_origin: IVec2,
    min: Vec2,
    max: Vec2,
}

impl GridGeometry {
    /// Build a grid covering `min..max` with cells of `cell_size`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCellSize`] for a non-finite or
    /// non-positive cell size and [`GridError::EmptyWorld`] when the bounds
    /// are not finite or enclose no area on either axis.
    pub fn new(cell_size: f32, min: Vec2, max: Vec2) -> Result<Self, GridError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize { value: cell_size });
        }
        let extent = max - min;
        if !extent.is_finite() || extent.x <= 0.0 || extent.y <= 0.0 {
            return Err(GridError::EmptyWorld { min, max });
        }
        let cells = extent / cell_size;
        let grid_size = IVec2::new(force_odd(cells.x as i32), force_odd(cells.y as i32));
        Ok(Self {
            cell_size,
            grid_size,
            world_origin: grid_size / 2,
            min,
            max,
        })
    }

    /// Edge length of one cell in world units.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cells per axis (both odd).
    pub fn grid_size(&self) -> IVec2 {
        self.grid_size
    }

    /// Grid coordinate of the centre cell.
    pub fn world_origin(&self) -> IVec2 {
        self.world_origin
    }

    /// Lower world-plane corner.
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Upper world-plane corner as configured.
    pub fn max(&self) -> Vec2 {
        self.max
    }

    /// Cells along x.
    pub fn width(&self) -> i32 {
        self.grid_size.x
    }

    /// Cells along y (world z).
    pub fn height(&self) -> i32 {
        self.grid_size.y
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.grid_size.x as usize * self.grid_size.y as usize
    }

    /// Whether `coord` lies on the grid.
    pub fn contains(&self, coord: IVec2) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.grid_size.x && coord.y < self.grid_size.y
    }

    /// Clamp `coord` onto the grid.
    pub fn clamp(&self, coord: IVec2) -> IVec2 {
        coord.clamp(IVec2::ZERO, self.grid_size - IVec2::ONE)
    }

    /// Grid coordinate of the cell containing `position`.
    ///
    /// Positions outside the world produce coordinates outside the grid;
    /// use [`contains`](Self::contains) or [`clamp`](Self::clamp).
    pub fn coordinate_of(&self, position: Vec3) -> IVec2 {
        let plane = Vec2::new(position.x, position.z);
        ((plane - self.min) / self.cell_size).floor().as_ivec2()
    }

    /// World position of the centre of `coord`, with height 0.
    pub fn position_of_coord(&self, coord: IVec2) -> Vec3 {
        let plane = self.min + (coord.as_vec2() + Vec2::splat(0.5)) * self.cell_size;
        Vec3::new(plane.x, 0.0, plane.y)
    }

    /// Row-major flat index of `coord`, or `None` off the grid.
    pub fn index_of_coord(&self, coord: IVec2) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y as usize * self.grid_size.x as usize + coord.x as usize)
        } else {
            None
        }
    }

    /// Grid coordinate of a row-major flat index.
    pub fn coord_of_index(&self, index: usize) -> IVec2 {
        let width = self.grid_size.x as usize;
        IVec2::new((index % width) as i32, (index / width) as i32)
    }

    /// Flat index of the cell containing `position`, or `None` off the grid.
    pub fn index_of_position(&self, position: Vec3) -> Option<usize> {
        self.index_of_coord(self.coordinate_of(position))
    }

    /// World position of the centre of the cell at `index`.
    pub fn position_of_index(&self, index: usize) -> Vec3 {
        self.position_of_coord(self.coord_of_index(index))
    }
}

fn force_odd(n: i32) -> i32 {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn geometry() -> GridGeometry {
        GridGeometry::new(1.0, Vec2::splat(-8.0), Vec2::splat(8.0)).unwrap()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn even_extent_is_forced_odd() {
        let g = geometry();
        assert_eq!(g.grid_size(), IVec2::new(17, 17));
        assert_eq!(g.world_origin(), IVec2::new(8, 8));
        assert_eq!(g.cell_count(), 289);
    }

    #[test]
    fn odd_extent_is_kept() {
        let g = GridGeometry::new(0.5, Vec2::ZERO, Vec2::new(4.5, 2.5)).unwrap();
        assert_eq!(g.grid_size(), IVec2::new(9, 5));
    }

    #[test]
    fn rejects_bad_cell_size() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = GridGeometry::new(bad, Vec2::ZERO, Vec2::ONE).unwrap_err();
            assert!(matches!(err, GridError::InvalidCellSize { .. }));
        }
    }

    #[test]
    fn rejects_empty_world() {
        let err = GridGeometry::new(1.0, Vec2::ONE, Vec2::ONE).unwrap_err();
        assert_eq!(
            err,
            GridError::EmptyWorld {
                min: Vec2::ONE,
                max: Vec2::ONE
            }
        );
        assert!(GridGeometry::new(1.0, Vec2::ONE, Vec2::ZERO).is_err());
    }

    // ── Conversions ─────────────────────────────────────────────

    #[test]
    fn coordinate_floors_negative_positions() {
        let g = geometry();
        assert_eq!(g.coordinate_of(Vec3::new(-8.0, 3.0, -8.0)), IVec2::ZERO);
        assert_eq!(g.coordinate_of(Vec3::new(-0.1, 0.0, 0.1)), IVec2::new(7, 8));
        assert_eq!(g.coordinate_of(Vec3::new(-9.0, 0.0, 0.0)), IVec2::new(-1, 8));
    }

    #[test]
    fn position_is_cell_centre_at_ground() {
        let g = geometry();
        let p = g.position_of_coord(IVec2::new(8, 8));
        assert_eq!(p, Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn index_is_row_major() {
        let g = geometry();
        assert_eq!(g.index_of_coord(IVec2::new(3, 2)), Some(2 * 17 + 3));
        assert_eq!(g.coord_of_index(2 * 17 + 3), IVec2::new(3, 2));
        assert_eq!(g.index_of_coord(IVec2::new(17, 0)), None);
        assert_eq!(g.index_of_coord(IVec2::new(0, -1)), None);
    }

    #[test]
    fn clamp_pins_to_edges() {
        let g = geometry();
        assert_eq!(g.clamp(IVec2::new(-4, 40)), IVec2::new(0, 16));
    }

    proptest! {
        #[test]
        fn coordinate_round_trip(x in 0i32..17, y in 0i32..17) {
            let g = geometry();
            let c = IVec2::new(x, y);
            prop_assert_eq!(g.coordinate_of(g.position_of_coord(c)), c);
            let i = g.index_of_coord(c).unwrap();
            prop_assert_eq!(g.coord_of_index(i), c);
            prop_assert_eq!(g.index_of_position(g.position_of_index(i)), Some(i));
        }
    }
}
