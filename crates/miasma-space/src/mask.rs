//! Validity masks: which world cells influence may occupy.

use std::sync::Arc;

use glam::{IVec2, Vec3};

use crate::error::GridError;
use crate::geometry::GridGeometry;

/// Navigation predicate supplied by the host.
///
/// Queried once per cell centre when a mask is built; never during
/// painting. Any `Fn(Vec3) -> bool` is a `Walkability`.
pub trait Walkability {
    /// Whether an agent could stand at `position`.
    fn is_walkable(&self, position: Vec3) -> bool;
}

impl<F> Walkability for F
where
    F: Fn(Vec3) -> bool,
{
    fn is_walkable(&self, position: Vec3) -> bool {
        self(position)
    }
}

/// One walkability flag per world cell, row-major.
///
/// Immutable once built. Clones share the same cell storage.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidityMask {
    cells: Arc<[bool]>,
    width: i32,
    height: i32,
}

impl ValidityMask {
    /// Every cell walkable.
    pub fn all_valid(geometry: &GridGeometry) -> Self {
        Self::from_fn(geometry, |_| true)
    }

    /// Build from a per-coordinate predicate.
    pub fn from_fn(geometry: &GridGeometry, mut f: impl FnMut(IVec2) -> bool) -> Self {
        let cells: Vec<bool> = (0..geometry.cell_count())
            .map(|i| f(geometry.coord_of_index(i)))
            .collect();
        Self {
            cells: cells.into(),
            width: geometry.width(),
            height: geometry.height(),
        }
    }

    /// Build by sampling `walkability` at every cell centre.
    pub fn from_walkability(geometry: &GridGeometry, walkability: &impl Walkability) -> Self {
        Self::from_fn(geometry, |c| {
            walkability.is_walkable(geometry.position_of_coord(c))
        })
    }

    /// Build from a prepared row-major cell vector.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::MaskSizeMismatch`] if `cells` does not hold
    /// exactly one entry per grid cell.
    pub fn from_cells(geometry: &GridGeometry, cells: Vec<bool>) -> Result<Self, GridError> {
        if cells.len() != geometry.cell_count() {
            return Err(GridError::MaskSizeMismatch {
                expected: geometry.cell_count(),
                actual: cells.len(),
            });
        }
        Ok(Self {
            cells: cells.into(),
            width: geometry.width(),
            height: geometry.height(),
        })
    }

    /// Whether the world cell `coord` is walkable. Off-grid cells are not.
    pub fn is_valid(&self, coord: IVec2) -> bool {
        if coord.x < 0 || coord.y < 0 || coord.x >= self.width || coord.y >= self.height {
            return false;
        }
        self.cells[coord.y as usize * self.width as usize + coord.x as usize]
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the mask covers no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of walkable cells.
    pub fn count_valid(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    /// Whether the mask was built for `geometry`.
    pub fn matches(&self, geometry: &GridGeometry) -> bool {
        self.width == geometry.width() && self.height == geometry.height()
    }

    /// Raw row-major cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}
