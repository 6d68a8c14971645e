//! Error types for grid construction.

use glam::Vec2;

/// Errors arising from grid geometry or mask construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Cell size must be finite and strictly positive.
    #[error("cell size must be finite and positive, got {value}")]
    InvalidCellSize {
        /// The rejected value.
        value: f32,
    },
    /// The world bounds enclose no area.
    #[error("world bounds {min} .. {max} enclose no area")]
    EmptyWorld {
        /// Lower world-plane corner.
        min: Vec2,
        /// Upper world-plane corner.
        max: Vec2,
    },
    /// A mask's cell vector does not match the grid.
    #[error("mask has {actual} cells, grid has {expected}")]
    MaskSizeMismatch {
        /// Number of cells in the grid.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
}
