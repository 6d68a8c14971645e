//! 4-connected traversal order shared by every flood-fill.

use glam::IVec2;
use smallvec::SmallVec;

/// Neighbour offsets in traversal order: north, west, south, east.
///
/// North is `+y` (world `+z`).
pub const NEIGHBOUR_OFFSETS: [IVec2; 4] = [
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
    IVec2::new(0, -1),
    IVec2::new(1, 0),
];

/// The 4-neighbours of `coord` inside the inclusive rectangle
/// `min..=max`, in [`NEIGHBOUR_OFFSETS`] order.
pub fn neighbours_within(coord: IVec2, min: IVec2, max: IVec2) -> SmallVec<[IVec2; 4]> {
    let mut result = SmallVec::new();
    for offset in NEIGHBOUR_OFFSETS {
        let n = coord + offset;
        if n.cmpge(min).all() && n.cmple(max).all() {
            result.push(n);
        }
    }
    result
}
