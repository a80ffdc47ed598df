//! Majority-rule cellular automaton that shapes noise into caves

use crate::spatial::grid::{CellState, Grid};

/// Run `iterations` smoothing passes over the grid
///
/// Returns the number of cells changed across all passes.
pub fn smooth(grid: &mut Grid, iterations: usize, threshold: usize) -> usize {
    (0..iterations)
        .map(|_| smooth_pass(grid, threshold))
        .sum()
}

/// Run a single smoothing pass
///
/// Each cell counts its filled 3×3 neighbors, with off-grid positions counting
/// as filled. More than `threshold` fills the cell, fewer empties it, a tie
/// leaves it alone. The pass mutates the grid in place, so cells visited later
/// see the updates made earlier in the same pass.
pub fn smooth_pass(grid: &mut Grid, threshold: usize) -> usize {
    let mut changed = 0;
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let filled = grid.filled_neighbors(x, y, 1);
            let next = match filled.cmp(&threshold) {
                std::cmp::Ordering::Greater => CellState::Filled,
                std::cmp::Ordering::Less => CellState::Empty,
                std::cmp::Ordering::Equal => continue,
            };
            if grid.set(x, y, next) {
                changed += 1;
            }
        }
    }
    changed
}
