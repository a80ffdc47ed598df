//! Corridor seeding and thickening pass run after smoothing

use crate::algorithm::random::RandomSource;
use crate::io::configuration::{
    BRANCH_EMPTY_ODDS, BRANCH_SPARSE_MAX, BRANCH_SPARSE_MIN, BRANCH_SPARSE_RADIUS,
    THICKEN_NEIGHBOR_COUNT,
};
use crate::spatial::grid::{CellState, Grid};

/// Cells changed by branching, split by rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchStats {
    /// Empty cells filled by the probabilistic corridor rule
    pub seeded: usize,
    /// Empty cells filled by the thickening rule
    pub thickened: usize,
}

impl BranchStats {
    fn absorb(&mut self, other: Self) {
        self.seeded += other.seeded;
        self.thickened += other.thickened;
    }
}

/// Run `iterations` branching passes over the grid
pub fn branch(grid: &mut Grid, iterations: usize, rng: &mut RandomSource) -> BranchStats {
    let mut stats = BranchStats::default();
    for _ in 0..iterations {
        stats.absorb(branch_pass(grid, rng));
    }
    stats
}

/// Run a single branching pass
///
/// For every empty cell whose filled neighbors sit on one side and whose 5×5
/// surroundings are sparse, fill it with probability 2/3. Then any empty cell
/// with exactly four filled 3×3 neighbors is filled so corridors are never one
/// cell thin. Both rules read the grid as already mutated by this pass.
pub fn branch_pass(grid: &mut Grid, rng: &mut RandomSource) -> BranchStats {
    let mut stats = BranchStats::default();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let one_sided = filled_on_one_side(grid, x, y);
            let sparse = grid.filled_neighbors(x, y, BRANCH_SPARSE_RADIUS);
            let empty = grid.get(x, y) == Some(CellState::Empty);
            if one_sided && (BRANCH_SPARSE_MIN..=BRANCH_SPARSE_MAX).contains(&sparse) && empty {
                // a zero draw leaves the cell open
                if rng.below(BRANCH_EMPTY_ODDS) != 0 && grid.set(x, y, CellState::Filled) {
                    stats.seeded += 1;
                }
            }

            if grid.filled_neighbors(x, y, 1) == THICKEN_NEIGHBOR_COUNT
                && grid.get(x, y) == Some(CellState::Empty)
                && grid.set(x, y, CellState::Filled)
            {
                stats.thickened += 1;
            }
        }
    }
    stats
}

/// Whether the filled 3×3 neighbors of a cell all lie in one row or one column
///
/// Only in-bounds neighbors are considered and the cell itself is ignored. A
/// cell with no filled neighbors is not one-sided.
pub fn filled_on_one_side(grid: &Grid, x: usize, y: usize) -> bool {
    let (cx, cy) = (x as isize, y as isize);
    let mut first: Option<(isize, isize)> = None;
    let mut same_column = true;
    let mut same_row = true;

    for dx in -1..=1 {
        for dy in -1..=1 {
            if (dx, dy) == (0, 0) {
                continue;
            }
            let (Ok(nx), Ok(ny)) = (usize::try_from(cx + dx), usize::try_from(cy + dy)) else {
                continue;
            };
            if grid.get(nx, ny) != Some(CellState::Filled) {
                continue;
            }
            match first {
                None => first = Some((dx, dy)),
                Some((fx, fy)) => {
                    same_column &= fx == dx;
                    same_row &= fy == dy;
                }
            }
        }
    }

    first.is_some() && (same_column || same_row)
}
