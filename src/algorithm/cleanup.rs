//! Removal of undersized filled and empty regions

use crate::spatial::grid::{CellState, Grid};
use crate::spatial::regions::{Region, regions_of};

/// Regions and cells flipped by one cleanup pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Regions below the size limit
    pub regions: usize,
    /// Cells whose state actually changed
    pub cells: usize,
}

/// Outcome of [`cleanup`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Small filled regions cleared to empty
    pub cleared: PassStats,
    /// Small empty regions filled in
    pub filled: PassStats,
}

/// Clear small rock islands, then fill small pockets of water
///
/// Filled regions smaller than `filled_min_size` become empty. The empty
/// regions are then recomputed on the updated grid and those smaller than
/// `empty_min_size` become filled, so a cleared island that merged into a
/// pocket can be filled again by the second pass.
pub fn cleanup(grid: &mut Grid, filled_min_size: usize, empty_min_size: usize) -> CleanupReport {
    let cleared = flip_small_regions(grid, CellState::Filled, filled_min_size);
    let filled = flip_small_regions(grid, CellState::Empty, empty_min_size);
    CleanupReport { cleared, filled }
}

fn flip_small_regions(grid: &mut Grid, state: CellState, min_size: usize) -> PassStats {
    let small: Vec<Region> = regions_of(grid, state)
        .into_iter()
        .filter(|region| region.len() < min_size)
        .collect();

    let mut stats = PassStats {
        regions: small.len(),
        cells: 0,
    };
    for region in &small {
        for cell in region.cells() {
            if grid.set(cell.x, cell.y, state.flipped()) {
                stats.cells += 1;
            }
        }
    }
    stats
}
