//! Connected-component analysis over orthogonal adjacency
//!
//! Regions are discovered by scanning the grid x outer, y inner and flood
//! filling breadth-first from every unvisited matching cell. The cells of a
//! region keep their discovery order, which later stages draw indices from.

use std::collections::VecDeque;

use bitvec::prelude::*;

use crate::spatial::grid::{CellState, Grid, Position};

/// Orthogonal neighbor offsets in visiting order: west, south, north, east
const ORTHOGONAL_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Maximal set of same-state cells connected through shared edges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    state: CellState,
    cells: Vec<Position>,
}

impl Region {
    /// State shared by every cell of the region
    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Cells in breadth-first discovery order
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Take ownership of the cells
    pub fn into_cells(self) -> Vec<Position> {
        self.cells
    }

    /// Number of cells
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the region holds no cells
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the region contains a position
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }
}

/// Every region of the given state
///
/// The returned regions are pairwise disjoint and together cover every cell
/// in `state`. A grid without such cells yields an empty list.
pub fn regions_of(grid: &Grid, state: CellState) -> Vec<Region> {
    let mut visited = bitvec![0; grid.width() * grid.height()];
    let mut regions = Vec::new();

    for position in grid.positions() {
        let seen = visited
            .get(index_of(grid, position))
            .as_deref()
            .copied()
            .unwrap_or(true);
        if !seen && grid.get(position.x, position.y) == Some(state) {
            regions.push(flood_fill(grid, position, state, &mut visited));
        }
    }
    regions
}

/// The region containing `start`, or `None` if the position is off the grid
pub fn region_at(grid: &Grid, start: Position) -> Option<Region> {
    let state = grid.get(start.x, start.y)?;
    let mut visited = bitvec![0; grid.width() * grid.height()];
    Some(flood_fill(grid, start, state, &mut visited))
}

fn flood_fill(grid: &Grid, start: Position, state: CellState, visited: &mut BitVec) -> Region {
    let mut cells = Vec::new();
    let mut queue = VecDeque::from([start]);
    visited.set(index_of(grid, start), true);

    while let Some(cell) = queue.pop_front() {
        cells.push(cell);
        for (dx, dy) in ORTHOGONAL_OFFSETS {
            let (Some(nx), Some(ny)) = (
                cell.x.checked_add_signed(dx),
                cell.y.checked_add_signed(dy),
            ) else {
                continue;
            };
            if grid.get(nx, ny) != Some(state) {
                continue;
            }
            let neighbor = Position::new(nx, ny);
            let index = index_of(grid, neighbor);
            if visited.get(index).as_deref() == Some(&false) {
                visited.set(index, true);
                queue.push_back(neighbor);
            }
        }
    }

    Region { state, cells }
}

const fn index_of(grid: &Grid, position: Position) -> usize {
    position.x * grid.height() + position.y
}
