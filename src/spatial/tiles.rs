//! Tile archetype classification from orthogonal neighbor patterns
//!
//! Each filled cell is described by which of its four orthogonal neighbors
//! are empty. That pattern is packed into a 4-bit mask and looked up in a
//! sixteen-entry table giving the tile archetype and how its rotation is
//! chosen. Orientation `n` means a counter-clockwise turn of `90 * n` degrees.

use std::fmt;


use crate::algorithm::random::RandomSource;
use crate::io::error::{CaveError, Result, invalid_parameter};
use crate::spatial::grid::{CellState, Grid, Position};

/// Renderable tile archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Empty cell
    Open,
    /// Filled cell enclosed on all four sides
    Center,
    /// Filled cell with no filled orthogonal neighbor
    Floating,
    /// Filled cell with exactly one open side
    Edge,
    /// Filled cell open on two opposite sides
    Column,
    /// Filled cell open on three sides
    EndCap,
    /// Filled cell open on two adjacent sides
    Corner,
}

impl TileKind {
    /// All archetypes in index order
    pub const ALL: [Self; 7] = [
        Self::Open,
        Self::Center,
        Self::Floating,
        Self::Edge,
        Self::Column,
        Self::EndCap,
        Self::Corner,
    ];

    /// Numeric tile type used by rendering collaborators
    pub const fn index(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Center => 1,
            Self::Floating => 2,
            Self::Edge => 3,
            Self::Column => 4,
            Self::EndCap => 5,
            Self::Corner => 6,
        }
    }
}

/// How the orientation of a tile is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Always this orientation
    Fixed(u8),
    /// Uniformly one of the four orientations
    AnyQuarter,
    /// `base` or `base + 2`, chosen uniformly
    HalfTurnFrom(u8),
}

/// Table entry for one neighbor pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRule {
    /// Archetype of the tile
    pub kind: TileKind,
    /// Orientation choice
    pub rotation: Rotation,
}

const fn rule(kind: TileKind, rotation: Rotation) -> TileRule {
    TileRule { kind, rotation }
}

/// Mask bit set when the northern neighbor is empty
pub const NORTH_OPEN: u8 = 0b0001;
/// Mask bit set when the eastern neighbor is empty
pub const EAST_OPEN: u8 = 0b0010;
/// Mask bit set when the southern neighbor is empty
pub const SOUTH_OPEN: u8 = 0b0100;
/// Mask bit set when the western neighbor is empty
pub const WEST_OPEN: u8 = 0b1000;

// Indexed by open-neighbor mask
const TILE_RULES: [TileRule; 16] = [
    rule(TileKind::Center, Rotation::AnyQuarter),
    rule(TileKind::Edge, Rotation::Fixed(0)),
    rule(TileKind::Edge, Rotation::Fixed(3)),
    rule(TileKind::Corner, Rotation::Fixed(3)),
    rule(TileKind::Edge, Rotation::Fixed(2)),
    rule(TileKind::Column, Rotation::HalfTurnFrom(1)),
    rule(TileKind::Corner, Rotation::Fixed(2)),
    rule(TileKind::EndCap, Rotation::Fixed(3)),
    rule(TileKind::Edge, Rotation::Fixed(1)),
    rule(TileKind::Corner, Rotation::Fixed(0)),
    rule(TileKind::Column, Rotation::HalfTurnFrom(0)),
    rule(TileKind::EndCap, Rotation::Fixed(0)),
    rule(TileKind::Corner, Rotation::Fixed(1)),
    rule(TileKind::EndCap, Rotation::Fixed(1)),
    rule(TileKind::EndCap, Rotation::Fixed(2)),
    rule(TileKind::Floating, Rotation::AnyQuarter),
];

/// Rule for an open-neighbor mask, `None` for masks outside the table
pub fn lookup(mask: u8) -> Option<TileRule> {
    TILE_RULES.get(usize::from(mask)).copied()
}

/// States of the four orthogonal neighbors of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    /// Neighbor at `y + 1`
    pub north: CellState,
    /// Neighbor at `x + 1`
    pub east: CellState,
    /// Neighbor at `y - 1`
    pub south: CellState,
    /// Neighbor at `x - 1`
    pub west: CellState,
}

impl Neighborhood {
    /// Read the neighbors of a cell, treating off-grid positions as filled
    pub fn around(grid: &Grid, x: usize, y: usize) -> Self {
        let (x, y) = (x as isize, y as isize);
        Self {
            north: grid.state_or_filled(x, y + 1),
            east: grid.state_or_filled(x + 1, y),
            south: grid.state_or_filled(x, y - 1),
            west: grid.state_or_filled(x - 1, y),
        }
    }

    /// Pack the empty neighbors into a 4-bit mask
    pub const fn open_mask(&self) -> u8 {
        let mut mask = 0;
        if !self.north.is_filled() {
            mask |= NORTH_OPEN;
        }
        if !self.east.is_filled() {
            mask |= EAST_OPEN;
        }
        if !self.south.is_filled() {
            mask |= SOUTH_OPEN;
        }
        if !self.west.is_filled() {
            mask |= WEST_OPEN;
        }
        mask
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N={:?} E={:?} S={:?} W={:?}",
            self.north, self.east, self.south, self.west
        )
    }
}

/// Classified tile for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDescriptor {
    /// Grid position of the cell
    pub position: Position,
    /// Archetype of the tile
    pub kind: TileKind,
    /// Quarter turns counter-clockwise, in `0..4`
    pub orientation: u8,
}

impl TileDescriptor {
    /// Rotation in degrees
    pub fn rotation_degrees(&self) -> u16 {
        u16::from(self.orientation) * 90
    }
}

/// Classify one cell into an archetype and orientation
///
/// Empty cells are always `Open` with orientation 0 and draw nothing. Filled
/// cells with a symmetric pattern draw their orientation from `rng`.
///
/// # Errors
///
/// Returns an error if the position is off the grid, or if the neighbor
/// pattern has no archetype
pub fn classify(
    grid: &Grid,
    x: usize,
    y: usize,
    rng: &mut RandomSource,
) -> Result<(TileKind, u8)> {
    let state = grid
        .get(x, y)
        .ok_or_else(|| invalid_parameter("position", &format!("({x}, {y})"), &"off the grid"))?;
    if !state.is_filled() {
        return Ok((TileKind::Open, 0));
    }

    let neighbors = Neighborhood::around(grid, x, y);
    let tile_rule =
        lookup(neighbors.open_mask()).ok_or(CaveError::Classification { x, y, neighbors })?;

    let orientation = match tile_rule.rotation {
        Rotation::Fixed(orientation) => orientation,
        Rotation::AnyQuarter => rng.below(4) as u8,
        Rotation::HalfTurnFrom(base) => 2 * rng.below(2) as u8 + base,
    };
    Ok((tile_rule.kind, orientation))
}

/// Classify every cell in generation order
///
/// # Errors
///
/// Returns the first classification failure, aborting the whole pass
pub fn classify_all(grid: &Grid, rng: &mut RandomSource) -> Result<Vec<TileDescriptor>> {
    grid.positions()
        .map(|position| -> Result<TileDescriptor> {
            let (kind, orientation) = classify(grid, position.x, position.y, rng)?;
            Ok(TileDescriptor {
                position,
                kind,
                orientation,
            })
        })
        .collect()
}
