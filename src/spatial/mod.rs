//! Spatial data structures and analysis
//!
//! This module contains spatial-related functionality including:
//! - Grid storage with a permanently filled border
//! - Connected-component region analysis
//! - Tile archetype classification

/// Grid state management and random fill
pub mod grid;
/// Flood-fill region analysis
pub mod regions;
/// Tile archetype classification from neighbor patterns
pub mod tiles;

pub use grid::{CellState, Grid, Position};
