//! Deterministic cave generation with tile classification and spawn placement
//!
//! A seeded cellular automaton shapes a binary occupancy grid into caves, a
//! branching pass seeds and thickens corridors, and flood-fill cleanup removes
//! undersized regions. Every cell is then classified into a renderable tile
//! archetype with a rotation, and entities are placed in one open region under
//! a minimum-separation constraint. The same seed always yields the same level.

#![forbid(unsafe_code)]

/// Generation stages: randomness, automata, branching, cleanup, placement and the pipeline
pub mod algorithm;
/// Configuration, error handling, CLI and level export
pub mod io;
/// Grid storage, region analysis and tile classification
pub mod spatial;

pub use algorithm::executor::{Level, LevelGenerator, generate_level};
pub use io::configuration::GenerationConfig;
pub use io::error::{CaveError, Result};
