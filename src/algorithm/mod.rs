/// Majority-rule cellular automaton smoothing
pub mod automata;
/// Corridor seeding and thickening
pub mod branching;
/// Removal of undersized regions
pub mod cleanup;
/// Pipeline orchestration and generated levels
pub mod executor;
/// Spawn selection under a separation constraint
pub mod placement;
/// Seeded random source shared by all stages
pub mod random;
