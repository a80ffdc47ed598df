//! End-to-end level generation pipeline
//!
//! One run seeds a [`RandomSource`], fills a random grid, smooths it, branches
//! corridors, cleans up small regions, classifies every cell into a tile and
//! finally places spawns. Every stage draws from the same source in a fixed
//! order, so a seed always reproduces the same level.

use std::fmt;

use crate::algorithm::automata::smooth_pass;
use crate::algorithm::branching::{BranchStats, branch_pass};
use crate::algorithm::cleanup::{CleanupReport, cleanup};
use crate::algorithm::placement::{SpawnCategory, SpawnRecord, place};
use crate::algorithm::random::{RandomSource, SeedSource};
use crate::io::configuration::GenerationConfig;
use crate::io::error::Result;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::grid::{CellState, Grid, Position};
use crate::spatial::tiles::{TileDescriptor, classify_all};

/// Pipeline stage reported to progress observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Random fill of the fresh grid
    RawGrid,
    /// One smoothing pass, numbered from 1
    Smoothing(usize),
    /// One branching pass, numbered from 1
    Branching(usize),
    /// Removal of undersized regions
    Cleanup,
    /// Tile classification of every cell
    Classification,
    /// Spawn selection
    Placement,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RawGrid => write!(f, "random fill"),
            Self::Smoothing(pass) => write!(f, "smoothing {pass}"),
            Self::Branching(pass) => write!(f, "branching {pass}"),
            Self::Cleanup => write!(f, "cleanup"),
            Self::Classification => write!(f, "tiles"),
            Self::Placement => write!(f, "spawns"),
        }
    }
}

/// Counters gathered while generating a level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Numeric seed the random source was built from
    pub numeric_seed: u64,
    /// Cells changed across all smoothing passes
    pub smoothed_cells: usize,
    /// Cells filled by branching
    pub branching: BranchStats,
    /// Regions and cells flipped by cleanup
    pub cleanup: CleanupReport,
}

/// A generated level: the grid plus everything derived from it
#[derive(Debug, Clone)]
pub struct Level {
    seed: String,
    grid: Grid,
    tiles: Vec<TileDescriptor>,
    spawns: Vec<SpawnRecord>,
    report: GenerationReport,
}

impl Level {
    /// Seed text the level was generated from
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Final cell states
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tile descriptors in generation order (x outer, y inner)
    pub fn tiles(&self) -> &[TileDescriptor] {
        &self.tiles
    }

    /// Tile descriptor of one cell
    pub fn tile_at(&self, position: Position) -> Option<&TileDescriptor> {
        self.tiles
            .get(position.x * self.grid.height() + position.y)
            .filter(|tile| tile.position == position)
    }

    /// Accepted spawns, primaries first
    pub fn spawns(&self) -> &[SpawnRecord] {
        &self.spawns
    }

    /// Spawns of one category
    pub fn spawns_of(&self, category: SpawnCategory) -> impl Iterator<Item = &SpawnRecord> {
        self.spawns
            .iter()
            .filter(move |spawn| spawn.category == category)
    }

    /// Counters gathered during generation
    pub const fn report(&self) -> &GenerationReport {
        &self.report
    }
}

/// Runs the generation pipeline for a validated configuration
pub struct LevelGenerator {
    config: GenerationConfig,
    visualization: Option<VisualizationCapture>,
}

impl LevelGenerator {
    /// Create a generator, validating the configuration up front
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            visualization: None,
        })
    }

    /// Configuration used for every run
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Number of stages one run reports
    pub const fn stage_count(&self) -> usize {
        self.config.smoothing_iterations + self.config.branching_iterations + 4
    }

    /// Capture the grid after every grid-shaping stage of the next runs
    pub fn enable_visualization(&mut self) {
        self.visualization = Some(VisualizationCapture::new(
            self.config.width,
            self.config.height,
        ));
    }

    /// Grid snapshots of the latest run, if enabled
    pub const fn visualization(&self) -> Option<&VisualizationCapture> {
        self.visualization.as_ref()
    }

    /// Generate a level from the configured seed
    ///
    /// # Errors
    ///
    /// Returns an error if tile classification fails
    pub fn generate(&mut self) -> Result<Level> {
        self.generate_with(|_| {})
    }

    /// Discard the previous level's seed and generate from a new one
    ///
    /// # Errors
    ///
    /// Returns an error if tile classification fails
    pub fn regenerate(&mut self, seed: SeedSource) -> Result<Level> {
        self.config.seed = match seed {
            SeedSource::Text(text) => Some(text),
            SeedSource::Clock => None,
        };
        self.generate()
    }

    /// Generate a level, reporting each stage as it completes
    ///
    /// # Errors
    ///
    /// Returns an error if tile classification fails
    pub fn generate_with(&mut self, mut on_stage: impl FnMut(Stage)) -> Result<Level> {
        let seed = self.config.seed_source().resolve();
        let mut rng = RandomSource::from_text(&seed);
        let config = &self.config;
        if let Some(capture) = self.visualization.as_mut() {
            capture.clear();
        }

        let mut report = GenerationReport {
            numeric_seed: rng.seed(),
            ..GenerationReport::default()
        };

        let mut grid = Grid::random(config.width, config.height, config.fill_percentage, &mut rng)?;
        tracing::debug!(
            target: "cavegen::pipeline",
            seed = %seed,
            numeric_seed = report.numeric_seed,
            filled = grid.count(CellState::Filled),
            "pipeline.raw_grid"
        );
        record(&mut self.visualization, Stage::RawGrid, &grid);
        on_stage(Stage::RawGrid);

        for pass in 1..=config.smoothing_iterations {
            let changed = smooth_pass(&mut grid, config.smoothing_threshold);
            report.smoothed_cells += changed;
            tracing::debug!(target: "cavegen::pipeline", pass, changed, "pipeline.smoothing");
            record(&mut self.visualization, Stage::Smoothing(pass), &grid);
            on_stage(Stage::Smoothing(pass));
        }

        for pass in 1..=config.branching_iterations {
            let stats = branch_pass(&mut grid, &mut rng);
            report.branching.seeded += stats.seeded;
            report.branching.thickened += stats.thickened;
            tracing::debug!(
                target: "cavegen::pipeline",
                pass,
                seeded = stats.seeded,
                thickened = stats.thickened,
                "pipeline.branching"
            );
            record(&mut self.visualization, Stage::Branching(pass), &grid);
            on_stage(Stage::Branching(pass));
        }

        report.cleanup = cleanup(
            &mut grid,
            config.filled_region_min_size,
            config.empty_region_min_size,
        );
        tracing::debug!(
            target: "cavegen::pipeline",
            cleared_regions = report.cleanup.cleared.regions,
            cleared_cells = report.cleanup.cleared.cells,
            filled_regions = report.cleanup.filled.regions,
            filled_cells = report.cleanup.filled.cells,
            "pipeline.cleanup"
        );
        record(&mut self.visualization, Stage::Cleanup, &grid);
        on_stage(Stage::Cleanup);

        let tiles = classify_all(&grid, &mut rng)?;
        tracing::debug!(target: "cavegen::pipeline", tiles = tiles.len(), "pipeline.tiles");
        on_stage(Stage::Classification);

        let request = config.placement();
        let spawns = place(&grid, &request, &mut rng);
        tracing::debug!(
            target: "cavegen::pipeline",
            spawns = spawns.len(),
            requested = request.primary_count + request.secondary_count,
            "pipeline.spawns"
        );
        on_stage(Stage::Placement);

        tracing::info!(
            target: "cavegen::pipeline",
            seed = %seed,
            width = grid.width(),
            height = grid.height(),
            filled = grid.count(CellState::Filled),
            empty = grid.count(CellState::Empty),
            spawns = spawns.len(),
            "pipeline.level"
        );

        Ok(Level {
            seed,
            grid,
            tiles,
            spawns,
            report,
        })
    }
}

/// Generate one level from a configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid or classification fails
pub fn generate_level(config: &GenerationConfig) -> Result<Level> {
    LevelGenerator::new(config.clone())?.generate()
}

fn record(visualization: &mut Option<VisualizationCapture>, stage: Stage, grid: &Grid) {
    if let Some(capture) = visualization.as_mut() {
        capture.record_stage(stage, grid);
    }
}
