//! Generation constants, defaults and the user-facing configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::placement::PlacementRequest;
use crate::algorithm::random::SeedSource;
use crate::io::error::{CaveError, Result, invalid_parameter};

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Branching rule constants
/// Radius of the sparseness box checked before seeding a corridor cell
pub const BRANCH_SPARSE_RADIUS: usize = 2;
/// Fewest filled cells in the sparseness box that still allow seeding
pub const BRANCH_SPARSE_MIN: usize = 3;
/// Most filled cells in the sparseness box that still allow seeding
pub const BRANCH_SPARSE_MAX: usize = 4;
/// A seeded cell stays open on one draw out of this many
pub const BRANCH_EMPTY_ODDS: usize = 3;
/// Filled 3×3 neighbor count that forces an empty cell filled
pub const THICKEN_NEIGHBOR_COUNT: usize = 4;

/// Number of distinct spawn headings, one per whole degree
pub const HEADING_DEGREES: usize = 360;

// Default values for configurable parameters
/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 80;
/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 45;
/// Default chance, in percent, that an interior cell starts filled
pub const DEFAULT_FILL_PERCENTAGE: u32 = 47;
/// Default minimum size of a filled region surviving cleanup
pub const DEFAULT_FILLED_REGION_MIN_SIZE: usize = 20;
/// Default minimum size of an empty region surviving cleanup
pub const DEFAULT_EMPTY_REGION_MIN_SIZE: usize = 20;
/// Default number of smoothing passes
pub const DEFAULT_SMOOTHING_ITERATIONS: usize = 5;
/// Default neighbor count separating filling from emptying
pub const DEFAULT_SMOOTHING_THRESHOLD: usize = 4;
/// Default number of branching passes
pub const DEFAULT_BRANCHING_ITERATIONS: usize = 2;
/// Default number of primary entities
pub const DEFAULT_PRIMARY_COUNT: usize = 3;
/// Default number of secondary entities
pub const DEFAULT_SECONDARY_COUNT: usize = 2;
/// Default minimum distance between a secondary and any other entity
pub const DEFAULT_MIN_SEPARATION: f64 = 20.0;

// Output settings
/// Default size of one grid cell in exported images, in pixels
pub const DEFAULT_CELL_SCALE: u32 = 8;
/// Largest cell size accepted for exported images, in pixels
pub const MAX_CELL_SCALE: u32 = 64;
/// Suffix added to the animated stage visualization
pub const VISUALIZATION_SUFFIX: &str = "_stages";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 250;
/// The final frame stays on screen this many times longer
pub const FINAL_FRAME_HOLD: u32 = 8;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Log filter applied when neither `RUST_LOG` nor `--verbose` is given
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// RGBA colour of each tile archetype, indexed by tile type
pub const TILE_PALETTE: [[u8; 4]; 7] = [
    [18, 52, 86, 255],
    [92, 78, 64, 255],
    [196, 120, 60, 255],
    [132, 112, 90, 255],
    [160, 136, 104, 255],
    [176, 146, 110, 255],
    [146, 124, 98, 255],
];
/// RGBA colour of primary spawn markers
pub const PRIMARY_SPAWN_COLOR: [u8; 4] = [250, 220, 40, 255];
/// RGBA colour of secondary spawn markers
pub const SECONDARY_SPAWN_COLOR: [u8; 4] = [230, 40, 120, 255];

/// Parameters of one generation request
///
/// Every field has a default, so a TOML file only needs the values it changes.
/// A missing `seed` means a clock-derived seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Seed text; `None` derives one from the clock
    pub seed: Option<String>,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Chance, in percent, that an interior cell starts filled
    pub fill_percentage: u32,
    /// Filled regions smaller than this are cleared
    pub filled_region_min_size: usize,
    /// Empty regions smaller than this are filled
    pub empty_region_min_size: usize,
    /// Number of smoothing passes
    pub smoothing_iterations: usize,
    /// Neighbor count separating filling from emptying during smoothing
    pub smoothing_threshold: usize,
    /// Number of branching passes
    pub branching_iterations: usize,
    /// Number of primary entities to spawn
    pub primary_count: usize,
    /// Number of secondary entities to spawn
    pub secondary_count: usize,
    /// Minimum distance between a secondary and any other entity
    pub min_separation: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fill_percentage: DEFAULT_FILL_PERCENTAGE,
            filled_region_min_size: DEFAULT_FILLED_REGION_MIN_SIZE,
            empty_region_min_size: DEFAULT_EMPTY_REGION_MIN_SIZE,
            smoothing_iterations: DEFAULT_SMOOTHING_ITERATIONS,
            smoothing_threshold: DEFAULT_SMOOTHING_THRESHOLD,
            branching_iterations: DEFAULT_BRANCHING_ITERATIONS,
            primary_count: DEFAULT_PRIMARY_COUNT,
            secondary_count: DEFAULT_SECONDARY_COUNT,
            min_separation: DEFAULT_MIN_SEPARATION,
        }
    }
}

impl GenerationConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed text or unknown keys
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CaveError::ConfigLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&text).map_err(|e| CaveError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Check every parameter against its allowed range
    ///
    /// # Errors
    ///
    /// Returns the first parameter found out of range
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be within [1, {MAX_GRID_DIMENSION}]"),
                ));
            }
        }
        if self.fill_percentage > 100 {
            return Err(invalid_parameter(
                "fill_percentage",
                &self.fill_percentage,
                &"must be within [0, 100]",
            ));
        }
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(invalid_parameter(
                "min_separation",
                &self.min_separation,
                &"must be a finite, non-negative distance",
            ));
        }
        Ok(())
    }

    /// Where this configuration takes its seed from
    pub fn seed_source(&self) -> SeedSource {
        SeedSource::from(self.seed.clone())
    }

    /// Spawn counts and separation for the placer
    pub const fn placement(&self) -> PlacementRequest {
        PlacementRequest {
            primary_count: self.primary_count,
            secondary_count: self.secondary_count,
            min_separation: self.min_separation,
        }
    }
}

/// Check a pixels-per-cell scale for image export
///
/// # Errors
///
/// Returns an error if `scale` is zero or exceeds [`MAX_CELL_SCALE`]
pub fn validate_cell_scale(scale: u32) -> Result<()> {
    if scale == 0 || scale > MAX_CELL_SCALE {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!("must be within [1, {MAX_CELL_SCALE}]"),
        ));
    }
    Ok(())
}
