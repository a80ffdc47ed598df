//! Command-line interface for generating one level or a batch of levels

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};

use crate::algorithm::executor::LevelGenerator;
use crate::io::configuration::{
    DEFAULT_CELL_SCALE, DEFAULT_LOG_FILTER, GIF_FRAME_DELAY_MS, GenerationConfig,
    VISUALIZATION_SUFFIX, validate_cell_scale,
};
use crate::io::error::Result;
use crate::io::export::export_level_as_json;
use crate::io::image::export_level_as_png;
use crate::io::progress::ProgressManager;

#[derive(Parser)]
#[command(name = "cavegen")]
#[command(
    author,
    version,
    about = "Generate cave levels with tiles and spawn points from a seed"
)]
/// Command-line arguments for the level generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Output PNG path; batches append `_<index>` to the file stem
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// TOML file with generation parameters; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed text for reproducible generation
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Derive the seed from the clock, ignoring any seed in the config file
    #[arg(short, long, conflicts_with = "seed")]
    pub random_seed: bool,

    /// Grid width in cells
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Grid height in cells
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Chance, in percent, that an interior cell starts filled
    #[arg(short, long = "fill")]
    pub fill_percentage: Option<u32>,

    /// Number of smoothing passes
    #[arg(long)]
    pub smoothing_iterations: Option<usize>,

    /// Neighbor count separating filling from emptying during smoothing
    #[arg(long)]
    pub smoothing_threshold: Option<usize>,

    /// Number of branching passes
    #[arg(long)]
    pub branching_iterations: Option<usize>,

    /// Filled regions smaller than this are cleared
    #[arg(long)]
    pub filled_min_size: Option<usize>,

    /// Empty regions smaller than this are filled
    #[arg(long)]
    pub empty_min_size: Option<usize>,

    /// Number of primary entities
    #[arg(short, long)]
    pub primary: Option<usize>,

    /// Number of secondary entities
    #[arg(long)]
    pub secondary: Option<usize>,

    /// Minimum distance between a secondary and any other entity
    #[arg(short, long)]
    pub min_separation: Option<f64>,

    /// Number of levels to generate, seeded `<seed>-<index>`
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Pixels per grid cell in exported images, at most 64
    #[arg(long, default_value_t = DEFAULT_CELL_SCALE)]
    pub scale: u32,

    /// Also write the level data as JSON next to the image
    #[arg(short, long)]
    pub json: bool,

    /// Also write an animated GIF of the grid after every stage
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate levels even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Raise log verbosity (repeat for more detail)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter requested by `--verbose`, `None` to defer to `RUST_LOG`
    pub const fn verbosity_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("cavegen=info"),
            2 => Some("cavegen=debug"),
            _ => Some("cavegen=trace"),
        }
    }

    /// Filter used when neither `--verbose` nor `RUST_LOG` is set
    pub const fn default_log_filter() -> &'static str {
        DEFAULT_LOG_FILTER
    }

    /// Merge the config file, if any, with the flags given on the command line
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded, the merged
    /// configuration is invalid or the image scale is out of range
    pub fn resolve_config(&self) -> Result<GenerationConfig> {
        validate_cell_scale(self.scale)?;
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_toml_file(path)?,
            None => GenerationConfig::default(),
        };

        if self.random_seed {
            config.seed = None;
        }
        if let Some(seed) = &self.seed {
            config.seed = Some(seed.clone());
        }

        override_with(&mut config.width, self.width);
        override_with(&mut config.height, self.height);
        override_with(&mut config.fill_percentage, self.fill_percentage);
        override_with(&mut config.smoothing_iterations, self.smoothing_iterations);
        override_with(&mut config.smoothing_threshold, self.smoothing_threshold);
        override_with(&mut config.branching_iterations, self.branching_iterations);
        override_with(&mut config.filled_region_min_size, self.filled_min_size);
        override_with(&mut config.empty_region_min_size, self.empty_min_size);
        override_with(&mut config.primary_count, self.primary);
        override_with(&mut config.secondary_count, self.secondary);
        override_with(&mut config.min_separation, self.min_separation);

        config.validate()?;
        Ok(config)
    }
}

fn override_with<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Orchestrates generation and export of a batch of levels
pub struct LevelProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl LevelProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate and export every requested level
    ///
    /// Each level is a full rebuild from its own seed; nothing carries over
    /// from the previous level except the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, generation or export fails
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.resolve_config()?;
        let base_seed = config.seed_source().resolve();

        let pending: Vec<usize> = (0..self.cli.count)
            .filter(|&index| self.should_generate(index))
            .collect();
        if pending.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(pending.len());
        }

        for (slot, &index) in pending.iter().enumerate() {
            let mut level_config = config.clone();
            level_config.seed = Some(self.seed_for(&base_seed, index));
            self.process_level(level_config, index, slot)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn process_level(&self, config: GenerationConfig, index: usize, slot: usize) -> Result<()> {
        let output_path = self.output_path(index);
        let mut generator = LevelGenerator::new(config)?;
        if self.cli.visualize {
            generator.enable_visualization();
        }

        let progress = self.progress_manager.as_ref();
        if let Some(pm) = progress {
            let label = output_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            pm.start_level(slot, &label, generator.stage_count());
        }

        let level = generator.generate_with(|stage| {
            if let Some(pm) = progress {
                pm.complete_stage(slot, stage);
            }
        })?;

        export_level_as_png(&level, self.cli.scale, &output_path)?;

        if self.cli.json {
            export_level_as_json(&level, &output_path.with_extension("json"))?;
        }

        if let Some(capture) = generator.visualization() {
            capture.export_gif(
                &Self::visualization_path(&output_path),
                GIF_FRAME_DELAY_MS,
                self.cli.scale,
            )?;
        }

        if let Some(pm) = progress {
            pm.complete_level(slot);
        }
        Ok(())
    }

    fn should_generate(&self, index: usize) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(index);
        if output_path.exists() {
            tracing::warn!(
                target: "cavegen::cli",
                path = %output_path.display(),
                "skipping level, output exists"
            );
            false
        } else {
            true
        }
    }

    /// Seed text for a level of the batch
    pub fn seed_for(&self, base_seed: &str, index: usize) -> String {
        if self.cli.count > 1 {
            format!("{base_seed}-{index}")
        } else {
            base_seed.to_string()
        }
    }

    /// Image path for a level of the batch
    pub fn output_path(&self, index: usize) -> PathBuf {
        if self.cli.count <= 1 {
            return self.cli.output.clone();
        }

        let stem = self.cli.output.file_stem().unwrap_or_default();
        let extension = self.cli.output.extension().unwrap_or_default();
        let name = format!(
            "{}_{index}.{}",
            stem.to_string_lossy(),
            extension.to_string_lossy()
        );
        self.cli.output.with_file_name(name)
    }

    /// Animated stage visualization path next to a level image
    pub fn visualization_path(output_path: &Path) -> PathBuf {
        let stem = output_path.file_stem().unwrap_or_default();
        let name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());
        output_path.with_file_name(name)
    }
}
