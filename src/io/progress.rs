//! Level and stage progress tracking with automatic batching for large runs

use std::sync::LazyLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::algorithm::executor::Stage;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Levels: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for a batch of generated levels
///
/// Shows one stage bar per level for small batches and adds a single batch
/// bar once the batch outgrows [`MAX_INDIVIDUAL_PROGRESS_BARS`]. Stage bars
/// are reused round-robin so the terminal never holds more than that many.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    level_bars: Vec<ProgressBar>,
    level_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            level_bars: Vec::new(),
            level_count: 0,
        }
    }

    /// Initialize progress bars based on level count
    pub fn initialize(&mut self, level_count: usize) {
        self.level_count = level_count;

        // Switch to batch mode for large runs to avoid terminal spam
        if level_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(level_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..level_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(STAGE_STYLE.clone());
            self.level_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of levels the manager was initialized for
    pub const fn level_count(&self) -> usize {
        self.level_count
    }

    /// Configure a stage bar for a new level
    pub fn start_level(&self, index: usize, label: &str, stage_count: usize) {
        if let Some(bar) = self.bar_for(index) {
            bar.reset();
            bar.set_length(stage_count as u64);
            bar.set_position(0);
            bar.set_prefix(label.to_string());
            bar.set_message("starting");
        }
    }

    /// Report a completed pipeline stage
    pub fn complete_stage(&self, index: usize, stage: Stage) {
        if let Some(bar) = self.bar_for(index) {
            bar.inc(1);
            bar.set_message(stage.to_string());
        }
    }

    /// Mark a level as written and advance the batch bar
    pub fn complete_level(&self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(bar) = self.bar_for(index) {
            bar.set_message("✓ done");
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All levels generated");
        }
        let _ = self.multi_progress.clear();
    }

    fn bar_for(&self, index: usize) -> Option<&ProgressBar> {
        let slots = self.level_bars.len();
        if slots == 0 {
            return None;
        }
        self.level_bars.get(index % slots)
    }
}
