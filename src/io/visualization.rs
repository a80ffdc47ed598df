//! Stage-by-stage capture and GIF generation for pipeline visualization

use std::path::Path;

use image::Frame;

use crate::algorithm::executor::Stage;
use crate::io::configuration::{FINAL_FRAME_HOLD, validate_cell_scale};
use crate::io::error::{CaveError, Result, ensure_parent_dir};
use crate::io::image::render_grid;
use crate::spatial::grid::Grid;

/// Grid snapshot taken after one stage
#[derive(Debug, Clone)]
pub struct CapturedStage {
    /// Stage that produced the snapshot
    pub stage: Stage,
    /// Grid as it stood after the stage
    pub grid: Grid,
}

/// Captures the grid after every grid-shaping stage
///
/// Snapshots are cleared at the start of each run, so after a regeneration
/// only the latest level is kept.
#[derive(Debug, Clone)]
pub struct VisualizationCapture {
    stages: Vec<CapturedStage>,
    dims: (usize, usize),
}

impl VisualizationCapture {
    /// Create an empty capture for grids of the given size
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            stages: Vec::new(),
            dims: (width, height),
        }
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.stages.clear();
    }

    /// Record the grid as it stands after `stage`
    pub fn record_stage(&mut self, stage: Stage, grid: &Grid) {
        self.stages.push(CapturedStage {
            stage,
            grid: grid.clone(),
        });
    }

    /// All snapshots in capture order
    pub fn stages(&self) -> &[CapturedStage] {
        &self.stages
    }

    /// Grid size the capture was created for (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        self.dims
    }

    /// Export the snapshots as an animated GIF
    ///
    /// The final frame is held [`FINAL_FRAME_HOLD`] times longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No stages were captured
    /// - `scale` is outside `1..=MAX_CELL_SCALE`
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32, scale: u32) -> Result<()> {
        validate_cell_scale(scale)?;
        if self.stages.is_empty() {
            return Err(crate::io::error::invalid_parameter(
                "visualization",
                &output_path.display(),
                &"no stages captured",
            ));
        }

        let last = self.stages.len() - 1;
        let frames: Vec<Frame> = self
            .stages
            .iter()
            .enumerate()
            .map(|(index, captured)| {
                let delay = if index == last {
                    frame_delay_ms * FINAL_FRAME_HOLD
                } else {
                    frame_delay_ms
                };
                Frame::from_parts(
                    render_grid(&captured.grid, scale),
                    0,
                    0,
                    image::Delay::from_numer_denom_ms(delay, 1),
                )
            })
            .collect();

        ensure_parent_dir(output_path)?;
        let file = std::fs::File::create(output_path).map_err(|e| CaveError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| CaveError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}
