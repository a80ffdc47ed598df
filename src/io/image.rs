//! PNG rendering of grids and generated levels

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::algorithm::executor::Level;
use crate::algorithm::placement::SpawnCategory;
use crate::io::configuration::{
    PRIMARY_SPAWN_COLOR, SECONDARY_SPAWN_COLOR, TILE_PALETTE, validate_cell_scale,
};
use crate::io::error::{CaveError, Result, ensure_parent_dir};
use crate::spatial::grid::{CellState, Grid, Position};
use crate::spatial::tiles::TileKind;

/// Render raw cell states, `scale` pixels per cell, north at the top
pub fn render_grid(grid: &Grid, scale: u32) -> RgbaImage {
    let mut img = blank_canvas(grid, scale);
    for position in grid.positions() {
        let kind = match grid.get(position.x, position.y) {
            Some(CellState::Empty) => TileKind::Open,
            _ => TileKind::Center,
        };
        fill_cell(&mut img, grid, position, scale, 0, palette_color(kind));
    }
    img
}

/// Render a level with tiles coloured by archetype and spawns marked on top
pub fn render_level(level: &Level, scale: u32) -> RgbaImage {
    let grid = level.grid();
    let mut img = blank_canvas(grid, scale);

    for tile in level.tiles() {
        fill_cell(&mut img, grid, tile.position, scale, 0, palette_color(tile.kind));
    }

    // Markers leave a quarter-cell rim so the tile beneath stays visible
    let inset = scale.max(1) / 4;
    for spawn in level.spawns() {
        let color = match spawn.category {
            SpawnCategory::Primary => PRIMARY_SPAWN_COLOR,
            SpawnCategory::Secondary => SECONDARY_SPAWN_COLOR,
        };
        fill_cell(&mut img, grid, spawn.position, scale, inset, Rgba(color));
    }
    img
}

/// Export a rendered level as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - `scale` is outside `1..=MAX_CELL_SCALE`
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_level_as_png(level: &Level, scale: u32, output_path: &Path) -> Result<()> {
    validate_cell_scale(scale)?;
    let img = render_level(level, scale);
    ensure_parent_dir(output_path)?;
    img.save(output_path)
        .map_err(|e| CaveError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;
    Ok(())
}

fn blank_canvas(grid: &Grid, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    RgbaImage::new(
        (grid.width() as u32).saturating_mul(scale),
        (grid.height() as u32).saturating_mul(scale),
    )
}

fn palette_color(kind: TileKind) -> Rgba<u8> {
    Rgba(
        TILE_PALETTE
            .get(usize::from(kind.index()))
            .copied()
            .unwrap_or([0, 0, 0, 0]),
    )
}

// Grid y grows northwards while image rows grow downwards
fn fill_cell(
    img: &mut RgbaImage,
    grid: &Grid,
    position: Position,
    scale: u32,
    inset: u32,
    color: Rgba<u8>,
) {
    let scale = scale.max(1);
    let left = (position.x as u32).saturating_mul(scale);
    let top = ((grid.height() - 1 - position.y) as u32).saturating_mul(scale);
    let (right, bottom) = (left.saturating_add(scale), top.saturating_add(scale));
    for px in left.saturating_add(inset)..right.saturating_sub(inset) {
        for py in top.saturating_add(inset)..bottom.saturating_sub(inset) {
            if px < img.width() && py < img.height() {
                img.put_pixel(px, py, color);
            }
        }
    }
}
