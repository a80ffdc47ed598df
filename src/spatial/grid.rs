//! Cell-state grid with a permanently filled border
//!
//! The grid is the authoritative map shared by every pipeline stage. Cells are
//! addressed as `[x, y]` with `y` growing northwards, and every traversal runs
//! x outer, y inner so that sequential random draws line up between runs.

use std::fmt;

use ndarray::Array2;

use crate::algorithm::random::RandomSource;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};

/// Binary occupancy state of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Open water the agents can occupy
    Empty,
    /// Solid rock
    Filled,
}

impl CellState {
    /// Whether the cell is solid
    pub const fn is_filled(self) -> bool {
        matches!(self, Self::Filled)
    }

    /// The opposite state
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Empty => Self::Filled,
            Self::Filled => Self::Empty,
        }
    }

    const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Filled => '#',
        }
    }
}

/// Grid coordinates of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column, growing eastwards
    pub x: usize,
    /// Row, growing northwards
    pub y: usize,
}

impl Position {
    /// Create a position from its coordinates
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two cells
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx.hypot(dy)
    }

    /// Coordinates relative to the grid centre, as used by rendering collaborators
    pub const fn world(self, width: usize, height: usize) -> [i64; 2] {
        [
            self.x as i64 - (width / 2) as i64,
            self.y as i64 - (height / 2) as i64,
        ]
    }
}

/// Width×height buffer of cell states
///
/// Border cells are always filled: [`Grid::set`] refuses to clear them, so
/// no stage can break the invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<CellState>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a completely filled grid
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds [`MAX_GRID_DIMENSION`]
    pub fn filled(width: usize, height: usize) -> Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Self::filled_unchecked(width, height))
    }

    fn filled_unchecked(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((width, height), CellState::Filled),
            width,
            height,
        }
    }

    /// Fill a fresh grid from the random source
    ///
    /// Border cells are forced filled without consuming a draw. Every interior
    /// cell draws one integer in `[0, 100)` and is filled when the draw falls
    /// below `fill_percentage`.
    ///
    /// # Errors
    ///
    /// Returns an error before allocating if the dimensions are out of range
    /// or `fill_percentage` exceeds 100
    pub fn random(
        width: usize,
        height: usize,
        fill_percentage: u32,
        rng: &mut RandomSource,
    ) -> Result<Self> {
        validate_dimensions(width, height)?;
        if fill_percentage > 100 {
            return Err(invalid_parameter(
                "fill_percentage",
                &fill_percentage,
                &"must be within [0, 100]",
            ));
        }

        let mut grid = Self::filled_unchecked(width, height);
        let threshold = fill_percentage as usize;
        for x in 0..width {
            for y in 0..height {
                if grid.is_border(x, y) {
                    continue;
                }
                let state = if rng.below(100) < threshold {
                    CellState::Filled
                } else {
                    CellState::Empty
                };
                grid.set(x, y, state);
            }
        }
        Ok(grid)
    }

    /// Build a grid from rows of `#` (filled) and `.` (empty)
    ///
    /// The first row is the northernmost one. Border cells are filled
    /// regardless of the glyph given for them.
    ///
    /// # Errors
    ///
    /// Returns an error for ragged rows, unknown glyphs or invalid dimensions
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        validate_dimensions(width, height)?;

        let mut grid = Self::filled_unchecked(width, height);
        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(invalid_parameter("rows", row, &"all rows must share one width"));
            }
            let y = height - 1 - row_index;
            for (x, glyph) in row.chars().enumerate() {
                let state = match glyph {
                    '#' => CellState::Filled,
                    '.' => CellState::Empty,
                    other => {
                        return Err(invalid_parameter("rows", &other, &"expected '#' or '.'"));
                    }
                };
                grid.set(x, y, state);
            }
        }
        Ok(grid)
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// State of an in-bounds cell
    pub fn get(&self, x: usize, y: usize) -> Option<CellState> {
        self.cells.get([x, y]).copied()
    }

    /// State at signed coordinates, with anything off the grid reading as filled
    pub fn state_or_filled(&self, x: isize, y: isize) -> CellState {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.get(x, y).unwrap_or(CellState::Filled),
            _ => CellState::Filled,
        }
    }

    /// Whether the cell lies on the outer ring
    pub const fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Write a cell, returning whether its state changed
    ///
    /// Writes outside the grid and attempts to clear a border cell are ignored.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> bool {
        if !state.is_filled() && self.is_border(x, y) {
            return false;
        }
        match self.cells.get_mut([x, y]) {
            Some(cell) if *cell != state => {
                *cell = state;
                true
            }
            _ => false,
        }
    }

    /// Count filled cells in the square of `radius` around a cell, excluding it
    ///
    /// Positions outside the grid count as filled.
    pub fn filled_neighbors(&self, x: usize, y: usize, radius: usize) -> usize {
        let (cx, cy, r) = (x as isize, y as isize, radius as isize);
        let mut filled = 0;
        for nx in cx - r..=cx + r {
            for ny in cy - r..=cy + r {
                if (nx, ny) != (cx, cy) && self.state_or_filled(nx, ny).is_filled() {
                    filled += 1;
                }
            }
        }
        filled
    }

    /// All positions in generation order (x outer, y inner)
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }

    /// Number of cells in the given state
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Rows of glyphs, northernmost first
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| {
                (0..self.width)
                    .map(|x| self.get(x, y).unwrap_or(CellState::Filled).glyph())
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    for (parameter, value) in [("width", width), ("height", height)] {
        if value == 0 {
            return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
        }
        if value > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                parameter,
                &value,
                &format!("must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
    }
    Ok(())
}

/// Build the raw random grid for a seed, returning the source for later stages
///
/// # Errors
///
/// Returns an error if the dimensions or fill percentage are out of range
pub fn generate_grid(
    width: usize,
    height: usize,
    fill_percentage: u32,
    seed: &str,
) -> Result<(Grid, RandomSource)> {
    let mut rng = RandomSource::from_text(seed);
    let grid = Grid::random(width, height, fill_percentage, &mut rng)?;
    Ok((grid, rng))
}
