use std::fmt;

use thiserror::Error;

use crate::CellValue;
use crate::Coord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Grid of {width}x{height} cells cannot be allocated")]
    TooLarge { width: usize, height: usize },
}

/// A fixed-size rectangle of cell values. `0` is dead, anything else is alive and carries its
/// color.
///
/// Every access goes through a bounds check. Reads outside the grid see a dead cell and writes
/// outside the grid are dropped, so rules may look past the edges freely.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    /// Stored column-major: `cells[x * height + y]`
    cells: Vec<CellValue>,

    w: usize,
    h: usize,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }

        let too_large = || ConfigError::TooLarge { width, height };

        // Coordinates are signed, so every index must also fit in a `Coord`
        let n = width
            .checked_mul(height)
            .filter(|&n| Coord::try_from(n).is_ok())
            .ok_or_else(too_large)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(n).map_err(|_| too_large())?;
        cells.resize(n, 0);

        Ok(Self {
            cells,
            w: width,
            h: height,
        })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn is_within_bounds(&self, x: Coord, y: Coord) -> bool {
        self.index(x, y).is_some()
    }

    /// The value at `(x, y)`, or `0` if the coordinate is off the grid
    pub fn get(&self, x: Coord, y: Coord) -> CellValue {
        self.index(x, y).map_or(0, |i| self.cells[i])
    }

    /// Overwrite the cell at `(x, y)`. Does nothing if the coordinate is off the grid.
    pub fn set(&mut self, x: Coord, y: Coord, value: CellValue) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = value;
        }
    }

    pub fn is_alive(&self, x: Coord, y: Coord) -> bool {
        self.get(x, y) > 0
    }

    /// Number of live cells
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v > 0).count()
    }

    /// Iterate over `(x, y, value)` with `x` outer and `y` inner. This is the order rules are
    /// applied in.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Coord, CellValue)> + '_ {
        let h = self.h;

        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i / h) as Coord, (i % h) as Coord, v))
    }

    /// Make `self` a copy of `other` without reallocating. Both grids must share dimensions.
    pub fn copy_from(&mut self, other: &Grid) {
        assert_eq!(
            (self.w, self.h),
            (other.w, other.h),
            "grid dimensions differ"
        );

        self.cells.copy_from_slice(&other.cells);
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    fn index(&self, x: Coord, y: Coord) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;

        (x < self.w && y < self.h).then_some(x * self.h + y)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.h as Coord {
            for x in 0..self.w as Coord {
                let c = if self.is_alive(x, y) { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({}x{})\n{}", self.w, self.h, self)
    }
}
