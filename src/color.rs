use std::str::FromStr;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::CellValue;
use crate::Coord;

/// Assigns a value to a cell as it is revived. Invoked once per revival, so randomized
/// implementations give a fresh color every time, even for the same coordinate.
///
/// Any `FnMut(Coord, Coord) -> CellValue` closure is a color function.
///
/// The returned value is written as is. A function that returns `0` makes the revival leave the
/// cell dead, as with `Constant(0)`. The named [`Palette`]s never do this.
pub trait ColorFunction {
    fn color(&mut self, x: Coord, y: Coord) -> CellValue;
}

impl<F> ColorFunction for F
where
    F: FnMut(Coord, Coord) -> CellValue,
{
    fn color(&mut self, x: Coord, y: Coord) -> CellValue {
        self(x, y)
    }
}

/// Every revived cell gets the same value
#[derive(Debug, Clone, Copy)]
pub struct Constant(pub CellValue);

impl ColorFunction for Constant {
    fn color(&mut self, _x: Coord, _y: Coord) -> CellValue {
        self.0
    }
}

/// `|sin(x + y + r)| * 255`, where `r` is drawn from `0..=35` on every call
pub struct Sine {
    rng: ChaCha8Rng,
}

impl Sine {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl ColorFunction for Sine {
    fn color(&mut self, x: Coord, y: Coord) -> CellValue {
        let r: Coord = self.rng.gen_range(0..=35);
        let v = ((x + y + r) as f64).sin().abs() * 255.0;

        clamp_live(v)
    }
}

/// `x + y / (r + 1)`, where `r` is drawn from `0..=y` on every call
pub struct Ratio {
    rng: ChaCha8Rng,
}

impl Ratio {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl ColorFunction for Ratio {
    fn color(&mut self, x: Coord, y: Coord) -> CellValue {
        let r: Coord = self.rng.gen_range(0..=y.max(0));
        let v = x as f64 + y as f64 / (r + 1) as f64;

        clamp_live(v)
    }
}

/// A revived cell must be alive, so results land in `1..=255`
fn clamp_live(v: f64) -> CellValue {
    v.clamp(1.0, 255.0) as CellValue
}

/// The named color functions selectable at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Constant 255
    White,

    /// Constant 128
    Gray,

    /// See [`Sine`]
    Sine,

    /// See [`Ratio`]
    Ratio,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Unknown palette \"{name}\", expected one of: white, gray, sine, ratio")]
    UnknownPalette { name: String },
}

impl Palette {
    /// Build the color function. `rng` is only kept by the randomized palettes, and should be
    /// separate from the one used for seeding the grid.
    pub fn build(self, rng: ChaCha8Rng) -> Box<dyn ColorFunction> {
        match self {
            Palette::White => Box::new(Constant(255)),
            Palette::Gray => Box::new(Constant(128)),
            Palette::Sine => Box::new(Sine::new(rng)),
            Palette::Ratio => Box::new(Ratio::new(rng)),
        }
    }
}

impl FromStr for Palette {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(Palette::White),
            "gray" | "grey" => Ok(Palette::Gray),
            "sine" => Ok(Palette::Sine),
            "ratio" => Ok(Palette::Ratio),
            _ => Err(PaletteError::UnknownPalette {
                name: s.to_string(),
            }),
        }
    }
}
