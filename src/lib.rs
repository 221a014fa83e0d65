pub mod automaton;
pub mod camera;
pub mod color;
pub mod events;
pub mod grid;
pub mod io;
pub mod rules;
pub mod seed;

/// Signed so rules can read neighbors past the grid edge.
pub type Coord = i64;
pub type CellValue = u8;

/// Value written by the seed strategies.
pub const FULL: CellValue = 255;
