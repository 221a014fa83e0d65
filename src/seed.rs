use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

use crate::FULL;
use crate::Coord;
use crate::grid::Grid;

/// How the first generation is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed {
    /// One live cell in the middle of the top row
    TopCenter,

    /// One live cell in the middle of the grid
    Center,

    /// Every cell is independently alive or dead. `intensity` adds dead entries to the draw, so
    /// larger values make a sparser field: the live fraction is `1 / (intensity + 2)`.
    Noise { intensity: u32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("Unknown seed \"{name}\", expected one of: top-center, center, noise")]
    UnknownSeed { name: String },
}

impl Seed {
    /// Clear `grid` and populate it. `rng` is only drawn from by [`Seed::Noise`].
    pub fn apply<R: Rng>(&self, grid: &mut Grid, rng: &mut R) {
        grid.clear();

        let (w, h) = (grid.width() as Coord, grid.height() as Coord);

        match *self {
            Seed::TopCenter => grid.set(w / 2, 0, FULL),
            Seed::Center => grid.set(w / 2, h / 2, FULL),
            Seed::Noise { intensity } => {
                // One live entry against `intensity + 1` dead ones
                let entries = intensity as u64 + 2;

                for x in 0..w {
                    for y in 0..h {
                        if rng.gen_range(0..entries) == 0 {
                            grid.set(x, y, FULL);
                        }
                    }
                }
            }
        }
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    /// Accepts `top-center`, `center`, `noise` and `noise:<intensity>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SeedError::UnknownSeed {
            name: s.to_string(),
        };

        match s.split_once(':') {
            None => match s {
                "top-center" => Ok(Seed::TopCenter),
                "center" => Ok(Seed::Center),
                "noise" => Ok(Seed::Noise { intensity: 0 }),
                _ => Err(unknown()),
            },
            Some(("noise", n)) => {
                let intensity = n.parse().map_err(|_| unknown())?;
                Ok(Seed::Noise { intensity })
            }
            Some(_) => Err(unknown()),
        }
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::Seed;
    use super::SeedError;
    use crate::grid::Grid;

    fn live_fraction(intensity: u32, rng_seed: u64) -> f64 {
        let mut grid = Grid::new(200, 200).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);

        Seed::Noise { intensity }.apply(&mut grid, &mut rng);

        grid.live_count() as f64 / (200.0 * 200.0)
    }

    #[test]
    fn top_center() {
        let mut grid = Grid::new(10, 7).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        Seed::TopCenter.apply(&mut grid, &mut rng);

        assert_eq!(grid.get(5, 0), 255);
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    fn center_uses_integer_division() {
        let mut grid = Grid::new(9, 7).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        Seed::Center.apply(&mut grid, &mut rng);

        assert_eq!(grid.get(4, 3), 255);
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    fn seeding_clears_previous_cells() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(0, 0, 7);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        Seed::Center.apply(&mut grid, &mut rng);

        assert!(!grid.is_alive(0, 0));
    }

    #[test]
    fn noise_without_intensity_is_half_alive() {
        for rng_seed in 0..5 {
            let f = live_fraction(0, rng_seed);
            assert!((f - 0.5).abs() < 0.02, "live fraction {f} with seed {rng_seed}");
        }
    }

    #[test]
    fn noise_intensity_thins_the_field() {
        for (intensity, rng_seed) in [(1, 11), (3, 12), (10, 13)] {
            let want = 1.0 / (intensity as f64 + 2.0);
            let f = live_fraction(intensity, rng_seed);

            assert!(
                (f - want).abs() < 0.02,
                "intensity {intensity}: expected ~{want}, got {f}"
            );
        }
    }

    #[test]
    fn noise_cells_are_full_or_dead() {
        let mut grid = Grid::new(30, 30).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        Seed::Noise { intensity: 2 }.apply(&mut grid, &mut rng);

        assert!(grid.cells().all(|(_, _, v)| v == 0 || v == 255));
    }

    #[test]
    fn parse_seeds() {
        assert_eq!("center".parse(), Ok(Seed::Center));
        assert_eq!("top-center".parse(), Ok(Seed::TopCenter));
        assert_eq!("noise:10".parse(), Ok(Seed::Noise { intensity: 10 }));
        assert_eq!(
            "noise:-1".parse::<Seed>(),
            Err(SeedError::UnknownSeed {
                name: "noise:-1".to_string()
            })
        );
        assert!("corner".parse::<Seed>().is_err());
    }
}
