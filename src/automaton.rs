use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::color::ColorFunction;
use crate::color::Palette;
use crate::grid::ConfigError;
use crate::grid::Grid;
use crate::rules::RuleEngine;
use crate::rules::RuleError;
use crate::rules::Ruleset;
use crate::rules::WormCounter;
use crate::seed::Seed;

/// Everything chosen at startup. Nothing here can change once the automaton is built.
#[derive(Debug, Clone)]
pub struct Config {
    pub width: usize,
    pub height: usize,

    /// Looked up in [`Ruleset`]. An unknown name is not fatal, see [`Automaton::step`].
    pub ruleset: String,

    pub palette: Palette,
    pub seed: Seed,

    /// Makes both the seeding and the coloring reproducible. Drawn from entropy when absent.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            ruleset: Ruleset::Worms.name().to_string(),
            palette: Palette::Sine,
            seed: Seed::Noise { intensity: 10 },
            rng_seed: None,
        }
    }
}

/// One generation, as handed to the renderer
#[derive(Debug)]
pub struct Generation<'a> {
    pub grid: &'a Grid,

    /// Number of completed steps
    pub steps: u64,

    /// Set on the first step only, if the ruleset was not recognized
    pub warning: Option<RuleError>,
}

/// Owns the current generation and advances it one step at a time
pub struct Automaton {
    current: Grid,

    /// Scratch buffer for the generation being computed
    next: Grid,

    engine: RuleEngine,
    color: Box<dyn ColorFunction>,
    steps: u64,

    /// Whether an unknown ruleset has already been reported
    warned: bool,
}

impl Automaton {
    /// Build an automaton from `config`, seeding its first generation
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let mut grid = Grid::new(config.width, config.height)?;

        // Seeding and coloring get separate streams
        let (mut seed_rng, color_rng) = match config.rng_seed {
            Some(s) => (
                ChaCha8Rng::seed_from_u64(s),
                ChaCha8Rng::seed_from_u64(s.wrapping_add(1)),
            ),
            None => (ChaCha8Rng::from_entropy(), ChaCha8Rng::from_entropy()),
        };

        config.seed.apply(&mut grid, &mut seed_rng);

        debug!(
            width = config.width,
            height = config.height,
            ruleset = %config.ruleset,
            palette = ?config.palette,
            seed = ?config.seed,
            live = grid.live_count(),
            "Built automaton"
        );

        Ok(Self::from_grid(
            grid,
            RuleEngine::from_name(&config.ruleset),
            config.palette.build(color_rng),
        ))
    }

    /// Start from an already populated grid
    pub fn from_grid(grid: Grid, engine: RuleEngine, color: Box<dyn ColorFunction>) -> Self {
        Self {
            next: grid.clone(),
            current: grid,
            engine,
            color,
            steps: 0,
            warned: false,
        }
    }

    /// Advance one generation.
    ///
    /// If the ruleset is unknown nothing changes, but the step still counts. The first such step
    /// logs a warning and returns the error in [`Generation::warning`]; later ones stay quiet.
    pub fn step(&mut self) -> Generation<'_> {
        self.next.copy_from(&self.current);

        let res = self
            .engine
            .apply(&self.current, &mut self.next, &mut *self.color);

        let warning = match res {
            Ok(()) => {
                std::mem::swap(&mut self.current, &mut self.next);
                None
            }
            Err(e) if !self.warned => {
                warn!("{e}, leaving the grid unchanged");
                self.warned = true;
                Some(e)
            }
            Err(_) => None,
        };

        self.steps += 1;
        trace!(steps = self.steps, live = self.current.live_count(), "Step");

        Generation {
            grid: &self.current,
            steps: self.steps,
            warning,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// `None` if the configured name is not a known ruleset
    pub fn ruleset(&self) -> Option<Ruleset> {
        self.engine.ruleset()
    }

    /// Current offset of the `worms` rule
    pub fn worm_counter(&self) -> WormCounter {
        self.engine.counter()
    }
}
