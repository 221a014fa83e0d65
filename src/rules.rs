use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Coord;
use crate::color::ColorFunction;
use crate::grid::Grid;

/// The named transition rules.
///
/// Each rule looks at one live cell `(x, y)` of the current generation and revives or kills cells
/// around it in the next generation. Rules only ever read the current generation, so no rule sees
/// what another cell wrote during the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ruleset {
    /// ```notrust
    /// if (x+1, y) alive: kill (x+2, y+1)
    /// if (x-1, y) alive: kill (x-2, y+1)
    /// revive (x, y+1), (x+1, y+1)
    /// ```
    Lanes,

    /// Driven by the shared [`WormCounter`] `c`.
    /// ```notrust
    /// if (x+1, y) alive: revive (x+c, y+1), then advance c
    /// if (x-1, y) alive: revive (x-c, y-1), kill (x+c, y-2)
    /// ```
    Worms,

    /// ```notrust
    /// revive (x, y+1), kill (x, y-2), revive (x+2, y), revive (x-2, y), kill (x-2, y+1)
    /// ```
    Plane,

    /// ```notrust
    /// if (x+1, y) alive: revive (x+2, y+1)
    /// if (x-1, y) alive: revive (x-2, y+1)
    /// ```
    Branches,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Unknown ruleset \"{name}\", expected one of: lanes, worms, plane, branches")]
    UnknownRuleset { name: String },
}

impl Ruleset {
    pub const ALL: [Ruleset; 4] = [
        Ruleset::Lanes,
        Ruleset::Worms,
        Ruleset::Plane,
        Ruleset::Branches,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Ruleset::Lanes => "lanes",
            Ruleset::Worms => "worms",
            Ruleset::Plane => "plane",
            Ruleset::Branches => "branches",
        }
    }

    /// Apply the rule for the live cell at `(x, y)` of `current`
    pub fn apply_cell(
        &self,
        x: Coord,
        y: Coord,
        current: &Grid,
        next: &mut Next<'_>,
        counter: &mut WormCounter,
    ) {
        match self {
            Ruleset::Lanes => lanes(x, y, current, next),
            Ruleset::Worms => worms(x, y, current, next, counter),
            Ruleset::Plane => plane(x, y, next),
            Ruleset::Branches => branches(x, y, current, next),
        }
    }
}

impl FromStr for Ruleset {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ruleset::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RuleError::UnknownRuleset {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn lanes(x: Coord, y: Coord, current: &Grid, next: &mut Next<'_>) {
    if current.is_alive(x + 1, y) {
        next.kill(x + 2, y + 1);
    }
    if current.is_alive(x - 1, y) {
        next.kill(x - 2, y + 1);
    }

    next.revive(x, y + 1);
    next.revive(x + 1, y + 1);
}

fn worms(x: Coord, y: Coord, current: &Grid, next: &mut Next<'_>, c: &mut WormCounter) {
    if current.is_alive(x + 1, y) {
        next.revive(x + c.get(), y + 1);
        c.advance();
    }
    if current.is_alive(x - 1, y) {
        next.revive(x - c.get(), y - 1);
        next.kill(x + c.get(), y - 2);
    }
}

fn plane(x: Coord, y: Coord, next: &mut Next<'_>) {
    next.revive(x, y + 1);
    next.kill(x, y - 2);
    next.revive(x + 2, y);
    next.revive(x - 2, y);
    next.kill(x - 2, y + 1);
}

fn branches(x: Coord, y: Coord, current: &Grid, next: &mut Next<'_>) {
    if current.is_alive(x + 1, y) {
        next.revive(x + 2, y + 1);
    }
    if current.is_alive(x - 1, y) {
        next.revive(x - 2, y + 1);
    }
}

/// Rotating offset used by [`Ruleset::Worms`]. Counts `0, 1, 2, 3, 0, ...` and carries over from
/// one cell visit to the next and from one generation to the next.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WormCounter(u8);

impl WormCounter {
    const WRAP: u8 = 4;

    pub fn get(&self) -> Coord {
        self.0 as Coord
    }

    pub fn advance(&mut self) {
        self.0 = (self.0 + 1) % Self::WRAP;
    }
}

/// Write side of a generation. Revivals and kills outside the grid are dropped.
pub struct Next<'a> {
    grid: &'a mut Grid,
    color: &'a mut dyn ColorFunction,
}

impl<'a> Next<'a> {
    pub fn new(grid: &'a mut Grid, color: &'a mut dyn ColorFunction) -> Self {
        Self { grid, color }
    }

    /// Bring `(x, y)` to life with a freshly computed color
    pub fn revive(&mut self, x: Coord, y: Coord) {
        if self.grid.is_within_bounds(x, y) {
            let v = self.color.color(x, y);
            self.grid.set(x, y, v);
        }
    }

    pub fn kill(&mut self, x: Coord, y: Coord) {
        self.grid.set(x, y, 0);
    }
}

/// The name a [`RuleEngine`] was configured with
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Known(Ruleset),
    Unknown(String),
}

/// Computes generations for one selected rule.
///
/// An engine built from a name that isn't in the catalog still exists; it just refuses to mutate
/// anything and reports [`RuleError::UnknownRuleset`] from [`RuleEngine::apply`].
#[derive(Debug, Clone)]
pub struct RuleEngine {
    selector: Selector,
    counter: WormCounter,
}

impl RuleEngine {
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            selector: Selector::Known(ruleset),
            counter: WormCounter::default(),
        }
    }

    /// Look `name` up in the catalog, keeping it around even if it doesn't match anything
    pub fn from_name(name: &str) -> Self {
        let selector = match name.parse() {
            Ok(ruleset) => Selector::Known(ruleset),
            Err(_) => Selector::Unknown(name.to_string()),
        };

        Self {
            selector,
            counter: WormCounter::default(),
        }
    }

    /// `None` if the engine was configured with an unknown name
    pub fn ruleset(&self) -> Option<Ruleset> {
        match self.selector {
            Selector::Known(r) => Some(r),
            Selector::Unknown(_) => None,
        }
    }

    pub fn counter(&self) -> WormCounter {
        self.counter
    }

    /// Visit every cell of `current`, `x` outer and `y` inner, and apply the rule to the live
    /// ones. All reads go to `current` and all writes to `next`, which the caller is expected to
    /// have initialized as a copy of `current`.
    pub fn apply(
        &mut self,
        current: &Grid,
        next: &mut Grid,
        color: &mut dyn ColorFunction,
    ) -> Result<(), RuleError> {
        let ruleset = match &self.selector {
            Selector::Known(r) => *r,
            Selector::Unknown(name) => {
                return Err(RuleError::UnknownRuleset { name: name.clone() });
            }
        };

        let mut next = Next::new(next, color);

        for (x, y, v) in current.cells() {
            if v > 0 {
                ruleset.apply_cell(x, y, current, &mut next, &mut self.counter);
            }
        }

        Ok(())
    }
}
