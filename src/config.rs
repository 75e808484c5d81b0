//! Tunable values for generation, search and rendering

use clap::ValueEnum;
use rand::{seq::SliceRandom, Rng};

use crate::Point;

/// Characters used when rendering or parsing a grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub filled: char,
    pub empty: char,
    pub path: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            filled: '⿳',
            empty: 'ㆍ',
            path: '❌',
        }
    }
}

impl Glyphs {
    /// Plain ASCII glyphs, handy for terminals without wide-character fonts
    pub fn ascii() -> Self {
        Self {
            filled: '#',
            empty: '.',
            path: '*',
        }
    }
}

/// Maze carving parameters
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Carving stops once strictly more than this percentage of the
    /// interior has been carved.
    pub coverage_percent: f64,
    /// Each walk may take at most this many steps per interior cell
    /// before the attempt counts as stalled.
    pub step_limit_per_cell: usize,
    /// Stalled attempts allowed before giving up
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            coverage_percent: 55.0,
            step_limit_per_cell: 100,
            max_attempts: 16,
        }
    }
}

/// Which candidate the path finder follows at a crossroad
///
/// Either way, all candidates are recorded and the one taken is the one
/// blacklisted if the attempt dead-ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BranchPolicy {
    /// Always the first candidate in priority order (down, up, left, right)
    #[default]
    First,
    /// A uniformly random candidate
    Random,
}

impl BranchPolicy {
    pub(crate) fn pick<R: Rng + ?Sized>(self, candidates: &[Point], random: &mut R) -> Point {
        match self {
            BranchPolicy::First => candidates[0],
            BranchPolicy::Random => *candidates.choose(random).unwrap_or(&candidates[0]),
        }
    }
}

/// Path search parameters
#[derive(Clone, Debug, Default)]
pub struct SearchConfig {
    pub branch_policy: BranchPolicy,
    /// Upper bound on search steps, restarts included.
    ///
    /// `None` uses the square of the grid area, which no search can exceed:
    /// every restart grows the blacklist by one cell and an attempt never
    /// visits a cell twice.
    pub step_limit: Option<usize>,
}
