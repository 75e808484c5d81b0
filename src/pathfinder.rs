//! Find a way from entry to exit by trial and error
//!
//! The finder walks from the entry, marking its path, until it either reaches
//! the exit or runs into a dead end. Whenever more than one way is open, the
//! options are written down as a crossroad. On a dead end, the branch taken
//! at the latest crossroad is excluded for good and the walk starts over
//! from the entry on a clean copy of the maze.

use std::collections::HashSet;
use std::iter;

use anyhow::{bail, Context};
use log::{debug, info};
use rand::Rng;

use crate::{BranchPolicy, Cell, Direction, Grid, Point, SearchConfig};

/// Order in which neighbours are considered; the first entry wins ties
/// under [BranchPolicy::First].
const SEARCH_ORDER: [Direction; 4] = [
    Direction::Down,
    Direction::Up,
    Direction::Left,
    Direction::Right,
];

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SearchState {
    Searching,
    Backtracking,
    Done,
}

/// Decision point with more than one open direction
#[derive(Clone, Debug)]
struct Crossroad {
    candidates: Vec<Point>,
    taken: Point,
}

/// Single walk from the entry
#[derive(Clone, Debug)]
struct Attempt {
    position: Point,
    moves: Vec<Point>,
    crossroads: Vec<Crossroad>,
}

impl Attempt {
    fn new(start: Point) -> Self {
        Self {
            position: start,
            moves: Vec::new(),
            crossroads: Vec::new(),
        }
    }
}

/// Result of a successful search
#[derive(Debug)]
pub struct PathSolution {
    /// Cells walked on the final attempt, from entry to exit
    pub route: Vec<Point>,
    /// Maze with the final route marked
    pub grid: Grid,
    /// Number of times the walk started over
    pub restarts: usize,
    /// Crossroads passed over all attempts
    pub crossroads: usize,
    /// Cells excluded after leading to dead ends
    pub blacklist: HashSet<Point>,
    /// Search steps taken, restarts included
    pub steps: usize,
}

impl PathSolution {
    /// Print report
    pub fn print_report(&self) {
        println!(
            "Found a path of {} steps after {} restarts ({} search steps, {} crossroads).",
            self.route.len() - 1,
            self.restarts,
            self.steps,
            self.crossroads
        );
    }
}

/// Backtracking path finder over a maze snapshot
pub struct PathFinder {
    /// Maze as handed over; never marked
    maze: Grid,
    /// Working copy carrying the current attempt's marks
    grid: Grid,
    attempt: Attempt,
    blacklist: HashSet<Point>,
    state: SearchState,
    branch_policy: BranchPolicy,
    step_limit: usize,
    steps: usize,
    restarts: usize,
    crossroads: usize,
}

impl PathFinder {
    pub fn new(maze: Grid, config: SearchConfig) -> Self {
        let area = maze.width() * maze.height();
        let step_limit = config.step_limit.unwrap_or(area.saturating_mul(area));
        let grid = Self::fresh_copy(&maze);
        Self {
            attempt: Attempt::new(maze.entry()),
            maze,
            grid,
            blacklist: HashSet::new(),
            state: SearchState::Searching,
            branch_policy: config.branch_policy,
            step_limit,
            steps: 0,
            restarts: 0,
            crossroads: 0,
        }
    }

    fn fresh_copy(maze: &Grid) -> Grid {
        let mut grid = maze.clone();
        grid.set(maze.entry(), Cell::PathMarker);
        grid
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Working grid of the current attempt
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Moves of the current attempt
    pub fn moves(&self) -> &[Point] {
        &self.attempt.moves
    }

    pub fn position(&self) -> Point {
        self.attempt.position
    }

    pub fn blacklist(&self) -> &HashSet<Point> {
        &self.blacklist
    }

    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// Search until the exit is reached
    ///
    /// Returns error, if the exit cannot be reached from the entry or the
    /// step limit runs out first.
    pub fn solve<R: Rng + ?Sized>(mut self, random: &mut R) -> anyhow::Result<PathSolution> {
        while self.state != SearchState::Done {
            if self.steps >= self.step_limit {
                bail!("No path found in {} steps", self.steps);
            }
            self.step(random)?;
        }
        info!(
            "Reached exit in {} moves after {} restarts and {} steps",
            self.attempt.moves.len(),
            self.restarts,
            self.steps
        );

        Ok(PathSolution {
            route: iter::once(self.maze.entry())
                .chain(self.attempt.moves)
                .collect(),
            grid: self.grid,
            restarts: self.restarts,
            crossroads: self.crossroads,
            blacklist: self.blacklist,
            steps: self.steps,
        })
    }

    /// Advance the state machine by one transition
    pub fn step<R: Rng + ?Sized>(&mut self, random: &mut R) -> anyhow::Result<SearchState> {
        match self.state {
            SearchState::Searching => self.search(random),
            SearchState::Backtracking => self.backtrack()?,
            SearchState::Done => return Ok(self.state),
        }
        self.steps += 1;
        Ok(self.state)
    }

    /// Open neighbours of the current position, in [SEARCH_ORDER]
    fn candidates(&self) -> Vec<Point> {
        let current = self.attempt.position;
        SEARCH_ORDER
            .into_iter()
            .filter_map(|d| current.step(d))
            .filter(|&pos| {
                self.grid.contains(pos)
                    && self.grid.get(pos) == Cell::Empty
                    && !self.blacklist.contains(&pos)
            })
            .collect()
    }

    fn search<R: Rng + ?Sized>(&mut self, random: &mut R) {
        let candidates = self.candidates();
        let next = match candidates.len() {
            0 => {
                self.state = SearchState::Backtracking;
                return;
            }
            1 => candidates[0],
            _ => {
                let taken = self.branch_policy.pick(&candidates, random);
                self.attempt.crossroads.push(Crossroad { candidates, taken });
                self.crossroads += 1;
                taken
            }
        };

        self.attempt.position = next;
        self.attempt.moves.push(next);
        self.grid.set(next, Cell::PathMarker);

        if next == self.maze.exit() {
            self.state = SearchState::Done;
        }
    }

    /// Exclude the latest branch taken and start over from the entry
    fn backtrack(&mut self) -> anyhow::Result<()> {
        let crossroad = self.attempt.crossroads.last().with_context(|| {
            format!(
                "Dead end at {:?} with no crossroad to return to, exit {:?} is unreachable",
                self.attempt.position,
                self.maze.exit()
            )
        })?;
        let wrong = crossroad.taken;
        debug!(
            "Dead end at {:?}; excluding {wrong:?} out of {:?}",
            self.attempt.position, crossroad.candidates
        );
        self.blacklist.insert(wrong);
        self.restarts += 1;

        self.attempt = Attempt::new(self.maze.entry());
        self.grid = Self::fresh_copy(&self.maze);
        self.state = SearchState::Searching;
        Ok(())
    }
}
