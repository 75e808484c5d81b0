//! Map generation

use anyhow::{bail, Context};
use log::{debug, info, trace, warn};
use rand::{seq::SliceRandom, Rng};

use crate::walker::{is_self_avoiding, Walker};
use crate::{Cell, Direction, GeneratorConfig, Glyphs, Grid, Point};

/// Generated maze, together with the walks that carved it
#[derive(Clone, Debug)]
pub struct Maze {
    grid: Grid,
    /// Carved percentage of the interior when the main walk stopped
    coverage: f64,
    /// Cells carved by both walks
    carved: usize,
    main_walk: Walker,
    passage_walk: Walker,
}

impl Maze {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Independent copy of the finished grid, for solving
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    pub fn carved(&self) -> usize {
        self.carved
    }

    /// Walk that carved the main body, starting next to the entry
    pub fn main_walk(&self) -> &Walker {
        &self.main_walk
    }

    /// Walk from the exit that joined the main body
    pub fn passage_walk(&self) -> &Walker {
        &self.passage_walk
    }

    pub fn render(&self, glyphs: &Glyphs) -> String {
        self.grid.render(glyphs)
    }
}

/// Random-walk maze generator
#[derive(Default)]
pub struct MazeGenerator {
    config: GeneratorConfig,
}

impl MazeGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate a maze with a self-avoiding random walk
    ///
    /// The main walk starts next to the entry and carves until the
    /// coverage threshold is passed. A second walk then starts next to the
    /// exit and wanders until it steps onto the main walk's trail, which
    /// connects entry and exit.
    ///
    /// A walk can paint itself into a corner, leaving no cell it may carve.
    /// Such a walk runs out of steps and the maze is started over, up to
    /// [GeneratorConfig::max_attempts] times.
    ///
    /// Returns error, if the dimensions are too small, the coverage
    /// threshold is not a percentage below 100, or every attempt stalls.
    pub fn generate_maze<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        random: &mut R,
    ) -> anyhow::Result<Maze> {
        let threshold = self.config.coverage_percent;
        if !(0.0..100.0).contains(&threshold) {
            bail!("Coverage must be within 0..100 %, got {threshold}");
        }
        let grid = Grid::new(width, height)?;

        for attempt in 1..=self.config.max_attempts {
            if let Some(maze) = self.carve(grid.clone(), random)? {
                return Ok(maze);
            }
            warn!("Walk stalled on attempt {attempt}, starting over");
        }
        bail!(
            "No {width}x{height} maze reached {threshold} % coverage in {} attempts",
            self.config.max_attempts
        )
    }

    /// Run both walks on `grid`; `None` if either walk runs out of steps
    fn carve<R: Rng + ?Sized>(
        &self,
        mut grid: Grid,
        random: &mut R,
    ) -> anyhow::Result<Option<Maze>> {
        let interior = grid.interior_cells();
        let step_limit = self.config.step_limit_per_cell.saturating_mul(interior);

        let mut main_walk = Walker::new(Point::new(1, 1));
        let mut carved = 0;
        let mut steps = 0;
        let coverage = loop {
            let coverage = carved as f64 / interior as f64 * 100.0;
            if coverage > self.config.coverage_percent {
                break coverage;
            }
            if steps >= step_limit {
                debug!("Main walk stuck at {coverage:.1} % coverage after {steps} steps");
                return Ok(None);
            }
            if Self::take_step(&mut grid, &mut main_walk, random)? {
                carved += 1;
            }
            steps += 1;
        };
        info!("Main walk carved {carved} cells ({coverage:.1} %) in {steps} steps");

        let mut passage_walk = Walker::new(Point::new(grid.width() - 2, grid.height() - 2));
        let mut steps = 0;
        while !passage_walk
            .last()
            .is_some_and(|pos| main_walk.has_visited(pos))
        {
            if steps >= step_limit {
                debug!("Passage walk did not meet the main walk in {steps} steps");
                return Ok(None);
            }
            if Self::take_step(&mut grid, &mut passage_walk, random)? {
                carved += 1;
            }
            steps += 1;
        }
        info!("Passage walk joined the main walk in {steps} steps");

        Ok(Some(Maze {
            grid,
            coverage,
            carved,
            main_walk,
            passage_walk,
        }))
    }

    /// Move walker one step, carving the cell it lands on
    ///
    /// The walker picks a random interior neighbour that keeps the walk
    /// self-avoiding. With no such neighbour, the walker resumes from a
    /// random point of its history.
    ///
    /// Returns true, if a filled cell was carved.
    fn take_step<R: Rng + ?Sized>(
        grid: &mut Grid,
        walker: &mut Walker,
        random: &mut R,
    ) -> anyhow::Result<bool> {
        let current = walker.position();
        let candidates: Vec<Point> = Direction::ALL
            .into_iter()
            .filter_map(|d| current.step(d))
            .filter(|&pos| {
                grid.is_interior(pos) && is_self_avoiding(pos, current, walker.visited())
            })
            .collect();

        let next = match candidates.choose(random) {
            Some(&pos) => pos,
            None => {
                let &pos = walker
                    .history()
                    .choose(random)
                    .with_context(|| format!("Walker stuck at {current:?} with no history"))?;
                trace!("Walker stuck at {current:?}, resuming from {pos:?}");
                pos
            }
        };
        walker.move_to(next);

        if grid.get(next) == Cell::Filled {
            grid.set(next, Cell::Empty);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
