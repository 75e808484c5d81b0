//! Carve a maze with a self-avoiding random walk, then find a way through it
//!
//! # Examples
//! ## Generate and solve
//! ```
//! use walk_maze::{seeded_rng, Glyphs, MazeGenerator, PathFinder};
//!
//! let mut random = seeded_rng(Some(7));
//! let maze = MazeGenerator::default()
//!     .generate_maze(50, 10, &mut random)
//!     .unwrap();
//! println!("{}", maze.grid().render(&Glyphs::default()));
//!
//! let solution = PathFinder::new(maze.snapshot(), Default::default())
//!     .solve(&mut random)
//!     .unwrap();
//! println!("{}", solution.grid.render(&Glyphs::default()));
//! assert_eq!(solution.route.last(), Some(&maze.grid().exit()));
//! ```
//!
//! ## Solve a hand-drawn maze
//! ```
//! use walk_maze::{seeded_rng, Glyphs, Grid, PathFinder};
//!
//! let glyphs = Glyphs::ascii();
//! let maze = "
//! ########
//! ......#
//! #.###.#
//! #.##...
//! ########";
//! let grid = Grid::parse(maze.trim(), &glyphs).unwrap();
//! let solution = PathFinder::new(grid, Default::default())
//!     .solve(&mut seeded_rng(Some(0)))
//!     .unwrap();
//! assert_eq!(solution.restarts, 2);
//! assert_eq!(
//!     solution.grid.render(&glyphs),
//!     "#######\n******#\n#.###*#\n#.##.**\n#######"
//! );
//! ```

use anyhow::{anyhow, bail};
use itertools::Itertools;
use rand::{rngs::StdRng, SeedableRng};

pub mod config;
pub mod maze_generator;
pub mod pathfinder;
pub mod walker;

pub use config::{BranchPolicy, GeneratorConfig, Glyphs, SearchConfig};
pub use maze_generator::{Maze, MazeGenerator};
pub use pathfinder::{PathFinder, PathSolution, SearchState};

/// Smallest accepted width and height
///
/// Anything narrower leaves no room for both openings and an interior.
pub const MIN_SIZE: usize = 5;

/// Location in the grid; `x` is the column, `y` the row
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbouring point, or `None` when stepping past the zero edge
    pub fn step(self, direction: Direction) -> Option<Self> {
        let Self { x, y } = self;
        match direction {
            Direction::Up => Some(Self::new(x, y.checked_sub(1)?)),
            Direction::Down => Some(Self::new(x, y + 1)),
            Direction::Left => Some(Self::new(x.checked_sub(1)?, y)),
            Direction::Right => Some(Self::new(x + 1, y)),
        }
    }

    /// All existing axis-aligned neighbours
    pub fn neighbours(self) -> impl Iterator<Item = Self> {
        Direction::ALL.into_iter().filter_map(move |d| self.step(d))
    }

    /// True when `other` is exactly one step away along one axis
    pub fn is_adjacent(self, other: Self) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

/// Axis-aligned move; `Up` decreases the row index
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

/// State of a single grid cell
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Cell {
    Filled,
    Empty,
    PathMarker,
}

/// Fixed-size rectangular cell buffer
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cells
    cells: Vec<Cell>,
}

impl Grid {
    /// Solid grid with the entry and exit openings already carved
    ///
    /// Returns error, if either dimension is below [MIN_SIZE].
    pub fn new(width: usize, height: usize) -> anyhow::Result<Self> {
        Self::check_size(width, height)?;
        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::Filled; width * height],
        };
        for pos in [
            Point::new(0, 1),
            Point::new(1, 1),
            Point::new(width - 1, height - 2),
            Point::new(width - 2, height - 2),
        ] {
            grid.set(pos, Cell::Empty);
        }
        Ok(grid)
    }

    fn check_size(width: usize, height: usize) -> anyhow::Result<()> {
        if width < MIN_SIZE || height < MIN_SIZE {
            bail!("Grid must be at least {MIN_SIZE}x{MIN_SIZE}, got {width}x{height}");
        }
        Ok(())
    }

    /// Parse grid from its rendered form
    ///
    /// - `text`: One line per row, one glyph per cell.
    /// - `glyphs`: Characters to recognize.
    ///
    /// Returns error, if the text contains unknown characters, rows of
    /// unequal length or is smaller than [MIN_SIZE] in either direction.
    pub fn parse(text: &str, glyphs: &Glyphs) -> anyhow::Result<Self> {
        let rows: Vec<Vec<char>> = text.split('\n').map(|row| row.chars().collect()).collect();
        let height = rows.len();
        let width = rows[0].len();
        Self::check_size(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                bail!("Row {y} has {} cells, expected {width}", row.len());
            }
            for (x, &c) in row.iter().enumerate() {
                let cell = match c {
                    c if c == glyphs.filled => Cell::Filled,
                    c if c == glyphs.empty => Cell::Empty,
                    c if c == glyphs.path => Cell::PathMarker,
                    val => {
                        return Err(anyhow!(
                            "Unexpected character `{}` at y={}, x={}",
                            val,
                            y,
                            x
                        ))
                    }
                };
                cells.push(cell);
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Outer cell of the entry opening
    pub fn entry(&self) -> Point {
        Point::new(0, 1)
    }

    /// Outer cell of the exit opening
    pub fn exit(&self) -> Point {
        Point::new(self.width - 1, self.height - 2)
    }

    /// Reference area for the coverage threshold, `W*H - 2*(W+H)`
    pub fn interior_cells(&self) -> usize {
        self.width * self.height - 2 * (self.width + self.height)
    }

    pub fn contains(&self, pos: Point) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// True for cells off the outer border
    pub fn is_interior(&self, pos: Point) -> bool {
        (1..self.width - 1).contains(&pos.x) && (1..self.height - 1).contains(&pos.y)
    }

    /// Cell at `pos`. Panics if `pos` lies outside the grid.
    pub fn get(&self, pos: Point) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Overwrite cell at `pos`. Panics if `pos` lies outside the grid.
    pub fn set(&mut self, pos: Point, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    fn index(&self, pos: Point) -> usize {
        assert!(self.contains(pos), "{pos:?} outside {}x{} grid", self.width, self.height);
        pos.y * self.width + pos.x
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Text form of the grid, rows separated by newlines
    pub fn render(&self, glyphs: &Glyphs) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Filled => glyphs.filled,
                        Cell::Empty => glyphs.empty,
                        Cell::PathMarker => glyphs.path,
                    })
                    .join("")
            })
            .join("\n")
    }
}

/// Random source for generation and search
///
/// A seed makes runs reproducible; without one the generator is seeded
/// from system entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    if let Some(state) = seed {
        StdRng::seed_from_u64(state)
    } else {
        StdRng::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cell, Direction, Glyphs, Grid, Point};

    #[test]
    fn new_grid_has_only_openings_carved() {
        let grid = Grid::new(6, 5).unwrap();
        assert_eq!(
            grid.render(&Glyphs::ascii()),
            "######\n..####\n######\n####..\n######"
        );
        assert_eq!(grid.entry(), Point::new(0, 1));
        assert_eq!(grid.exit(), Point::new(5, 3));
    }

    #[test]
    fn reject_degenerate_sizes() {
        assert!(Grid::new(4, 10).is_err());
        assert!(Grid::new(10, 4).is_err());
        assert!(Grid::new(0, 0).is_err());
        assert!(Grid::new(5, 5).is_ok());
    }

    #[test]
    fn interior_bounds() {
        let grid = Grid::new(7, 6).unwrap();
        assert!(grid.is_interior(Point::new(1, 1)));
        assert!(grid.is_interior(Point::new(5, 4)));
        assert!(!grid.is_interior(Point::new(0, 3)));
        assert!(!grid.is_interior(Point::new(6, 3)));
        assert!(!grid.is_interior(Point::new(3, 5)));
        assert_eq!(grid.interior_cells(), 42 - 26);
    }

    #[test]
    fn set_and_get_cells() {
        let mut grid = Grid::new(5, 5).unwrap();
        let pos = Point::new(2, 3);
        assert_eq!(grid.get(pos), Cell::Filled);
        grid.set(pos, Cell::PathMarker);
        assert_eq!(grid.get(pos), Cell::PathMarker);
    }

    #[test]
    fn clone_is_independent() {
        let original = Grid::new(5, 5).unwrap();
        let mut copy = original.clone();
        copy.set(Point::new(2, 2), Cell::Empty);
        assert_eq!(original.get(Point::new(2, 2)), Cell::Filled);
    }

    #[test]
    fn parse_rendered_grid() {
        let glyphs = Glyphs::ascii();
        let text = "
#####
..*.#
#.#.#
#...."
            .trim();
        assert!(Grid::parse(text, &glyphs).is_err(), "only four rows");

        let text = "
#####
..*.#
#.#.#
#....
#####"
            .trim();
        let grid = Grid::parse(text, &glyphs).unwrap();
        assert_eq!(grid.get(Point::new(2, 1)), Cell::PathMarker);
        assert_eq!(grid.get(Point::new(4, 3)), Cell::Empty);
        assert_eq!(grid.render(&glyphs), text);
        assert_eq!(grid.render(&glyphs), grid.render(&glyphs));
    }

    #[test]
    fn parse_rejects_unknown_and_ragged_input() {
        let glyphs = Glyphs::ascii();
        let unknown = "#####\n..x.#\n#.#.#\n#....\n#####";
        let err = Grid::parse(unknown, &glyphs).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected character `x` at y=1, x=2");

        let ragged = "#####\n..#.#\n#.#.\n#....\n#####";
        assert!(Grid::parse(ragged, &glyphs).is_err());
    }

    #[test]
    fn neighbours_stop_at_zero_edge() {
        let corner = Point::new(0, 0);
        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.neighbours().count(), 2);
        assert_eq!(Point::new(3, 3).neighbours().count(), 4);
        assert!(Point::new(3, 3).is_adjacent(Point::new(3, 4)));
        assert!(!Point::new(3, 3).is_adjacent(Point::new(4, 4)));
        assert!(!Point::new(3, 3).is_adjacent(Point::new(3, 3)));
    }
}
