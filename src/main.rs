//! CLI for generating and solving mazes

use clap::Parser;
use walk_maze::{
    seeded_rng, BranchPolicy, GeneratorConfig, Glyphs, MazeGenerator, PathFinder, SearchConfig,
};

/// Carve a random-walk maze and find a way through it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width
    #[arg(long, default_value_t = 50)]
    width: usize,

    /// Maze height
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Branch to follow when several ways are open
    #[arg(long, value_enum, default_value_t = BranchPolicy::First)]
    policy: BranchPolicy,

    /// Percentage of the interior to carve before joining entry and exit
    #[arg(long, default_value_t = 55.0)]
    coverage: f64,

    /// Draw with ASCII characters instead of wide glyphs
    #[arg(long)]
    ascii: bool,

    /// Number of mazes to generate and solve
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Print search statistics after each solution
    #[arg(short, long)]
    report: bool,
}

/// Generate maze, solve it, print both
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let glyphs = if args.ascii {
        Glyphs::ascii()
    } else {
        Glyphs::default()
    };
    let generator = MazeGenerator::new(GeneratorConfig {
        coverage_percent: args.coverage,
        ..Default::default()
    });
    let mut random = seeded_rng(args.seed);

    for _ in 0..args.count {
        let maze = generator.generate_maze(args.width, args.height, &mut random)?;
        println!("{}\n", maze.render(&glyphs));

        let search = SearchConfig {
            branch_policy: args.policy,
            ..Default::default()
        };
        let solution = PathFinder::new(maze.snapshot(), search).solve(&mut random)?;
        println!("{}", solution.grid.render(&glyphs));
        if args.report {
            solution.print_report();
        }
    }
    Ok(())
}
