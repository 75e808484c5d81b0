//! CLI for maze generation only

use clap::Parser;
use walk_maze::{seeded_rng, Glyphs, MazeGenerator};

/// Random-walk maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated field width
    #[arg(long, default_value_t = 135)]
    width: usize,

    /// Generated field height
    #[arg(long, default_value_t = 18)]
    height: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Draw with ASCII characters instead of wide glyphs
    #[arg(long)]
    ascii: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let glyphs = if args.ascii {
        Glyphs::ascii()
    } else {
        Glyphs::default()
    };
    let maze =
        MazeGenerator::default().generate_maze(args.width, args.height, &mut seeded_rng(args.seed))?;
    println!("{}", maze.render(&glyphs));
    Ok(())
}
