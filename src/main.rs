//! An animated Sudoku generator and solver for the terminal.
//!
//! This program:
//! 1. Generates a puzzle by seeding the diagonal boxes with random
//!    permutations, completing the grid, then blanking out a
//!    difficulty-controlled share of cells
//! 2. Solves it with exhaustive backtracking, repainting the board on
//!    every placement and every backtrack
//! 3. Reports the step count and whether the found solution matches the
//!    grid the puzzle was carved from

use sudoku_vis::display::{Renderer, PLACE_DELAY};
use sudoku_vis::generator::DEFAULT_DIFFICULTY;
use sudoku_vis::session::DEFAULT_SIZE;
use sudoku_vis::{benchmark, Backtracking, Session};
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use std::io;
use std::process;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "sudoku-vis", version, about = "Animated Sudoku generator and backtracking solver")]
struct Cli {
    /// Board edge length; must be a perfect square (4, 9, 16, ...)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Fraction of cells removed from the solved grid, in [0, 1]
    #[arg(long, default_value_t = DEFAULT_DIFFICULTY)]
    difficulty: f64,

    /// Seed for reproducible puzzle generation
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds to pause after each placement; undos pause half as long
    #[arg(long, default_value_t = PLACE_DELAY.as_millis() as u64)]
    delay_ms: u64,

    /// Print only the initial and final boards, skipping the animation
    #[arg(long)]
    no_anim: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and solve a batch of puzzles, timing each solve pass
    Benchmark {
        /// Number of boards to generate and solve
        #[arg(long, default_value_t = 100)]
        count: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Some(Command::Benchmark { count }) => run_benchmark(&cli, count),
        None => run_solver(&cli),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}

fn run_solver(cli: &Cli) -> sudoku_vis::Result<()> {
    if !cli.no_anim {
        println!("\nINITIALIZING SUDOKU SOLVER...\n");
        thread::sleep(Duration::from_secs(1));
    }

    let mut builder = Session::builder()
        .size(cli.size)
        .difficulty(cli.difficulty)
        .strategy(Box::new(Backtracking::new()));
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    let mut session = builder.build()?;
    info!(
        "Generated {}x{} puzzle with {} empty cells",
        cli.size,
        cli.size,
        session.board().count_empty()
    );

    let solved = if cli.no_anim {
        println!("{}", session.board());
        session.solve()
    } else {
        let place_delay = Duration::from_millis(cli.delay_ms);
        let mut renderer = Renderer::with_delays(session.board(), place_delay, place_delay / 2);

        renderer.frame(session.board(), 0)?;
        println!("Initial board. Starting solver in 2 seconds...");
        thread::sleep(Duration::from_secs(2));

        let solved = session.solve_with(&mut |event| {
            let _ = renderer.on_step(&event);
        });
        renderer.frame(session.board(), session.steps())?;
        solved
    };

    if solved {
        if cli.no_anim {
            println!("{}", session.board());
        }
        println!("\nSolved successfully in {} steps!", session.steps());
        if session.matches_solution() {
            info!("✅ Solution matches the generated grid!");
        } else {
            info!("⚠️  Found a different valid solution; this puzzle admits more than one!");
            println!("\nGenerated grid for comparison:");
            println!("{}", session.solution());
        }
    } else {
        println!("\nNo solution exists.");
    }

    Ok(())
}

fn run_benchmark(cli: &Cli, count: usize) -> sudoku_vis::Result<()> {
    info!("Running benchmark with {} boards...", count);
    let results = benchmark::run_benchmark(count, cli.size, cli.difficulty)?;
    results.print_results();
    Ok(())
}
