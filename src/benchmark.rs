use crate::generator::Generator;
use crate::solver::{Backtracking, Strategy};
use crate::{Result, SudokuError};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Results from a benchmark run
#[derive(Debug)]
pub struct BenchmarkResults {
    pub total_duration: Duration,
    pub average_duration: Duration,
    pub min_duration: Duration,
    pub max_duration: Duration,
    pub total_boards: usize,
    pub solved_boards: usize,
    pub matching_solutions: usize,
    pub total_steps: u64,
    pub average_steps: u64,
}

impl BenchmarkResults {
    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        (self.solved_boards as f64 / self.total_boards as f64) * 100.0
    }

    /// Returns how often the found solution matched the generated grid,
    /// as a percentage of solved boards
    pub fn matching_rate(&self) -> f64 {
        (self.matching_solutions as f64 / self.solved_boards as f64) * 100.0
    }

    /// Pretty prints the benchmark results
    pub fn print_results(&self) {
        println!("\n=== Benchmark Results ===");
        println!("Total Duration: {:?}", self.total_duration);
        println!("Average Solve: {:?}", self.average_duration);
        println!("Min Solve: {:?}", self.min_duration);
        println!("Max Solve: {:?}", self.max_duration);
        println!("Total Boards: {}", self.total_boards);
        println!(
            "Successfully Solved: {} ({:.1}%)",
            self.solved_boards,
            self.success_rate()
        );
        println!(
            "Matched Generated Solution: {} ({:.1}%)",
            self.matching_solutions,
            self.matching_rate()
        );
        println!("Total Steps: {}", self.total_steps);
        println!("Average Steps: {}", self.average_steps);
    }
}

/// Generates and solves the specified number of boards, timing each
/// solve pass on its own.
pub fn run_benchmark(board_count: usize, size: usize, difficulty: f64) -> Result<BenchmarkResults> {
    if board_count == 0 {
        return Err(SudokuError::BenchmarkError(
            "Board count must be greater than 0".to_string(),
        ));
    }

    info!(
        "Starting benchmark with {} boards of size {}x{} at difficulty {}",
        board_count, size, size, difficulty
    );
    let start = Instant::now();
    let mut min_duration = Duration::MAX;
    let mut max_duration = Duration::ZERO;
    let mut solve_duration = Duration::ZERO;
    let mut solved_boards = 0;
    let mut matching_solutions = 0;
    let mut total_steps = 0u64;

    let mut generator = Generator::new(size, difficulty)?;
    let mut strategy = Backtracking::new();

    for i in 0..board_count {
        let mut puzzle = generator.generate(&mut strategy)?;
        debug!("Solving board {}/{}", i + 1, board_count);

        let solve_start = Instant::now();
        let solved = strategy.attempt_silent(&mut puzzle.board);
        let duration = solve_start.elapsed();

        if solved {
            solved_boards += 1;
            if puzzle.board == puzzle.solution {
                matching_solutions += 1;
            }
        } else {
            debug!("Board {}/{} exhausted the search space", i + 1, board_count);
        }

        total_steps += strategy.steps();
        min_duration = min_duration.min(duration);
        max_duration = max_duration.max(duration);
        solve_duration += duration;
    }

    Ok(BenchmarkResults {
        total_duration: start.elapsed(),
        average_duration: solve_duration / board_count as u32,
        min_duration,
        max_duration,
        total_boards: board_count,
        solved_boards,
        matching_solutions,
        total_steps,
        average_steps: total_steps / board_count as u64,
    })
}
