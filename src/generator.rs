use crate::board::Board;
use crate::solver::Strategy;
use crate::{Result, SudokuError};
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fraction of cells removed from the solved grid by default.
pub const DEFAULT_DIFFICULTY: f64 = 0.7;

/// Upper bound on diagonal seedings tried per generated puzzle.
const MAX_ATTEMPTS: usize = 100;

/// A puzzle together with the solved grid it was carved from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub board: Board,
    pub solution: Board,
}

pub struct Generator {
    size: usize,
    difficulty: f64,
    rng: SmallRng,
}

impl Generator {
    /// Entropy-seeded generator. `size` and `difficulty` are validated
    /// here, before any generation work happens.
    pub fn new(size: usize, difficulty: f64) -> Result<Self> {
        Self::from_rng(size, difficulty, SmallRng::from_entropy())
    }

    /// Reproducible generator: the same seed yields the same puzzles.
    pub fn with_seed(size: usize, difficulty: f64, seed: u64) -> Result<Self> {
        Self::from_rng(size, difficulty, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(size: usize, difficulty: f64, rng: SmallRng) -> Result<Self> {
        Board::new(size)?;
        if !(0.0..=1.0).contains(&difficulty) {
            return Err(SudokuError::InvalidDifficulty(difficulty));
        }
        Ok(Self {
            size,
            difficulty,
            rng,
        })
    }

    /// Builds a puzzle in three steps: seed the diagonal boxes with random
    /// permutations, complete the grid with `strategy`, then blank out
    /// `floor(size^2 * difficulty)` randomly chosen cells.
    ///
    /// Removal never re-checks uniqueness, so higher difficulties can
    /// produce puzzles admitting more than one valid solution.
    pub fn generate(&mut self, strategy: &mut dyn Strategy) -> Result<Puzzle> {
        let mut board = self.fill_grid(strategy)?;
        let solution = board.clone();

        let removed = self.remove_digits(&mut board);
        debug!(
            "Generated {}x{} puzzle with {} cells removed",
            self.size, self.size, removed
        );

        Ok(Puzzle { board, solution })
    }

    /// Seeds the diagonal boxes and completes the rest with `strategy`.
    ///
    /// Independent diagonal permutations are not always jointly
    /// completable on small grids, so a failed completion pass redraws
    /// fresh permutations, up to `MAX_ATTEMPTS` seedings.
    fn fill_grid(&mut self, strategy: &mut dyn Strategy) -> Result<Board> {
        for _ in 0..MAX_ATTEMPTS {
            let mut board = Board::new(self.size)?;
            self.fill_diagonal_boxes(&mut board);
            if strategy.attempt_silent(&mut board) {
                return Ok(board);
            }
        }
        Err(SudokuError::GenerationFailed)
    }

    /// Boxes on the main diagonal share no row, column or box with one
    /// another, so each can take an independent permutation.
    fn fill_diagonal_boxes(&mut self, board: &mut Board) {
        for start in (0..self.size).step_by(board.box_size()) {
            self.fill_box(board, start, start);
        }
    }

    fn fill_box(&mut self, board: &mut Board, start_row: usize, start_col: usize) {
        let box_size = board.box_size();
        let mut numbers: Vec<u8> = (1..=self.size as u8).collect();
        numbers.shuffle(&mut self.rng);

        let mut index = 0;
        for row in start_row..start_row + box_size {
            for col in start_col..start_col + box_size {
                board.set(row, col, numbers[index]);
                index += 1;
            }
        }
    }

    fn remove_digits(&mut self, board: &mut Board) -> usize {
        let total = self.size * self.size;
        let count = (((total as f64) * self.difficulty) as usize).min(total);

        let mut positions: Vec<(usize, usize)> = (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| (row, col)))
            .collect();
        positions.shuffle(&mut self.rng);

        for &(row, col) in positions.iter().take(count) {
            board.clear(row, col);
        }
        count
    }
}
