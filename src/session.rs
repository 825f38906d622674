use crate::board::Board;
use crate::generator::{Generator, DEFAULT_DIFFICULTY};
use crate::solver::{StepEvent, Strategy};
use crate::{Result, SudokuError};
use tracing::debug;

/// Default board edge length.
pub const DEFAULT_SIZE: usize = 9;

/// One generated puzzle plus the strategy that will solve it.
///
/// The session owns the working board. Solving mutates it in place while
/// the solution snapshot taken at generation time stays untouched, so the
/// two can be compared afterwards.
pub struct Session {
    board: Board,
    solution: Board,
    strategy: Box<dyn Strategy>,
    steps: u64,
}

/// Configures and builds a [`Session`].
///
/// A strategy must be supplied; everything else has defaults. All
/// configuration errors surface from [`build`](SessionBuilder::build),
/// before any solving is attempted.
pub struct SessionBuilder {
    size: usize,
    difficulty: f64,
    seed: Option<u64>,
    strategy: Option<Box<dyn Strategy>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            size: DEFAULT_SIZE,
            difficulty: DEFAULT_DIFFICULTY,
            seed: None,
            strategy: None,
        }
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn strategy(mut self, strategy: Box<dyn Strategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Validates the configuration and generates the puzzle.
    pub fn build(self) -> Result<Session> {
        let mut strategy = self.strategy.ok_or(SudokuError::MissingStrategy)?;
        let mut generator = match self.seed {
            Some(seed) => Generator::with_seed(self.size, self.difficulty, seed)?,
            None => Generator::new(self.size, self.difficulty)?,
        };
        let puzzle = generator.generate(strategy.as_mut())?;

        Ok(Session {
            board: puzzle.board,
            solution: puzzle.solution,
            strategy,
            steps: 0,
        })
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// The working board, reflecting any solving done so far.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The solved grid captured at generation time.
    pub fn solution(&self) -> &Board {
        &self.solution
    }

    /// Placements made by the most recent solve pass.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Runs one full strategy pass over the puzzle. `false` means the
    /// search space was exhausted without completing the board.
    pub fn solve(&mut self) -> bool {
        self.solve_with(&mut |_| {})
    }

    /// Like [`solve`](Session::solve), reporting every placement and undo
    /// to `on_step` as it happens.
    pub fn solve_with(&mut self, on_step: &mut dyn FnMut(StepEvent<'_>)) -> bool {
        let solved = self.strategy.attempt(&mut self.board, on_step);
        self.steps = self.strategy.steps();
        debug!("Solve pass finished: solved={} steps={}", solved, self.steps);
        solved
    }

    /// Whether the working board matches the snapshot taken at generation
    /// time. A completed board that differs means the puzzle admitted more
    /// than one solution.
    pub fn matches_solution(&self) -> bool {
        self.board == self.solution
    }
}
