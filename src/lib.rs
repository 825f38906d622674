use thiserror::Error;

pub mod benchmark;
pub mod board;
pub mod display;
pub mod generator;
pub mod session;
pub mod solver;

pub use board::Board;
pub use display::Renderer;
pub use generator::{Generator, Puzzle};
pub use session::{Session, SessionBuilder};
pub use solver::{Backtracking, StepEvent, StepKind, Strategy};

#[derive(Debug, Error)]
pub enum SudokuError {
    #[error("Invalid board state")]
    InvalidBoard,
    #[error("Invalid board size {0}: must be a positive perfect square no larger than 225")]
    InvalidSize(usize),
    #[error("Invalid difficulty {0}: must be within [0, 1]")]
    InvalidDifficulty(f64),
    #[error("Invalid value at position ({row}, {col}): {value}")]
    InvalidValue {
        row: usize,
        col: usize,
        value: u8,
    },
    #[error("No solver strategy provided")]
    MissingStrategy,
    #[error("No seeded grid could be completed into a full solution")]
    GenerationFailed,
    #[error("Benchmark error: {0}")]
    BenchmarkError(String),
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SudokuError>;
