use crate::board::Board;
use tracing::trace;

/// Whether a step reports a digit going onto the board or coming back off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Placed,
    Undone,
}

/// Snapshot handed to the step callback after every placement and every
/// undone placement. `steps` is the running placement count; undoing a
/// digit re-notifies without incrementing it.
#[derive(Debug)]
pub struct StepEvent<'a> {
    pub board: &'a Board,
    pub row: usize,
    pub col: usize,
    pub num: u8,
    pub kind: StepKind,
    pub steps: u64,
}

/// A solving strategy working over a shared mutable board.
///
/// `attempt` runs one full pass and reports whether it completed the board.
/// `false` means the search space is exhausted, not that an error occurred.
/// Cells that were empty when the pass began are left empty again after a
/// failed pass.
pub trait Strategy {
    fn attempt(&mut self, board: &mut Board, on_step: &mut dyn FnMut(StepEvent<'_>)) -> bool;

    /// Placements made by the most recent `attempt` pass.
    fn steps(&self) -> u64;

    /// `attempt` without an observer.
    fn attempt_silent(&mut self, board: &mut Board) -> bool {
        self.attempt(board, &mut |_| {})
    }
}

/// Exhaustive backtracking over empty cells in row-major order, trying
/// candidate digits in ascending order. The first completion found wins.
#[derive(Debug, Default)]
pub struct Backtracking {
    steps: u64,
}

impl Backtracking {
    pub fn new() -> Self {
        Self::default()
    }

    fn backtrack(
        &mut self,
        board: &mut Board,
        row: usize,
        col: usize,
        on_step: &mut dyn FnMut(StepEvent<'_>),
    ) -> bool {
        let size = board.size();
        if row == size {
            return true;
        }
        let (next_row, next_col) = if col + 1 == size {
            (row + 1, 0)
        } else {
            (row, col + 1)
        };

        if board.get(row, col) != 0 {
            return self.backtrack(board, next_row, next_col, on_step);
        }

        for num in 1..=size as u8 {
            if !board.is_valid_placement(row, col, num) {
                continue;
            }

            self.steps += 1;
            trace!("Placing {} at ({}, {}) [step {}]", num, row, col, self.steps);
            board.set(row, col, num);
            on_step(StepEvent {
                board,
                row,
                col,
                num,
                kind: StepKind::Placed,
                steps: self.steps,
            });

            if self.backtrack(board, next_row, next_col, on_step) {
                return true;
            }

            trace!("Removing {} from ({}, {})", num, row, col);
            board.clear(row, col);
            on_step(StepEvent {
                board,
                row,
                col,
                num,
                kind: StepKind::Undone,
                steps: self.steps,
            });
        }

        false
    }
}

impl Strategy for Backtracking {
    fn attempt(&mut self, board: &mut Board, on_step: &mut dyn FnMut(StepEvent<'_>)) -> bool {
        self.steps = 0;
        self.backtrack(board, 0, 0, on_step)
    }

    fn steps(&self) -> u64 {
        self.steps
    }
}
