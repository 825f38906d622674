use crate::board::Board;
use crate::solver::{StepEvent, StepKind};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

/// Pause after a digit is placed.
pub const PLACE_DELAY: Duration = Duration::from_millis(100);
/// Pause after a placement is taken back.
pub const UNDO_DELAY: Duration = Duration::from_millis(50);

/// Repaints the terminal with a full frame on every solver step.
///
/// Given digits render white, solver-placed digits green. Pacing pauses
/// only stretch time between frames; zero delays disable them without
/// touching the solve itself.
pub struct Renderer<W: Write = Stdout> {
    out: W,
    size: usize,
    givens: Vec<bool>,
    place_delay: Duration,
    undo_delay: Duration,
}

impl Renderer<Stdout> {
    /// Renderer for `puzzle` on stdout with the default pacing.
    pub fn new(puzzle: &Board) -> Self {
        Self::with_delays(puzzle, PLACE_DELAY, UNDO_DELAY)
    }

    pub fn with_delays(puzzle: &Board, place_delay: Duration, undo_delay: Duration) -> Self {
        Self::with_writer(io::stdout(), puzzle, place_delay, undo_delay)
    }
}

impl<W: Write> Renderer<W> {
    /// The given-cell mask is captured from `puzzle` here, so the renderer
    /// must be created before solving starts filling cells in.
    pub fn with_writer(
        out: W,
        puzzle: &Board,
        place_delay: Duration,
        undo_delay: Duration,
    ) -> Self {
        let size = puzzle.size();
        let mut givens = vec![false; size * size];
        for row in 0..size {
            for col in 0..size {
                givens[row * size + col] = puzzle.get(row, col) != 0;
            }
        }

        Self {
            out,
            size,
            givens,
            place_delay,
            undo_delay,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Clears the screen and paints one full frame: banner plus grid.
    pub fn frame(&mut self, board: &Board, steps: u64) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, 0),
            Clear(ClearType::All),
            Clear(ClearType::Purge)
        )?;
        queue!(
            self.out,
            Print(format!("\n  SUDOKU SOLVER v1.0  |  Steps: {steps}\n\n"))
        )?;

        let line = board.separator_line();
        for row in 0..board.size() {
            if row % board.box_size() == 0 {
                queue!(self.out, Print(&line), Print("\n"))?;
            }
            self.paint_row(board, row)?;
        }
        queue!(self.out, Print(&line), Print("\n\n"))?;

        self.out.flush()
    }

    fn paint_row(&mut self, board: &Board, row: usize) -> io::Result<()> {
        let width = board.digit_width();
        queue!(self.out, Print("  "))?;
        for col in 0..board.size() {
            if col % board.box_size() == 0 {
                queue!(self.out, Print("| "))?;
            }
            match board.get(row, col) {
                0 => queue!(self.out, Print(format!("{:>width$} ", ".")))?,
                num => {
                    let color = if self.givens[row * self.size + col] {
                        Color::White
                    } else {
                        Color::Green
                    };
                    queue!(
                        self.out,
                        SetForegroundColor(color),
                        Print(format!("{num:>width$} ")),
                        ResetColor
                    )?;
                }
            }
        }
        queue!(self.out, Print("|\n"))
    }

    /// Step observer: repaint, then pause to pace the animation.
    pub fn on_step(&mut self, event: &StepEvent<'_>) -> io::Result<()> {
        self.frame(event.board, event.steps)?;

        let delay = match event.kind {
            StepKind::Placed => self.place_delay,
            StepKind::Undone => self.undo_delay,
        };
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_renderer(puzzle: &Board) -> Renderer<Vec<u8>> {
        Renderer::with_writer(Vec::new(), puzzle, Duration::ZERO, Duration::ZERO)
    }

    #[test]
    fn test_frame_writes_banner_and_grid() {
        let mut board = Board::new(4).unwrap();
        board.set(0, 0, 1);

        let mut renderer = quiet_renderer(&board);
        renderer.frame(&board, 3).unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("SUDOKU SOLVER v1.0  |  Steps: 3"));
        // Uncolored stretch of row 0 after the colored digit
        assert!(output.contains(". | . . |"));
        // Box separator for a 4x4 grid
        assert!(output.contains("-----+-----"));
        // Terminal control sequences are present
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_given_mask_tracks_initial_cells_only() {
        let mut board = Board::new(4).unwrap();
        board.set(1, 2, 3);

        let renderer = quiet_renderer(&board);
        assert!(renderer.givens[6]);
        assert!(!renderer.givens[0]);
        assert_eq!(renderer.givens.iter().filter(|&&given| given).count(), 1);
    }

    #[test]
    fn test_on_step_repaints_current_board() {
        let mut board = Board::new(4).unwrap();
        let mut renderer = quiet_renderer(&board);

        board.set(0, 0, 2);
        let event = StepEvent {
            board: &board,
            row: 0,
            col: 0,
            num: 2,
            kind: StepKind::Placed,
            steps: 1,
        };
        renderer.on_step(&event).unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("Steps: 1"));
        assert!(output.contains("2 "));
    }
}
