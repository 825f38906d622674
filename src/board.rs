use crate::{Result, SudokuError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest supported edge length: cell values must fit in a `u8`.
const MAX_SIZE: usize = 225;

/// A square grid of cells, `0` meaning empty.
///
/// The edge length must be a perfect square so the grid divides into
/// `box_size` x `box_size` boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    box_size: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Creates an empty board with the given edge length.
    pub fn new(size: usize) -> Result<Self> {
        let box_size = integer_sqrt(size).ok_or(SudokuError::InvalidSize(size))?;
        Ok(Self {
            size,
            box_size,
            cells: vec![0; size * size],
        })
    }

    /// Builds a board from row-major rows, validating shape and cell range.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let mut board = Self::new(rows.len())?;
        for (row, values) in rows.iter().enumerate() {
            if values.len() != board.size {
                return Err(SudokuError::InvalidBoard);
            }
            for (col, &value) in values.iter().enumerate() {
                if value as usize > board.size {
                    return Err(SudokuError::InvalidValue { row, col, value });
                }
                if value != 0 {
                    board.set(row, col, value);
                }
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn box_size(&self) -> usize {
        self.box_size
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    /// Value at `(row, col)`, `0` if the cell is empty.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[self.index(row, col)]
    }

    /// Writes `num` into `(row, col)`. `num` must lie in `1..=size`.
    pub fn set(&mut self, row: usize, col: usize, num: u8) {
        debug_assert!(num >= 1 && num as usize <= self.size);
        let index = self.index(row, col);
        self.cells[index] = num;
    }

    /// Empties `(row, col)`.
    pub fn clear(&mut self, row: usize, col: usize) {
        let index = self.index(row, col);
        self.cells[index] = 0;
    }

    /// True when `num` occurs in neither row `row`, column `col`, nor the
    /// box containing `(row, col)`.
    pub fn is_valid_placement(&self, row: usize, col: usize, num: u8) -> bool {
        debug_assert!(num >= 1 && num as usize <= self.size);

        // Check row
        if (0..self.size).any(|c| self.get(row, c) == num) {
            return false;
        }

        // Check column
        if (0..self.size).any(|r| self.get(r, col) == num) {
            return false;
        }

        // Check box
        let box_row = row - row % self.box_size;
        let box_col = col - col % self.box_size;
        for r in box_row..box_row + self.box_size {
            for c in box_col..box_col + self.box_size {
                if self.get(r, c) == num {
                    return false;
                }
            }
        }

        true
    }

    /// First empty cell in row-major order. This scan order is the
    /// search-order tie-break for the whole solve.
    pub fn first_empty_cell(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&value| value == 0)
            .map(|index| (index / self.size, index % self.size))
    }

    pub fn is_complete(&self) -> bool {
        self.first_empty_cell().is_none()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 0).count()
    }

    /// Full solved-state check: complete and every row, column and box
    /// holds each of `1..=size` exactly once.
    pub fn is_solved(&self) -> bool {
        for row in 0..self.size {
            let mut seen = vec![false; self.size + 1];
            for col in 0..self.size {
                let value = self.get(row, col) as usize;
                if value == 0 || seen[value] {
                    return false;
                }
                seen[value] = true;
            }
        }

        for col in 0..self.size {
            let mut seen = vec![false; self.size + 1];
            for row in 0..self.size {
                let value = self.get(row, col) as usize;
                if value == 0 || seen[value] {
                    return false;
                }
                seen[value] = true;
            }
        }

        for box_row in (0..self.size).step_by(self.box_size) {
            for box_col in (0..self.size).step_by(self.box_size) {
                let mut seen = vec![false; self.size + 1];
                for row in box_row..box_row + self.box_size {
                    for col in box_col..box_col + self.box_size {
                        let value = self.get(row, col) as usize;
                        if value == 0 || seen[value] {
                            return false;
                        }
                        seen[value] = true;
                    }
                }
            }
        }

        true
    }

    /// Printed width of a single cell value.
    pub(crate) fn digit_width(&self) -> usize {
        if self.size > 9 {
            2
        } else {
            1
        }
    }

    /// Horizontal rule between box bands, e.g. `  -------+-------+-------`.
    pub(crate) fn separator_line(&self) -> String {
        let segment = "-".repeat(self.box_size * (self.digit_width() + 1) + 1);
        format!("  {}", vec![segment; self.box_size].join("+"))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.digit_width();
        let line = self.separator_line();
        for row in 0..self.size {
            if row % self.box_size == 0 {
                writeln!(f, "{line}")?;
            }
            write!(f, "  ")?;
            for col in 0..self.size {
                if col % self.box_size == 0 {
                    write!(f, "| ")?;
                }
                match self.get(row, col) {
                    0 => write!(f, "{:>width$} ", ".")?,
                    num => write!(f, "{num:>width$} ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{line}")
    }
}

fn integer_sqrt(size: usize) -> Option<usize> {
    if size == 0 || size > MAX_SIZE {
        return None;
    }
    let root = (size as f64).sqrt().round() as usize;
    (root * root == size).then_some(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_rows() -> Vec<Vec<u8>> {
        vec![
            vec![5, 3, 4, 6, 7, 8, 9, 1, 2],
            vec![6, 7, 2, 1, 9, 5, 3, 4, 8],
            vec![1, 9, 8, 3, 4, 2, 5, 6, 7],
            vec![8, 5, 9, 7, 6, 1, 4, 2, 3],
            vec![4, 2, 6, 8, 5, 3, 7, 9, 1],
            vec![7, 1, 3, 9, 2, 4, 8, 5, 6],
            vec![9, 6, 1, 5, 3, 7, 2, 8, 4],
            vec![2, 8, 7, 4, 1, 9, 6, 3, 5],
            vec![3, 4, 5, 2, 8, 6, 1, 7, 9],
        ]
    }

    #[test]
    fn test_new_accepts_perfect_squares() {
        for size in [1, 4, 9, 16, 25] {
            let board = Board::new(size).unwrap();
            assert_eq!(board.size(), size);
            assert_eq!(board.box_size() * board.box_size(), size);
            assert_eq!(board.count_empty(), size * size);
        }
    }

    #[test]
    fn test_new_rejects_invalid_sizes() {
        for size in [0, 2, 3, 7, 8, 12, 15, 226, 256] {
            assert!(matches!(
                Board::new(size),
                Err(SudokuError::InvalidSize(reported)) if reported == size
            ));
        }
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[4].truncate(8);
        assert!(matches!(Board::from_rows(rows), Err(SudokuError::InvalidBoard)));
    }

    #[test]
    fn test_from_rows_rejects_out_of_range_values() {
        let mut rows = vec![vec![0u8; 4]; 4];
        rows[2][3] = 5;
        assert!(matches!(
            Board::from_rows(rows),
            Err(SudokuError::InvalidValue {
                row: 2,
                col: 3,
                value: 5
            })
        ));
    }

    #[test]
    fn test_valid_placement_checks_row_column_and_box() {
        let mut board = Board::new(9).unwrap();
        board.set(0, 0, 5);

        // Row conflict
        assert!(!board.is_valid_placement(0, 8, 5));
        // Column conflict
        assert!(!board.is_valid_placement(8, 0, 5));
        // Box conflict
        assert!(!board.is_valid_placement(2, 2, 5));
        // Unrelated cell
        assert!(board.is_valid_placement(3, 3, 5));
        // Different digit in the same box
        assert!(board.is_valid_placement(2, 2, 6));
    }

    #[test]
    fn test_first_empty_cell_scans_row_major() {
        let mut board = Board::new(4).unwrap();
        assert_eq!(board.first_empty_cell(), Some((0, 0)));

        board.set(0, 0, 1);
        board.set(0, 1, 2);
        assert_eq!(board.first_empty_cell(), Some((0, 2)));

        board.set(0, 2, 3);
        board.set(0, 3, 4);
        assert_eq!(board.first_empty_cell(), Some((1, 0)));
    }

    #[test]
    fn test_is_solved_accepts_known_solution() {
        let board = Board::from_rows(solved_rows()).unwrap();
        assert!(board.is_complete());
        assert!(board.is_solved());
    }

    #[test]
    fn test_is_solved_rejects_duplicates_and_gaps() {
        let mut board = Board::from_rows(solved_rows()).unwrap();
        board.clear(4, 4);
        assert!(!board.is_solved());

        // Same digit twice in row 4
        let mut rows = solved_rows();
        rows[4][4] = rows[4][3];
        assert!(!Board::from_rows(rows).unwrap().is_solved());
    }

    #[test]
    fn test_display_marks_empty_cells() {
        let mut board = Board::new(4).unwrap();
        board.set(0, 0, 1);
        board.set(3, 3, 4);

        let rendered = board.to_string();
        let expected = "\
  -----+-----
  | 1 . | . . |
  | . . | . . |
  -----+-----
  | . . | . . |
  | . . | . 4 |
  -----+-----
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_serde_round_trip() {
        let board = Board::from_rows(solved_rows()).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, restored);
    }
}
