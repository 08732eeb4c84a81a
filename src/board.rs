use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::types::{Cell, Color, Coordinate};
use crate::{BOARD_SIZE, NUM_CELLS};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Reversi board state represented as an 8x8 grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the opening position:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Cell::White;
        cells[3][4] = Cell::Black;
        cells[4][3] = Cell::Black;
        cells[4][4] = Cell::White;
        Self { cells }
    }

    /// A board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, at: Coordinate) -> Result<Cell, GameError> {
        self.cell_at(at).ok_or(GameError::OutOfRange {
            row: at.row,
            col: at.col,
        })
    }

    pub fn set(&mut self, at: Coordinate, cell: Cell) -> Result<(), GameError> {
        if !at.is_valid() {
            return Err(GameError::OutOfRange {
                row: at.row,
                col: at.col,
            });
        }
        self.cells[at.row as usize][at.col as usize] = cell;
        Ok(())
    }

    /// Returns every opponent token captured by placing `color` at `target`.
    ///
    /// Each of the eight directions is scanned outward. A run of opponent
    /// tokens is committed only when it is closed by a token of `color`; a
    /// run ending at an empty cell or the board edge captures nothing.
    /// The target itself is never part of the result and the board is not
    /// modified.
    pub fn flip_set(&self, target: Coordinate, color: Color) -> Vec<Coordinate> {
        if !target.is_valid() {
            return Vec::new();
        }

        let own = Cell::from(color);
        let opponent = Cell::from(!color);
        let mut flips = Vec::new();

        for (d_row, d_col) in DIRECTIONS {
            let mut next = target.step(d_row, d_col);
            let mut line = Vec::new();

            while let Some(cell) = self.cell_at(next) {
                if cell == opponent {
                    line.push(next);
                } else {
                    if cell == own {
                        flips.append(&mut line);
                    }
                    break;
                }
                next = next.step(d_row, d_col);
            }
        }

        flips
    }

    /// Whether `color` may be placed at `target`.
    ///
    /// Any empty cell is accepted, whether or not the move captures anything.
    pub fn is_legal(&self, target: Coordinate, _color: Color) -> Result<bool, GameError> {
        Ok(self.get(target)? == Cell::Empty)
    }

    /// Returns a copy of this board with `color` placed at `target` and its
    /// flip set applied. An invalid target yields an unchanged copy.
    pub fn with_move(&self, target: Coordinate, color: Color) -> Board {
        let mut next = *self;
        if target.is_valid() {
            next.cells[target.row as usize][target.col as usize] = Cell::from(color);
            for flip in self.flip_set(target, color) {
                next.cells[flip.row as usize][flip.col as usize] = Cell::from(color);
            }
        }
        next
    }

    /// Number of tokens of `color` on the board.
    pub fn count(&self, color: Color) -> u8 {
        let wanted = Cell::from(color);
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == wanted)
            .count() as u8
    }

    /// Returns `(white_count, black_count)`.
    pub fn counts(&self) -> (u8, u8) {
        (self.count(Color::White), self.count(Color::Black))
    }

    /// Returns the number of empty cells.
    pub fn empty_count(&self) -> u8 {
        let (white, black) = self.counts();
        NUM_CELLS as u8 - white - black
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::all().filter(|&at| self.cell_at(at) == Some(Cell::Empty))
    }

    /// Converts board to `[u8; 64]` using [`Cell::code`].
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        let mut board = [0u8; NUM_CELLS];
        for (slot, cell) in board.iter_mut().zip(self.cells.iter().flatten()) {
            *slot = cell.code();
        }
        board
    }

    fn cell_at(&self, at: Coordinate) -> Option<Cell> {
        if at.is_valid() {
            Some(self.cells[at.row as usize][at.col as usize])
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::White => 'W',
                    Cell::Black => 'B',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
