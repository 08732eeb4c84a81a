use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BOARD_SIZE;
use crate::error::GameError;

/// A (row, column) pair on the board.
///
/// Coordinates are signed so that a directional scan may step off the board;
/// validity is checked with [`Coordinate::is_valid`] at every board access.
/// The derived ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn is_valid(self) -> bool {
        (0..BOARD_SIZE as i32).contains(&self.row) && (0..BOARD_SIZE as i32).contains(&self.col)
    }

    /// Row-major index in `0..64`, or `None` when off the board.
    pub fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some(self.row as usize * BOARD_SIZE + self.col as usize)
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::new((index / BOARD_SIZE) as i32, (index % BOARD_SIZE) as i32)
    }

    /// The neighbouring coordinate one step along `(d_row, d_col)`.
    pub fn step(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// All 64 valid coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Self::from_index)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    White,
    Black,
}

impl Cell {
    /// Numeric code used by the read model and the save format:
    /// 0=empty, 1=white, 2=black.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::White => 1,
            Cell::Black => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::White),
            2 => Some(Cell::Black),
            _ => None,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Cell::White,
            Color::Black => Cell::Black,
        }
    }
}

/// Token color. White always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl std::ops::Not for Color {
    type Output = Self;

    /// Gets the opponent.
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Session mode. In player-vs-computer games the computer plays Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    PlayerVsPlayer,
    #[default]
    PlayerVsComputer,
}

impl FromStr for Mode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvp" | "player_vs_player" => Ok(Mode::PlayerVsPlayer),
            "pvc" | "player_vs_computer" => Ok(Mode::PlayerVsComputer),
            _ => Err(GameError::InvalidMode(s.to_string())),
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    Ended,
}

/// Final result after game over. `winner` is `None` on a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Option<Color>,
    pub white_score: u8,
    pub black_score: u8,
}

/// Read model handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cell codes, see [`Cell::code`].
    pub board: Vec<u8>,
    pub started: bool,
    pub locked: bool,
    pub turn: Color,
    pub mode: Mode,
    pub phase: Phase,
    pub white_score: u8,
    pub black_score: u8,
    pub is_game_over: bool,
}
