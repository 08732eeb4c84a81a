pub mod greedy;

use crate::board::Board;
use crate::types::{Color, Coordinate};

pub use greedy::GreedySelector;

/// Chooses a cell for the automated side.
///
/// Selectors only read the board; the chosen coordinate is applied by the
/// session through the same placement path as a human move.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, color: Color) -> Option<Coordinate>;
}
