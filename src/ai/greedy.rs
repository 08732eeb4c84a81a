use crate::ai::MoveSelector;
use crate::board::Board;
use crate::types::{Color, Coordinate};

/// One-ply greedy selector.
///
/// Every empty cell is scored by the number of `color` tokens on the board
/// after placing there, each candidate evaluated against the current board
/// independently. The highest score wins; among equal scores the largest
/// row-major coordinate wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySelector;

impl GreedySelector {
    /// Token count for `color` after a hypothetical placement at `at`.
    pub fn points(board: &Board, at: Coordinate, color: Color) -> u8 {
        board.with_move(at, color).count(color)
    }
}

impl MoveSelector for GreedySelector {
    fn select_move(&self, board: &Board, color: Color) -> Option<Coordinate> {
        let mut best: Option<(u8, Coordinate)> = None;

        for at in board.empty_cells() {
            let points = Self::points(board, at, color);
            let better = match best {
                None => true,
                Some((best_points, best_at)) => is_better_move(points, at, best_points, best_at),
            };
            if better {
                best = Some((points, at));
            }
        }

        best.map(|(_, at)| at)
    }
}

fn is_better_move(points: u8, at: Coordinate, best_points: u8, best_at: Coordinate) -> bool {
    points > best_points || (points == best_points && at > best_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn at(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn points_include_target_and_flips() {
        let board = Board::new();

        assert_eq!(GreedySelector::points(&board, at(2, 3), Color::Black), 4);
        assert_eq!(GreedySelector::points(&board, at(0, 0), Color::Black), 3);
    }

    #[test]
    fn opening_tie_breaks_to_largest_coordinate() {
        let board = Board::new();

        // (2,3), (3,2), (4,5) and (5,4) all reach four black tokens.
        assert_eq!(GreedySelector.select_move(&board, Color::Black), Some(at(5, 4)));
        assert_eq!(GreedySelector.select_move(&board, Color::White), Some(at(5, 3)));
    }

    #[test]
    fn higher_score_beats_larger_coordinate() {
        let mut board = Board::empty();
        // Black at (0,0) captures two whites; no other cell captures anything.
        board.set(at(0, 1), Cell::White).unwrap();
        board.set(at(0, 2), Cell::White).unwrap();
        board.set(at(0, 3), Cell::Black).unwrap();

        assert_eq!(GreedySelector.select_move(&board, Color::Black), Some(at(0, 0)));
    }

    #[test]
    fn candidates_do_not_see_each_other() {
        let board = Board::new();
        let before = board;

        let first = GreedySelector.select_move(&board, Color::Black);
        let second = GreedySelector.select_move(&board, Color::Black);

        assert_eq!(first, second);
        assert_eq!(board, before);
    }

    #[test]
    fn full_board_has_no_candidate() {
        let board = Board::from_cells([[Cell::White; 8]; 8]);

        assert_eq!(GreedySelector.select_move(&board, Color::Black), None);
    }
}
