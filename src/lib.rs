use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod snapshot;
pub mod types;
pub mod wasm;

#[cfg(test)]
mod test_support;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 8;

/// Number of cells on the board.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

pub use ai::{GreedySelector, MoveSelector};
pub use board::Board;
pub use config::SessionConfig;
pub use error::{ConfigError, GameError, SnapshotError};
pub use game::{GameInstance, Observer};
pub use snapshot::{Snapshot, SnapshotField};
pub use types::{Cell, Color, Coordinate, GameResult, GameState, Mode, Phase};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
