use tracing::{debug, info, warn};
use web_time::Instant;

use crate::ai::{GreedySelector, MoveSelector};
use crate::board::Board;
use crate::config::SessionConfig;
use crate::error::{GameError, SnapshotError};
use crate::snapshot::{Snapshot, SnapshotField};
use crate::types::{Cell, Color, Coordinate, GameResult, GameState, Mode, Phase};
use crate::NUM_CELLS;

/// Color played by the computer in player-vs-computer games.
pub const COMPUTER_COLOR: Color = Color::Black;

/// Receives a synchronous notification after every successful state change.
pub trait Observer {
    fn state_changed(&self, game: &GameInstance);
}

impl<F> Observer for F
where
    F: Fn(&GameInstance),
{
    fn state_changed(&self, game: &GameInstance) {
        self(game)
    }
}

/// One Reversi session: the authoritative board plus turn, mode and scores.
///
/// A fresh instance is locked until [`GameInstance::new_game`] is called.
/// Mutating calls are not meant to run concurrently; an embedding that shares
/// a session must serialize them.
pub struct GameInstance {
    board: Board,
    started: bool,
    locked: bool,
    turn: Color,
    mode: Mode,
    white_score: u8,
    black_score: u8,
    config: SessionConfig,
    selector: Box<dyn MoveSelector>,
    observers: Vec<Box<dyn Observer>>,
}

impl GameInstance {
    pub fn new(config: SessionConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::empty(),
            started: false,
            locked: true,
            turn: Color::White,
            mode: config.mode,
            white_score: 0,
            black_score: 0,
            config,
            selector,
            observers: Vec::new(),
        }
    }

    pub fn new_with_default_selector(config: SessionConfig) -> Self {
        Self::new(config, Box::new(GreedySelector))
    }

    /// Registers an observer; it is called after every successful mutation.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Starts a game in the configured mode.
    pub fn start(&mut self) {
        self.new_game(self.config.mode);
    }

    /// Resets the board to the opening position and unlocks it. White moves first.
    pub fn new_game(&mut self, mode: Mode) {
        self.board = Board::new();
        self.started = true;
        self.locked = false;
        self.turn = Color::White;
        self.mode = mode;
        self.white_score = 2;
        self.black_score = 2;

        info!(?mode, "new game started");
        self.notify();
    }

    /// Places a token of the side to move at `(row, col)`.
    ///
    /// Returns `Ok(false)` without touching state when the board is locked or
    /// the cell is occupied. Coordinates outside the board are an error.
    pub fn place_token(&mut self, row: i32, col: i32) -> Result<bool, GameError> {
        let target = Coordinate::new(row, col);
        if self.locked || self.board.get(target)? != Cell::Empty {
            debug!(row, col, locked = self.locked, "placement rejected");
            return Ok(false);
        }

        let color = self.turn;
        self.board.set(target, Cell::from(color))?;
        let flips = self.board.flip_set(target, color);
        for &flip in &flips {
            self.board.set(flip, Cell::from(color))?;
        }

        let (white, black) = self.board.counts();
        self.white_score = white;
        self.black_score = black;
        debug!(row, col, ?color, flipped = flips.len(), white, black, "token placed");

        if self.game_over() {
            self.locked = true;
            info!(white, black, "game over");
        }

        self.turn = !color;
        self.notify();
        Ok(true)
    }

    /// Lets the selector pick a cell for Black and plays it through
    /// [`GameInstance::place_token`].
    pub fn computer_move(&mut self) -> Result<bool, GameError> {
        if self.mode != Mode::PlayerVsComputer {
            return Err(GameError::NotComputerGame);
        }

        let started_at = Instant::now();
        let target = self
            .selector
            .select_move(&self.board, COMPUTER_COLOR)
            .ok_or(GameError::NoEmptyCell)?;
        debug!(
            row = target.row,
            col = target.col,
            elapsed_us = started_at.elapsed().as_micros() as u64,
            "computer selected move"
        );

        self.place_token(target.row, target.col)
    }

    /// A human click: plays `(row, col)` and, in player-vs-computer games,
    /// answers with the computer's move unless the game just ended.
    ///
    /// The result reports the human move only. Once it is committed, a failed
    /// computer reply is logged and leaves Black to move.
    pub fn play(&mut self, row: i32, col: i32) -> Result<bool, GameError> {
        if !self.place_token(row, col)? {
            return Ok(false);
        }

        if self.mode == Mode::PlayerVsComputer && self.config.computer_replies && !self.locked {
            if let Err(err) = self.computer_move() {
                warn!(%err, "computer reply failed");
            }
        }
        Ok(true)
    }

    pub fn cell(&self, row: i32, col: i32) -> Result<Cell, GameError> {
        self.board.get(Coordinate::new(row, col))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn white_score(&self) -> u8 {
        self.white_score
    }

    pub fn black_score(&self) -> u8 {
        self.black_score
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// True once one color is wiped out or the board is full.
    pub fn game_over(&self) -> bool {
        self.white_score == 0
            || self.black_score == 0
            || self.white_score as usize + self.black_score as usize == NUM_CELLS
    }

    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::NotStarted
        } else if self.locked {
            Phase::Ended
        } else {
            Phase::InProgress
        }
    }

    /// Final scores and winner once the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        if self.phase() != Phase::Ended {
            return None;
        }

        let winner = if self.white_score > self.black_score {
            Some(Color::White)
        } else if self.black_score > self.white_score {
            Some(Color::Black)
        } else {
            None
        };
        Some(GameResult {
            winner,
            white_score: self.white_score,
            black_score: self.black_score,
        })
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            started: self.started,
            locked: self.locked,
            turn: self.turn,
            mode: self.mode,
            phase: self.phase(),
            white_score: self.white_score,
            black_score: self.black_score,
            is_game_over: self.game_over(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            started: self.started,
            locked: self.locked,
            whites_turn: self.turn == Color::White,
            player_vs_player: self.mode == Mode::PlayerVsPlayer,
            white_score: self.white_score,
            black_score: self.black_score,
        }
    }

    /// Replaces the whole session state with `snapshot`.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.started = snapshot.started;
        self.locked = snapshot.locked;
        self.turn = if snapshot.whites_turn {
            Color::White
        } else {
            Color::Black
        };
        self.mode = if snapshot.player_vs_player {
            Mode::PlayerVsPlayer
        } else {
            Mode::PlayerVsComputer
        };
        self.white_score = snapshot.white_score;
        self.black_score = snapshot.black_score;

        info!(phase = ?self.phase(), "state restored from snapshot");
        self.notify();
    }

    pub fn restore_fields(&mut self, fields: &[SnapshotField]) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::from_fields(fields)?;
        self.restore(snapshot);
        Ok(())
    }

    pub fn restore_bytes(&mut self, data: &[u8]) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::from_bytes(data)?;
        self.restore(snapshot);
        Ok(())
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer.state_changed(self);
        }
    }
}

impl Default for GameInstance {
    fn default() -> Self {
        Self::new_with_default_selector(SessionConfig::default())
    }
}
