//! Caller-side game history.
//!
//! The engine itself is stateless. [`GameHistory`] is for callers that
//! replay a game move by move and need the draw by threefold repetition,
//! which no single position can detect.

use crate::movegen::{is_king_attacked, legal_moves, make_move, parse_move, IllegalMoveError};
use crate::rules::{game_result, is_threefold_repetition, DrawReason, GameResult};
use crate::{MoveList, Position};
use chess_core::{FenError, Move};
use thiserror::Error;

/// Error type for game history operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameHistoryError {
    /// The move is not legal in the current position.
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),

    /// A supplied position could not be parsed.
    #[error(transparent)]
    Fen(#[from] FenError),

    /// The game has already ended.
    #[error("game has already ended: {0:?}")]
    GameOver(GameResult),
}

/// The ordered sequence of positions visited in a game.
///
/// Always holds at least the starting position; the last entry is the
/// current position.
#[derive(Debug, Clone)]
pub struct GameHistory {
    positions: Vec<Position>,
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl GameHistory {
    /// Creates a history starting from the standard initial position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a history starting from a custom position.
    pub fn from_position(position: Position) -> Self {
        GameHistory {
            positions: vec![position],
        }
    }

    /// Creates a history starting from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen(fen).map(Self::from_position)
    }

    /// Returns the current position.
    pub fn current(&self) -> &Position {
        // `positions` is never empty
        &self.positions[self.positions.len() - 1]
    }

    /// Returns every position visited so far, oldest first.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Returns the number of half-moves (plies) recorded.
    pub fn ply_count(&self) -> usize {
        self.positions.len() - 1
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> MoveList {
        legal_moves(self.current())
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        let position = self.current();
        is_king_attacked(position, position.side_to_move)
    }

    /// Plays a move given in UCI notation and returns the move played.
    pub fn push_uci(&mut self, uci: &str) -> Result<Move, GameHistoryError> {
        if let Some(result) = self.result() {
            return Err(GameHistoryError::GameOver(result));
        }

        let m = parse_move(self.current(), uci)?;
        let next = make_move(self.current(), m);
        self.positions.push(next);
        Ok(m)
    }

    /// Appends a position supplied by the caller.
    ///
    /// The position is taken as given; it is not checked to be reachable
    /// from the current one.
    pub fn push_fen(&mut self, fen: &str) -> Result<(), GameHistoryError> {
        let position = Position::from_fen(fen)?;
        self.positions.push(position);
        Ok(())
    }

    /// Returns the FEN of every position, oldest first.
    pub fn fen_history(&self) -> Vec<String> {
        self.positions.iter().map(Position::to_fen).collect()
    }

    /// Counts how many times the current position has occurred.
    pub fn repetition_count(&self) -> usize {
        let current = self.current().zobrist_hash();
        self.positions
            .iter()
            .filter(|p| p.zobrist_hash() == current)
            .count()
    }

    /// Returns the game result if the game is over.
    ///
    /// Single-position conditions come first, then threefold repetition.
    pub fn result(&self) -> Option<GameResult> {
        game_result(self.current()).or_else(|| {
            is_threefold_repetition(&self.positions)
                .then_some(GameResult::Draw(DrawReason::ThreefoldRepetition))
        })
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result().is_some()
    }
}
