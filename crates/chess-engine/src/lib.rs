//! Chess rules on a 64-square mailbox board.
//!
//! This crate provides:
//! - [`Position`] - Full game state including piece placement, castling rights, etc.
//! - Legal move generation, move application and perft
//! - Game-end detection: checkmate, stalemate and the draw rules
//! - [`GameHistory`] - Caller-side position history for repetition detection
//!
//! # Architecture
//!
//! Positions are plain values. [`make_move`] returns a new position and
//! leaves its input untouched, so there is no undo. Legal moves are the
//! pseudo-legal moves whose resulting position leaves the mover's king
//! unattacked.
//!
//! # Example
//!
//! ```
//! use chess_engine::{legal_moves, make_move, parse_move, GameHistory, Position};
//!
//! let position = Position::startpos();
//! println!("Legal moves from starting position: {}", legal_moves(&position).len());
//!
//! let e4 = parse_move(&position, "e2e4").unwrap();
//! let after = make_move(&position, e4);
//! assert_eq!(after.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
//!
//! let mut game = GameHistory::new();
//! game.push_uci("e2e4").unwrap();
//! game.push_uci("e7e5").unwrap();
//! assert!(!game.is_game_over());
//! ```

mod history;
pub mod movegen;
mod position;
pub mod rules;
mod zobrist;

pub use history::{GameHistory, GameHistoryError};
pub use movegen::{
    is_king_attacked, is_square_attacked, legal_moves, make_move, parse_move,
    pseudo_legal_moves, IllegalMoveError, MoveList,
};
pub use position::{CastlingRights, Position};
pub use rules::{DrawReason, GameResult};
