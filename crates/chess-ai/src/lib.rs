//! Move selection for the chess engine.
//!
//! This crate provides:
//! - [`evaluate`] - material plus piece-square evaluation
//! - [`select_best_move`] - fixed-depth negamax with alpha-beta pruning
//! - [`Difficulty`] and [`DepthTable`] - the difficulty-to-depth policy
//! - [`AiConfig`] - TOML configuration for that policy
//! - [`MoveRequest`] / [`MoveResponse`] - the request/response contract
//!
//! # Example
//!
//! ```
//! use chess_ai::{best_move, AiConfig, Difficulty, MoveRequest};
//!
//! let request = MoveRequest::new(
//!     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
//!     Some(Difficulty::Easy),
//! );
//! let mv = best_move(&request, &AiConfig::default()).unwrap();
//! assert_eq!(mv.len(), 4);
//! ```

mod config;
mod difficulty;
mod error;
pub mod evaluation;
pub mod protocol;
pub mod search;

pub use config::AiConfig;
pub use difficulty::{DepthTable, Difficulty};
pub use error::{ConfigError, EngineError, SearchError};
pub use evaluation::{evaluate, evaluate_relative};
pub use protocol::{
    apply_move, best_move, best_move_for_position, handle_request, MoveRequest, MoveResponse,
};
pub use search::{select_best_move, SearchResult};
