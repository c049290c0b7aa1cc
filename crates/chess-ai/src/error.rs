//! Error types for move selection and configuration.

use crate::Difficulty;
use chess_core::FenError;
use thiserror::Error;

/// Errors raised by the search itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The root position has no legal moves. Callers are expected to check
    /// for game over before asking for a move.
    #[error("no legal moves in the root position")]
    NoLegalMoves,
}

/// Errors raised at the request boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The request carried no FEN string.
    #[error("FEN string is required")]
    MissingFen,

    /// The FEN string could not be parsed.
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Search(#[from] SearchError),

    /// A caller-supplied move is not legal in the position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The difficulty label is not one of easy, medium or hard.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A search depth of zero was configured.
    #[error("search depth for {difficulty} must be at least 1")]
    InvalidDepth { difficulty: Difficulty },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            SearchError::NoLegalMoves.to_string(),
            "no legal moves in the root position"
        );
        assert_eq!(
            EngineError::UnknownDifficulty("insane".into()).to_string(),
            "unknown difficulty: insane"
        );
        assert_eq!(
            EngineError::from(SearchError::NoLegalMoves).to_string(),
            "no legal moves in the root position"
        );
        assert_eq!(
            EngineError::from(FenError::InvalidPartCount(2)).to_string(),
            "invalid FEN: expected 6 parts, got 2"
        );
        assert_eq!(
            ConfigError::InvalidDepth {
                difficulty: Difficulty::Hard
            }
            .to_string(),
            "search depth for hard must be at least 1"
        );
    }
}
