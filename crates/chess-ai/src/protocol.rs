//! Request/response contract for asking the engine for a move.
//!
//! The JSON bodies mirror the move endpoint of the web service that calls
//! the engine:
//!
//! ```json
//! {"fen": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "difficulty": "hard"}
//! {"success": true, "bestMove": "e2e4"}
//! {"success": false, "error": "unknown difficulty: expert"}
//! ```

use crate::search::select_best_move;
use crate::{AiConfig, Difficulty, EngineError};
use chess_engine::{legal_moves, make_move, parse_move, Position};
use serde::{Deserialize, Serialize};

/// A request for the engine's move.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Current position in FEN.
    #[serde(default)]
    pub fen: String,
    /// Difficulty label; the configured default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl MoveRequest {
    pub fn new(fen: impl Into<String>, difficulty: Option<Difficulty>) -> Self {
        MoveRequest {
            fen: fen.into(),
            difficulty: difficulty.map(|d| d.as_str().to_string()),
        }
    }
}

/// The engine's answer to a [`MoveRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub success: bool,
    /// The move in UCI form; empty when the position has no legal moves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_move: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<String, EngineError>> for MoveResponse {
    fn from(result: Result<String, EngineError>) -> Self {
        match result {
            Ok(best_move) => MoveResponse {
                success: true,
                best_move: Some(best_move),
                error: None,
            },
            Err(e) => MoveResponse {
                success: false,
                best_move: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Resolves the difficulty named by a request, falling back to the
/// configured default when the label is absent or blank.
pub fn resolve_difficulty(
    label: Option<&str>,
    config: &AiConfig,
) -> Result<Difficulty, EngineError> {
    match label.map(str::trim).filter(|label| !label.is_empty()) {
        Some(label) => label.parse(),
        None => Ok(config.default_difficulty),
    }
}

/// Picks the engine's move for a request.
///
/// Returns the move as `<from><to><promotion?>` (e.g. `e2e4`, `e7e8q`), or
/// an empty string when the side to move has no legal moves.
///
/// # Errors
///
/// Fails if the FEN is missing or malformed, or the difficulty label is
/// unknown.
pub fn best_move(request: &MoveRequest, config: &AiConfig) -> Result<String, EngineError> {
    if request.fen.trim().is_empty() {
        return Err(EngineError::MissingFen);
    }
    let position = Position::from_fen(&request.fen)?;
    let difficulty = resolve_difficulty(request.difficulty.as_deref(), config)?;
    best_move_for_position(&position, difficulty, config)
}

/// Picks the engine's move in an already parsed position.
pub fn best_move_for_position(
    position: &Position,
    difficulty: Difficulty,
    config: &AiConfig,
) -> Result<String, EngineError> {
    if legal_moves(position).is_empty() {
        return Ok(String::new());
    }

    let depth = config.depth(difficulty);
    tracing::debug!(%difficulty, depth, fen = %position.to_fen(), "searching");
    let result = select_best_move(position, depth)?;
    Ok(result.best_move.to_uci())
}

/// Handles one request end to end, never failing.
pub fn handle_request(request: &MoveRequest, config: &AiConfig) -> MoveResponse {
    best_move(request, config).into()
}

/// Plays a caller-supplied move in UCI form and returns the new position.
///
/// A move that is not legal in `position` is rejected, never coerced into
/// a nearby legal move. A promotion without a piece letter promotes to a
/// queen.
pub fn apply_move(position: &Position, uci: &str) -> Result<Position, EngineError> {
    let m = parse_move(position, uci).map_err(|e| EngineError::IllegalMove(e.0))?;
    Ok(make_move(position, m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::FenParser;

    #[test]
    fn request_json_shape() {
        let request: MoveRequest =
            serde_json::from_str(r#"{"fen": "8/8/8/8/8/8/8/8 w - - 0 1", "difficulty": "easy"}"#)
                .unwrap();
        assert_eq!(request.difficulty.as_deref(), Some("easy"));

        let request: MoveRequest = serde_json::from_str(r#"{"fen": "x"}"#).unwrap();
        assert_eq!(request.difficulty, None);

        let request: MoveRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.fen, "");
    }

    #[test]
    fn response_json_shape() {
        let ok = MoveResponse::from(Ok("e2e4".to_string()));
        assert_eq!(
            serde_json::to_string(&ok).unwrap(),
            r#"{"success":true,"bestMove":"e2e4"}"#
        );

        let err = MoveResponse::from(Err(EngineError::MissingFen));
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"success":false,"error":"FEN string is required"}"#
        );
    }

    #[test]
    fn missing_difficulty_uses_configured_default() {
        let config = AiConfig::default();
        assert_eq!(resolve_difficulty(None, &config), Ok(Difficulty::Medium));

        let config = AiConfig {
            default_difficulty: Difficulty::Easy,
            ..AiConfig::default()
        };
        assert_eq!(resolve_difficulty(None, &config), Ok(Difficulty::Easy));
        assert_eq!(resolve_difficulty(Some("HARD"), &config), Ok(Difficulty::Hard));
    }

    #[test]
    fn blank_difficulty_uses_configured_default() {
        let config = AiConfig {
            default_difficulty: Difficulty::Easy,
            ..AiConfig::default()
        };
        assert_eq!(resolve_difficulty(Some(""), &config), Ok(Difficulty::Easy));
        assert_eq!(resolve_difficulty(Some("   "), &config), Ok(Difficulty::Easy));

        let request: MoveRequest =
            serde_json::from_str(r#"{"fen": "8/P7/8/8/8/8/8/4K2k w - - 0 1", "difficulty": ""}"#)
                .unwrap();
        assert_eq!(best_move(&request, &config), Ok("a7a8q".to_string()));
    }

    #[test]
    fn best_move_from_startpos() {
        let request = MoveRequest::new(FenParser::STARTPOS, Some(Difficulty::Easy));
        let mv = best_move(&request, &AiConfig::default()).unwrap();
        let position = Position::startpos();
        assert!(parse_move(&position, &mv).is_ok(), "{mv} is not legal");
    }

    #[test]
    fn best_move_in_terminal_position_is_empty() {
        let request = MoveRequest::new(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            None,
        );
        assert_eq!(best_move(&request, &AiConfig::default()), Ok(String::new()));
    }

    #[test]
    fn best_move_errors() {
        let config = AiConfig::default();
        assert_eq!(
            best_move(&MoveRequest::new("  ", None), &config),
            Err(EngineError::MissingFen)
        );
        assert!(matches!(
            best_move(&MoveRequest::new("not a fen", None), &config),
            Err(EngineError::Fen(_))
        ));

        let request = MoveRequest {
            fen: FenParser::STARTPOS.to_string(),
            difficulty: Some("impossible".to_string()),
        };
        assert_eq!(
            best_move(&request, &config),
            Err(EngineError::UnknownDifficulty("impossible".to_string()))
        );
    }

    #[test]
    fn handle_request_reports_errors() {
        let response = handle_request(&MoveRequest::new("bad", None), &AiConfig::default());
        assert!(!response.success);
        assert!(response.best_move.is_none());
        assert!(response.error.unwrap().starts_with("invalid FEN"));
    }

    #[test]
    fn unreachable_material_is_a_response_error() {
        let request = MoveRequest::new(
            "QQQQQQnk/Q4Q1n/Q6Q/Q4Q2/Q6Q/Q4Q1n/Q6Q/KQQQQQQ1 w - - 0 1",
            Some(Difficulty::Easy),
        );
        let response = handle_request(&request, &AiConfig::default());
        assert!(!response.success);
        assert!(response.error.unwrap().starts_with("invalid piece placement"));
    }

    #[test]
    fn maximal_clocks_do_not_break_the_search() {
        let config = AiConfig::default();
        for fen in [
            "4k3/8/8/8/8/8/4P3/4K3 b - - 0 4294967295",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 4294967295 1",
        ] {
            let response = handle_request(&MoveRequest::new(fen, Some(Difficulty::Easy)), &config);
            assert!(response.success, "{fen}: {:?}", response.error);
        }
    }

    #[test]
    fn apply_move_rejects_illegal_moves() {
        let position = Position::startpos();
        let next = apply_move(&position, "e2e4").unwrap();
        assert_eq!(
            next.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );

        assert_eq!(
            apply_move(&position, "e2e5"),
            Err(EngineError::IllegalMove("e2e5".to_string()))
        );
    }
}
