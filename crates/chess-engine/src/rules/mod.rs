//! Game-end detection.
//!
//! The free functions classify a single position: check, checkmate,
//! stalemate, the fifty-move rule and insufficient material. Threefold
//! repetition needs the game's history, so [`is_threefold_repetition`]
//! takes the positions visited so far.

use crate::movegen::{is_king_attacked, legal_moves};
use crate::Position;
use chess_core::{Color, Piece};

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

impl GameResult {
    /// Returns the winner, if the game was not drawn.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw(_) => None,
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// Stalemate - no legal moves but not in check.
    Stalemate,
    /// Insufficient material to checkmate.
    InsufficientMaterial,
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
}

/// Returns true if the side to move is in check.
pub fn is_check(position: &Position) -> bool {
    is_king_attacked(position, position.side_to_move)
}

/// Returns true if the side to move is in check and has no legal moves.
pub fn is_checkmate(position: &Position) -> bool {
    is_check(position) && legal_moves(position).is_empty()
}

/// Returns true if the side to move is not in check but has no legal moves.
pub fn is_stalemate(position: &Position) -> bool {
    !is_check(position) && legal_moves(position).is_empty()
}

/// Returns true once 100 half-moves have passed without a pawn move or capture.
pub fn is_draw_by_fifty_moves(position: &Position) -> bool {
    position.halfmove_clock >= 100
}

/// Returns true if neither side can possibly deliver checkmate.
///
/// Recognized cases: bare kings, a single knight or bishop against a bare
/// king, and any number of bishops (either side) all standing on squares
/// of one color.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut minors = 0;
    let mut bishop_squares = [0usize; 2];

    for (sq, piece, _) in position.occupied() {
        match piece {
            Piece::King => {}
            Piece::Knight => minors += 1,
            Piece::Bishop => {
                minors += 1;
                bishop_squares[sq.is_light() as usize] += 1;
            }
            Piece::Pawn | Piece::Rook | Piece::Queen => return false,
        }
    }

    let bishops = bishop_squares[0] + bishop_squares[1];
    match minors {
        0 | 1 => true,
        _ => bishops == minors && (bishop_squares[0] == 0 || bishop_squares[1] == 0),
    }
}

/// Returns true if the last position in `positions` occurs at least three
/// times in the sequence.
///
/// Positions are compared by piece placement, side to move, castling rights
/// and en passant target (via [`Position::zobrist_hash`]); the clocks are
/// ignored.
pub fn is_threefold_repetition(positions: &[Position]) -> bool {
    let Some(current) = positions.last() else {
        return false;
    };
    let target = current.zobrist_hash();
    positions
        .iter()
        .filter(|p| p.zobrist_hash() == target)
        .count()
        >= 3
}

/// Classifies a single position.
///
/// No legal moves is checked first (checkmate or stalemate), then the
/// fifty-move rule, then insufficient material. Repetition is not
/// considered here.
pub fn game_result(position: &Position) -> Option<GameResult> {
    if legal_moves(position).is_empty() {
        return Some(if is_check(position) {
            match position.side_to_move {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            }
        } else {
            GameResult::Draw(DrawReason::Stalemate)
        });
    }

    if is_draw_by_fifty_moves(position) {
        return Some(GameResult::Draw(DrawReason::FiftyMoveRule));
    }

    if is_insufficient_material(position) {
        return Some(GameResult::Draw(DrawReason::InsufficientMaterial));
    }

    None
}

/// Returns true if the game is over in this position.
pub fn is_game_over(position: &Position) -> bool {
    game_result(position).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn startpos_is_not_over() {
        let position = Position::startpos();
        assert!(!is_check(&position));
        assert!(!is_checkmate(&position));
        assert!(!is_stalemate(&position));
        assert_eq!(game_result(&position), None);
        assert!(!is_game_over(&position));
    }

    #[test]
    fn fools_mate() {
        let position = pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(is_check(&position));
        assert!(is_checkmate(&position));
        assert!(!is_stalemate(&position));
        assert!(legal_moves(&position).is_empty());
        assert_eq!(game_result(&position), Some(GameResult::BlackWins));
        assert_eq!(GameResult::BlackWins.winner(), Some(Color::Black));
    }

    #[test]
    fn back_rank_mate_for_white() {
        let position = pos("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(is_checkmate(&position));
        assert_eq!(game_result(&position), Some(GameResult::WhiteWins));
    }

    #[test]
    fn stalemate_is_not_checkmate() {
        let position = pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!is_check(&position));
        assert!(is_stalemate(&position));
        assert!(!is_checkmate(&position));
        assert_eq!(
            game_result(&position),
            Some(GameResult::Draw(DrawReason::Stalemate))
        );
    }

    #[test]
    fn check_with_escape_is_not_mate() {
        let position = pos("4k3/8/8/8/8/8/8/R3K3 b - - 0 1");
        assert!(!is_check(&position));
        let position = pos("4k3/8/8/8/8/8/8/4KR2 b - - 0 1");
        assert!(!is_check(&position));
        let position = pos("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1");
        assert!(is_check(&position));
        assert!(!is_checkmate(&position));
        assert_eq!(game_result(&position), None);
    }

    #[test]
    fn fifty_move_rule() {
        let position = pos("4k3/8/8/8/8/8/4P3/4K3 w - - 99 80");
        assert!(!is_draw_by_fifty_moves(&position));
        let position = pos("4k3/8/8/8/8/8/4P3/4K3 w - - 100 80");
        assert!(is_draw_by_fifty_moves(&position));
        assert_eq!(
            game_result(&position),
            Some(GameResult::Draw(DrawReason::FiftyMoveRule))
        );
    }

    #[test]
    fn mate_takes_precedence_over_fifty_moves() {
        let position = pos("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 100 80");
        assert_eq!(game_result(&position), Some(GameResult::WhiteWins));
    }

    #[test]
    fn insufficient_material_cases() {
        // Bare kings
        assert!(is_insufficient_material(&pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1")));
        // King and bishop vs king
        let kb = pos("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1");
        assert!(is_insufficient_material(&kb));
        assert_eq!(
            game_result(&kb),
            Some(GameResult::Draw(DrawReason::InsufficientMaterial))
        );
        // King and knight vs king
        assert!(is_insufficient_material(&pos("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1")));
        // Bishops on the same color (c1 and f8 are both dark)
        assert!(is_insufficient_material(&pos("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1")));
    }

    #[test]
    fn sufficient_material_cases() {
        // Pawn
        assert!(!is_insufficient_material(&pos("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")));
        // Rook
        assert!(!is_insufficient_material(&pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")));
        // Bishops on opposite colors (c1 dark, c8 light)
        assert!(!is_insufficient_material(&pos("2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1")));
        // Two knights
        assert!(!is_insufficient_material(&pos("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1")));
        // Knight and bishop
        assert!(!is_insufficient_material(&pos("4k3/8/8/8/8/8/8/1NB1K3 w - - 0 1")));
        assert!(!is_insufficient_material(&Position::startpos()));
    }

    #[test]
    fn threefold_repetition_counts_hashes() {
        use crate::movegen::{make_move, parse_move};

        let mut positions = vec![Position::startpos()];
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
            let current = positions.last().unwrap();
            let next = make_move(current, parse_move(current, uci).unwrap());
            positions.push(next);
        }

        // Start position appears at plies 0, 4 and 8
        assert!(is_threefold_repetition(&positions));
        assert!(!is_threefold_repetition(&positions[..8]));
        assert!(!is_threefold_repetition(&positions[..5]));
        assert!(!is_threefold_repetition(&[]));
    }
}
