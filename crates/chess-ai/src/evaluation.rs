//! Static evaluation: material plus piece-square tables.

use chess_core::{Color, Piece, Square};
use chess_engine::Position;

/// Piece values in centipawns, indexed by [`Piece::index`].
///
/// The king's value never changes hands since kings are not captured; it
/// only has to dominate every other term.
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20000];

/// Piece-square tables (from White's perspective, rank 8 first).
/// Values are in centipawns, added to the piece's base value.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,   0,   0,   0,   0,  0,  0,
    50, 50,  50,  50,  50,  50, 50, 50,
    10, 10,  20,  30,  30,  20, 10, 10,
     5,  5,  10,  25,  25,  10,  5,  5,
     0,  0,   0,  20,  20,   0,  0,  0,
     5, -5, -10,   0,   0, -10, -5,  5,
     5, 10,  10, -20, -20,  10, 10,  5,
     0,  0,   0,   0,   0,   0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10,   0,   0,  0,  0,   0,   0, -10,
    -10,   0,   5,  5,  5,   5,   0, -10,
     -5,   0,   5,  5,  5,   5,   0,  -5,
      0,   0,   5,  5,  5,   5,   0,  -5,
    -10,   5,   5,  5,  5,   5,   0, -10,
    -10,   0,   5,  0,  0,   0,   0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

/// Piece-square tables indexed by [`Piece::index`].
const TABLES: [&[i32; 64]; 6] = [
    &PAWN_TABLE,
    &KNIGHT_TABLE,
    &BISHOP_TABLE,
    &ROOK_TABLE,
    &QUEEN_TABLE,
    &KING_TABLE,
];

/// Positional bonus for a piece of `color` standing on `sq`.
///
/// The tables list rank 8 first, so White reads them at the rank-flipped
/// index. Black reads them mirrored through the board's center, which is
/// White's entry for square 63 - sq.
pub fn square_bonus(piece: Piece, color: Color, sq: Square) -> i32 {
    let index = match color {
        Color::White => sq.index() ^ 56,
        Color::Black => sq.index() ^ 7,
    };
    TABLES[piece.index()][index as usize]
}

/// Material plus positional value of one piece.
#[inline]
fn piece_score(piece: Piece, color: Color, sq: Square) -> i32 {
    PIECE_VALUES[piece.index()] + square_bonus(piece, color, sq)
}

/// Evaluates the position in centipawns; positive favors White.
pub fn evaluate(position: &Position) -> i32 {
    position
        .occupied()
        .map(|(sq, piece, color)| color.sign() * piece_score(piece, color, sq))
        .sum()
}

/// Evaluates the position from the side to move's point of view.
pub fn evaluate_relative(position: &Position) -> i32 {
    position.side_to_move.sign() * evaluate(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn startpos_is_balanced() {
        let position = Position::startpos();
        assert_eq!(evaluate(&position), 0);
        assert_eq!(evaluate_relative(&position), 0);
    }

    #[test]
    fn white_reads_tables_rank_flipped() {
        // e4 sits on the "20" of the fifth table row (rank 4)
        assert_eq!(square_bonus(Piece::Pawn, Color::White, sq("e4")), 20);
        assert_eq!(square_bonus(Piece::Pawn, Color::White, sq("e2")), -20);
        assert_eq!(square_bonus(Piece::Pawn, Color::White, sq("a7")), 50);
        assert_eq!(square_bonus(Piece::King, Color::White, sq("g1")), 30);
        assert_eq!(square_bonus(Piece::Rook, Color::White, sq("d1")), 5);
    }

    #[test]
    fn black_mirrors_white() {
        for s in Square::all() {
            let mirrored = Square::from_index(63 - s.index()).unwrap();
            for piece in Piece::ALL {
                assert_eq!(
                    square_bonus(piece, Color::Black, s),
                    square_bonus(piece, Color::White, mirrored),
                    "{piece:?} on {s}"
                );
            }
        }
        assert_eq!(square_bonus(Piece::Pawn, Color::Black, sq("e5")), 20);
        assert_eq!(square_bonus(Piece::King, Color::Black, sq("b8")), 30);
    }

    #[test]
    fn central_pawn_is_worth_more() {
        let e4 = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
        let e2 = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(evaluate(&e4) > evaluate(&e2));
        assert_eq!(evaluate(&e4) - evaluate(&e2), 40);
    }

    #[test]
    fn material_dominates() {
        // White is a queen up
        let position = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let score = evaluate(&position);
        assert!(score > 800);

        let black_to_move = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&black_to_move), score);
        assert_eq!(evaluate_relative(&black_to_move), -score);
    }

    #[test]
    fn mirrored_position_negates_score() {
        let white = Position::from_fen("4k3/8/8/8/8/2N5/8/4K3 w - - 0 1").unwrap();
        let black = Position::from_fen("4k3/8/2n5/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&white), -evaluate(&black));
    }
}
