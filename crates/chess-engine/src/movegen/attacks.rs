//! Piece movement patterns and square attack detection.
//!
//! The attack scan looks outward from the target square for each kind of
//! attacker. It never generates moves, so legality filtering can call it
//! without recursing into itself.

use crate::Position;
use chess_core::{Color, Piece, Square};

/// (file, rank) steps of a knight.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// (file, rank) steps of a king.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Diagonal ray directions.
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Orthogonal ray directions.
pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// All eight ray directions.
pub(crate) const QUEEN_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

/// Squares reached by stepping repeatedly from `from` in one direction,
/// stopping at the board edge. The starting square is not included.
pub(crate) fn ray(from: Square, (df, dr): (i8, i8)) -> impl Iterator<Item = Square> {
    std::iter::successors(from.offset(df, dr), move |sq| sq.offset(df, dr))
}

/// Returns the first occupied square along a ray, with its piece.
fn first_blocker(
    position: &Position,
    from: Square,
    direction: (i8, i8),
) -> Option<(Piece, Color)> {
    ray(from, direction).find_map(|sq| position.piece_at(sq))
}

/// Returns true if the given square is attacked by the given color.
pub fn is_square_attacked(position: &Position, sq: Square, by_color: Color) -> bool {
    // A pawn attacks diagonally forward, so look one rank behind the target
    let behind = -by_color.pawn_direction();
    let pawn_attack = [-1, 1].iter().any(|&df| {
        sq.offset(df, behind)
            .is_some_and(|from| position.piece_at(from) == Some((Piece::Pawn, by_color)))
    });
    if pawn_attack {
        return true;
    }

    let leaper_attack = |offsets: &[(i8, i8)], piece: Piece| {
        offsets.iter().any(|&(df, dr)| {
            sq.offset(df, dr)
                .is_some_and(|from| position.piece_at(from) == Some((piece, by_color)))
        })
    };
    if leaper_attack(&KNIGHT_OFFSETS, Piece::Knight) || leaper_attack(&KING_OFFSETS, Piece::King)
    {
        return true;
    }

    let slider_attack = |directions: &[(i8, i8)], piece: Piece| {
        directions.iter().any(|&direction| {
            matches!(
                first_blocker(position, sq, direction),
                Some((p, c)) if c == by_color && (p == piece || p == Piece::Queen)
            )
        })
    };
    slider_attack(&BISHOP_DIRECTIONS, Piece::Bishop) || slider_attack(&ROOK_DIRECTIONS, Piece::Rook)
}

/// Returns true if the king of the given color is in check.
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    match position.king_square(king_color) {
        Some(king_sq) => is_square_attacked(position, king_sq, king_color.opposite()),
        None => false,
    }
}
