//! Move generation.
//!
//! Pseudo-legal moves follow piece movement rules only. Legal moves are the
//! pseudo-legal ones that do not leave the mover's king attacked, checked by
//! applying each move to a copy of the position.

mod attacks;
pub mod perft;

use crate::Position;
use chess_core::{Color, Move, MoveFlag, Piece, Square};
use thiserror::Error;

use attacks::{
    ray, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};
pub use attacks::{is_king_attacked, is_square_attacked};

/// A list of moves with a fixed maximum capacity.
///
/// FEN parsing only accepts material a game can reach: at most nine
/// queens plus two each of rooks, bishops and knights. That caps
/// pseudo-legal moves at 9 * 27 + 2 * 14 + 2 * 13 + 2 * 8 + 10 = 323, so a
/// fixed-size array avoids heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any chess position.
    pub const MAX_MOVES: usize = 323;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates over the moves in generation order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds the given move.
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A move string that matches no legal move in the position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("illegal move: {0}")]
pub struct IllegalMoveError(pub String);

/// Squares involved in one castling move.
struct CastlingPath {
    flag: MoveFlag,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    rook_to: Square,
    /// Squares that must be empty.
    between: &'static [Square],
    /// Squares the king stands on, crosses or lands on; none may be attacked.
    king_path: [Square; 3],
}

static CASTLING_PATHS: [[CastlingPath; 2]; 2] = [
    [
        CastlingPath {
            flag: MoveFlag::CastleKingside,
            king_from: Square::E1,
            king_to: Square::G1,
            rook_from: Square::H1,
            rook_to: Square::F1,
            between: &[Square::F1, Square::G1],
            king_path: [Square::E1, Square::F1, Square::G1],
        },
        CastlingPath {
            flag: MoveFlag::CastleQueenside,
            king_from: Square::E1,
            king_to: Square::C1,
            rook_from: Square::A1,
            rook_to: Square::D1,
            between: &[Square::B1, Square::C1, Square::D1],
            king_path: [Square::E1, Square::D1, Square::C1],
        },
    ],
    [
        CastlingPath {
            flag: MoveFlag::CastleKingside,
            king_from: Square::E8,
            king_to: Square::G8,
            rook_from: Square::H8,
            rook_to: Square::F8,
            between: &[Square::F8, Square::G8],
            king_path: [Square::E8, Square::F8, Square::G8],
        },
        CastlingPath {
            flag: MoveFlag::CastleQueenside,
            king_from: Square::E8,
            king_to: Square::C8,
            rook_from: Square::A8,
            rook_to: Square::D8,
            between: &[Square::B8, Square::C8, Square::D8],
            king_path: [Square::E8, Square::D8, Square::C8],
        },
    ],
];

fn castling_path(color: Color, flag: MoveFlag) -> &'static CastlingPath {
    let [kingside, queenside] = &CASTLING_PATHS[color.index()];
    if flag == MoveFlag::CastleKingside {
        kingside
    } else {
        queenside
    }
}

/// Generates all pseudo-legal moves for the side to move.
///
/// Moves may leave the mover's own king in check.
pub fn pseudo_legal_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();

    generate_pawn_moves(position, &mut moves);
    generate_leaper_moves(position, Piece::Knight, &KNIGHT_OFFSETS, &mut moves);
    generate_slider_moves(position, Piece::Bishop, &BISHOP_DIRECTIONS, &mut moves);
    generate_slider_moves(position, Piece::Rook, &ROOK_DIRECTIONS, &mut moves);
    generate_slider_moves(position, Piece::Queen, &QUEEN_DIRECTIONS, &mut moves);
    generate_leaper_moves(position, Piece::King, &KING_OFFSETS, &mut moves);
    generate_castling_moves(position, &mut moves);

    moves
}

/// Generates all legal moves for the given position.
pub fn legal_moves(position: &Position) -> MoveList {
    let mut moves = pseudo_legal_moves(position);

    // Filter out moves that leave king in check
    let us = position.side_to_move;
    moves.retain(|m| {
        let new_pos = make_move(position, *m);
        !is_king_attacked(&new_pos, us)
    });

    moves
}

/// Finds the legal move written in UCI notation (e.g. "e2e4", "e7e8q").
///
/// A promotion written without a piece letter promotes to a queen.
pub fn parse_move(position: &Position, uci: &str) -> Result<Move, IllegalMoveError> {
    let illegal = || IllegalMoveError(uci.to_string());
    let wanted = Move::from_uci(uci).ok_or_else(illegal)?;
    let promotion = match wanted.promotion() {
        Some(piece) => Some(piece),
        None if is_promotion_square(position, wanted.from(), wanted.to()) => Some(Piece::Queen),
        None => None,
    };

    legal_moves(position)
        .iter()
        .copied()
        .find(|m| m.from() == wanted.from() && m.to() == wanted.to() && m.promotion() == promotion)
        .ok_or_else(illegal)
}

fn is_promotion_square(position: &Position, from: Square, to: Square) -> bool {
    matches!(position.piece_at(from), Some((Piece::Pawn, color)) if to.rank_index() == color.promotion_rank())
}

/// Pushes a move onto `to`, as a capture if an enemy stands there.
/// Returns false if the square is blocked.
fn push_to(position: &Position, from: Square, to: Square, moves: &mut MoveList) -> bool {
    match position.piece_at(to) {
        None => {
            moves.push(Move::normal(from, to));
            true
        }
        Some((_, color)) if color != position.side_to_move => {
            moves.push(Move::new(from, to, MoveFlag::Capture));
            false
        }
        Some(_) => false,
    }
}

/// Pushes a pawn move, expanding it into all four promotions on the last rank.
fn push_pawn_move(from: Square, to: Square, flag: MoveFlag, us: Color, moves: &mut MoveList) {
    let m = Move::new(from, to, flag);
    if to.rank_index() == us.promotion_rank() {
        for piece in Piece::PROMOTIONS {
            moves.push(m.with_promotion(piece));
        }
    } else {
        moves.push(m);
    }
}

/// Generates pseudo-legal pawn moves.
fn generate_pawn_moves(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move;
    let them = us.opposite();
    let dir = us.pawn_direction();

    for from in position.pieces_of(Piece::Pawn, us) {
        // Pushes
        if let Some(one) = from.offset(0, dir).filter(|&sq| position.is_empty(sq)) {
            push_pawn_move(from, one, MoveFlag::Normal, us, moves);

            if from.rank_index() == us.pawn_rank() {
                if let Some(two) = one.offset(0, dir).filter(|&sq| position.is_empty(sq)) {
                    moves.push(Move::new(from, two, MoveFlag::DoublePush));
                }
            }
        }

        // Captures (left and right)
        for df in [-1, 1] {
            let Some(to) = from.offset(df, dir) else {
                continue;
            };
            match position.piece_at(to) {
                Some((_, color)) if color == them => {
                    push_pawn_move(from, to, MoveFlag::Capture, us, moves);
                }
                None if position.en_passant == Some(to) => {
                    let victim = to.offset(0, -dir);
                    if victim.and_then(|sq| position.piece_at(sq)) == Some((Piece::Pawn, them)) {
                        moves.push(Move::new(from, to, MoveFlag::EnPassant));
                    }
                }
                _ => {}
            }
        }
    }
}

/// Generates pseudo-legal moves for knights or kings.
fn generate_leaper_moves(
    position: &Position,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for from in position.pieces_of(piece, position.side_to_move) {
        for &(df, dr) in offsets {
            if let Some(to) = from.offset(df, dr) {
                push_to(position, from, to, moves);
            }
        }
    }
}

/// Generates pseudo-legal moves for bishops, rooks or queens.
fn generate_slider_moves(
    position: &Position,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for from in position.pieces_of(piece, position.side_to_move) {
        for &direction in directions {
            for to in ray(from, direction) {
                if !push_to(position, from, to, moves) {
                    break;
                }
            }
        }
    }
}

/// Generates castling moves if legal.
fn generate_castling_moves(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move;
    let them = us.opposite();
    let rights = position.castling;

    for path in &CASTLING_PATHS[us.index()] {
        let allowed = match path.flag {
            MoveFlag::CastleKingside => rights.can_castle_kingside(us),
            _ => rights.can_castle_queenside(us),
        };
        if !allowed
            || position.piece_at(path.king_from) != Some((Piece::King, us))
            || position.piece_at(path.rook_from) != Some((Piece::Rook, us))
            || !path.between.iter().all(|&sq| position.is_empty(sq))
        {
            continue;
        }

        // Covers "not in check" as well, since the path starts on the king
        if path
            .king_path
            .iter()
            .any(|&sq| is_square_attacked(position, sq, them))
        {
            continue;
        }

        moves.push(Move::new(path.king_from, path.king_to, path.flag));
    }
}

/// Makes a move and returns the new position.
///
/// The parent position is left untouched.
///
/// # Panics
///
/// Panics if there is no piece on the move's source square. Moves produced
/// by [`pseudo_legal_moves`] or [`legal_moves`] for the same position never
/// trigger this.
pub fn make_move(position: &Position, m: Move) -> Position {
    let mut new_pos = position.clone();
    let us = position.side_to_move;
    let them = us.opposite();
    let from = m.from();
    let to = m.to();

    let (piece, _) = position.piece_at(from).expect("No piece at from square");
    let mut is_capture = position.piece_at(to).is_some();

    new_pos.set_piece(from, None);

    // Handle en passant capture
    if m.flag() == MoveFlag::EnPassant {
        if let Some(victim) = to.offset(0, -us.pawn_direction()) {
            new_pos.set_piece(victim, None);
        }
        is_capture = true;
    }

    // Place piece at destination (handle promotion)
    let dest_piece = m.promotion().unwrap_or(piece);
    new_pos.set_piece(to, Some((dest_piece, us)));

    // Handle castling - move the rook
    if m.flag().is_castling() {
        let path = castling_path(us, m.flag());
        new_pos.set_piece(path.rook_from, None);
        new_pos.set_piece(path.rook_to, Some((Piece::Rook, us)));
    }

    // King move removes all castling rights for that color
    if piece == Piece::King {
        new_pos.castling.remove_color(us);
    }
    // Moving from or capturing on a rook's home square removes that right
    for sq in [from, to] {
        match sq {
            Square::H1 => new_pos.castling.remove_kingside(Color::White),
            Square::A1 => new_pos.castling.remove_queenside(Color::White),
            Square::H8 => new_pos.castling.remove_kingside(Color::Black),
            Square::A8 => new_pos.castling.remove_queenside(Color::Black),
            _ => {}
        }
    }

    // En passant target lives for exactly one ply
    new_pos.en_passant = if m.flag() == MoveFlag::DoublePush {
        from.offset(0, us.pawn_direction())
    } else {
        None
    };

    if piece == Piece::Pawn || is_capture {
        new_pos.halfmove_clock = 0;
    } else {
        new_pos.halfmove_clock = new_pos.halfmove_clock.saturating_add(1);
    }

    if us == Color::Black {
        new_pos.fullmove_number = new_pos.fullmove_number.saturating_add(1);
    }

    new_pos.side_to_move = them;

    new_pos
}
