//! Zobrist hashing for repetition detection.
//!
//! A position's hash XORs one random key per feature:
//! - each piece on each square (12 piece kinds × 64 squares)
//! - Black to move
//! - each castling right still held
//! - the en passant file, only when a pawn could actually capture there
//!
//! Two positions with the same hash count as the same position for the
//! threefold repetition rule.

use crate::Position;
use chess_core::{Color, Piece, Square};

/// Zobrist hash keys, generated at compile time from a fixed seed.
struct ZobristKeys {
    /// Keys for pieces: [piece][color][square]
    pieces: [[[u64; 64]; 2]; 6],
    black_to_move: u64,
    /// One key per castling flag bit.
    castling: [u64; 4],
    en_passant: [u64; 8],
}

/// One step of xorshift64.
const fn next_random(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

impl ZobristKeys {
    const fn new() -> Self {
        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];

        let mut i = 0;
        while i < 6 * 2 * 64 {
            state = next_random(state);
            pieces[i / 128][(i / 64) % 2][i % 64] = state;
            i += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    const fn piece_key(&self, piece: Piece, color: Color, square: Square) -> u64 {
        self.pieces[piece.index()][color.index()][square.index() as usize]
    }
}

static ZOBRIST: ZobristKeys = ZobristKeys::new();

impl Position {
    /// Computes the Zobrist hash of this position.
    ///
    /// The clocks are not part of the hash.
    pub fn zobrist_hash(&self) -> u64 {
        let mut hash = self
            .occupied()
            .fold(0u64, |h, (sq, piece, color)| {
                h ^ ZOBRIST.piece_key(piece, color, sq)
            });

        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.black_to_move;
        }

        let rights = self.castling.raw();
        for (bit, key) in ZOBRIST.castling.iter().enumerate() {
            if rights & (1 << bit) != 0 {
                hash ^= key;
            }
        }

        if let Some(ep) = self.en_passant.filter(|&ep| self.en_passant_capturable(ep)) {
            hash ^= ZOBRIST.en_passant[ep.file_index() as usize];
        }

        hash
    }

    /// True if a pawn of the side to move stands next to the pawn that
    /// just double-pushed past `ep`.
    fn en_passant_capturable(&self, ep: Square) -> bool {
        let us = self.side_to_move;
        let behind = -us.pawn_direction();
        [-1, 1].iter().any(|&df| {
            ep.offset(df, behind)
                .is_some_and(|sq| self.piece_at(sq) == Some((Piece::Pawn, us)))
        })
    }
}
