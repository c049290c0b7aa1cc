//! Fixed-depth negamax search with alpha-beta pruning.
//!
//! Every node maximizes its own score by negating the scores of its
//! children. Moves are searched in generation order; no ordering heuristic
//! is applied.
//!
//! Leaves and game-over positions return the static evaluation. Checkmate
//! is not scored beyond material, so a shallow search does not prefer a
//! mate over winning material.

use crate::evaluation::evaluate_relative;
use crate::SearchError;
use chess_core::Move;
use chess_engine::rules::{is_draw_by_fifty_moves, is_insufficient_material};
use chess_engine::{legal_moves, make_move, MoveList, Position};
use tracing::{debug, info};

/// Larger than any evaluation; safe to negate.
pub const INFINITY: i32 = 1_000_000;

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move at the root; ties keep the earliest generated move.
    pub best_move: Move,
    /// Score of `best_move` in centipawns, from the root side's point of view.
    pub score: i32,
    /// Number of positions searched below the root.
    pub nodes: u64,
}

/// Counters threaded through the recursion.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    /// Number of [`negamax`] calls, leaves included.
    pub nodes: u64,
}

/// True if the game is over in a position with the given legal moves.
///
/// Same conditions as `chess_engine::rules::is_game_over`, reusing the
/// move list the caller already generated.
fn is_terminal(position: &Position, moves: &MoveList) -> bool {
    moves.is_empty() || is_draw_by_fifty_moves(position) || is_insufficient_material(position)
}

/// Negamax with alpha-beta pruning (fail-soft).
///
/// Returns the score of `position` from the side to move's point of view.
/// Exact when it lies strictly inside (alpha, beta); otherwise a bound on
/// the same side of the window as the true score.
pub fn negamax(
    position: &Position,
    depth: u32,
    mut alpha: i32,
    beta: i32,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    if depth == 0 {
        return evaluate_relative(position);
    }

    let moves = legal_moves(position);
    if is_terminal(position, &moves) {
        return evaluate_relative(position);
    }

    let mut best = -INFINITY;
    for m in &moves {
        let child = make_move(position, *m);
        let score = -negamax(&child, depth - 1, -beta, -alpha, stats);

        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break;
        }
    }

    best
}

/// Exhaustive minimax in negamax form, without pruning.
///
/// Always returns the exact score; used to check that pruning never
/// changes the result.
pub fn minimax(position: &Position, depth: u32) -> i32 {
    if depth == 0 {
        return evaluate_relative(position);
    }

    let moves = legal_moves(position);
    if is_terminal(position, &moves) {
        return evaluate_relative(position);
    }

    moves
        .iter()
        .map(|m| -minimax(&make_move(position, *m), depth - 1))
        .max()
        .unwrap_or(-INFINITY)
}

/// Searches `position` to `depth` plies and returns the best move.
///
/// A depth of zero is treated as one: every root move is applied and its
/// child evaluated.
///
/// # Errors
///
/// Returns [`SearchError::NoLegalMoves`] if the side to move has no legal
/// moves.
pub fn select_best_move(position: &Position, depth: u32) -> Result<SearchResult, SearchError> {
    let mut stats = SearchStats::default();
    let (best_move, score) = search_root(position, depth, |child, alpha| {
        -negamax(child, depth.saturating_sub(1), -INFINITY, -alpha, &mut stats)
    })?;

    info!(
        best_move = %best_move,
        score,
        depth,
        nodes = stats.nodes,
        "selected move"
    );

    Ok(SearchResult {
        best_move,
        score,
        nodes: stats.nodes,
    })
}

/// Root driver for [`minimax`], with the same tie-break as
/// [`select_best_move`]. The node count is left at zero.
pub fn select_best_move_exhaustive(
    position: &Position,
    depth: u32,
) -> Result<SearchResult, SearchError> {
    let (best_move, score) = search_root(position, depth, |child, _| {
        -minimax(child, depth.saturating_sub(1))
    })?;

    Ok(SearchResult {
        best_move,
        score,
        nodes: 0,
    })
}

/// Scores every root move with `score_child(child, alpha)` and keeps the
/// strictly greatest, so ties go to the earliest generated move. `alpha`
/// is the best score found so far.
fn search_root<F>(
    position: &Position,
    depth: u32,
    mut score_child: F,
) -> Result<(Move, i32), SearchError>
where
    F: FnMut(&Position, i32) -> i32,
{
    let moves = legal_moves(position);
    let mut best: Option<(Move, i32)> = None;

    for m in &moves {
        let child = make_move(position, *m);
        let alpha = best.map_or(-INFINITY, |(_, score)| score);
        let score = score_child(&child, alpha);
        debug!(mv = %m, score, depth, "root move");

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((*m, score));
        }
    }

    best.ok_or(SearchError::NoLegalMoves)
}
