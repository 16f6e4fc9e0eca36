//! Fixed-depth minimax search with optional alpha-beta pruning.
//!
//! Values are from white's point of view: white maximizes, black minimizes.
//! Every node works on its own copy of the position, so sibling branches
//! never see each other's moves.

use std::time::Instant;

use pawned_core::{Move, Position, Side, WIN_SCORE};

use crate::stats::SearchStats;

/// Value reported when the side to move is stuck at a non-terminal node:
/// -NO_MOVE_SCORE for white, +NO_MOVE_SCORE for black.
///
/// It is also the starting point of every node's running best, so no node
/// reports a value worse than this for the side to move.
pub const NO_MOVE_SCORE: i32 = 1_000;

/// Minimax searcher.
pub struct Searcher {
    /// Alpha-beta pruning on (true) or plain minimax (false)
    prune: bool,
    /// Totals over every search run by this searcher
    pub stats: SearchStats,
    /// Statistics of the most recent search
    last: SearchStats,
}

impl Searcher {
    pub fn new(prune: bool) -> Self {
        Self {
            prune,
            stats: SearchStats::new(),
            last: SearchStats::new(),
        }
    }

    #[inline]
    pub fn prune(&self) -> bool {
        self.prune
    }

    /// Statistics of the most recent `best_move` call.
    pub fn last_stats(&self) -> &SearchStats {
        &self.last
    }

    /// Search `depth` plies ahead and pick a move for `side`.
    ///
    /// Returns the position's value and the chosen move. The move is None
    /// when the position is already over or `side` has no legal move; with
    /// `depth == 0` only the static evaluation is returned.
    pub fn best_move(&mut self, position: &Position, side: Side, depth: u32) -> (i32, Option<Move>) {
        let start = Instant::now();
        let mut run = SearchStats::new();

        let result = self.search(position, side, depth, -WIN_SCORE, WIN_SCORE, 0, &mut run);

        run.searches = 1;
        run.elapsed = start.elapsed();
        run.log_search(side, depth, result.0);
        self.stats.merge(&run);
        self.last = run;

        result
    }

    fn search(
        &self,
        position: &Position,
        side: Side,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        ply: u64,
        stats: &mut SearchStats,
    ) -> (i32, Option<Move>) {
        stats.nodes += 1;
        stats.max_ply = stats.max_ply.max(ply);

        // Terminal check takes priority over the depth limit
        if let Some(outcome) = position.winner() {
            stats.record_terminal(outcome);
            return (outcome.value(), None);
        }
        if depth == 0 {
            stats.horizon_evals += 1;
            return (position.evaluate(), None);
        }

        let moves = position.legal_moves(side);
        let Some(&first) = moves.first() else {
            stats.stuck_nodes += 1;
            return (Self::stuck_score(side), None);
        };
        let maximizing = side == Side::White;

        // The running best starts at the stuck sentinel with the first move,
        // so a node where every move loses still reports the sentinel
        let mut best = (Self::stuck_score(side), first);

        for (idx, &mov) in moves.iter().enumerate() {
            let child = position.apply_copy(mov);
            let (value, _) =
                self.search(&child, side.opponent(), depth - 1, alpha, beta, ply + 1, stats);

            // Strict comparison: on ties the earlier move stays
            let improves = if maximizing { value > best.0 } else { value < best.0 };
            if improves {
                best = (value, mov);
            }

            if !self.prune {
                continue;
            }
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            if beta <= alpha {
                stats.cutoffs += 1;
                stats.branches_pruned += (moves.len() - idx - 1) as u64;
                break;
            }
        }

        (best.0, Some(best.1))
    }

    /// Sentinel value for a side that cannot move.
    #[inline]
    fn stuck_score(side: Side) -> i32 {
        match side {
            Side::White => -NO_MOVE_SCORE,
            Side::Black => NO_MOVE_SCORE,
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(true)
    }
}
