//! Search statistics tracking.

use std::time::Duration;

use pawned_core::{Outcome, Side};
use tracing::debug;

/// Statistics collected during searching.
///
/// One instance covers a single `best_move` call; the searcher merges them
/// into a running total for the whole game.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchStats {
    /// Searches merged into these totals
    pub searches: u64,

    /// Nodes visited (root included)
    pub nodes: u64,

    /// Terminal positions reached (game over inside the tree)
    pub terminal_positions: u64,

    /// Breakdown of terminal outcomes
    pub white_wins: u64,
    pub black_wins: u64,
    pub draws: u64,

    /// Depth cutoffs scored with the static evaluation
    pub horizon_evals: u64,

    /// Interior nodes where the side to move had no legal move
    pub stuck_nodes: u64,

    /// Nodes where alpha-beta stopped early
    pub cutoffs: u64,

    /// Sibling moves skipped by those cutoffs
    pub branches_pruned: u64,

    /// Deepest ply reached below the root
    pub max_ply: u64,

    /// Wall time spent searching
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a terminal position outcome
    pub fn record_terminal(&mut self, outcome: Outcome) {
        self.terminal_positions += 1;
        match outcome {
            Outcome::WhiteWins => self.white_wins += 1,
            Outcome::BlackWins => self.black_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Add another run's counters to these totals.
    pub fn merge(&mut self, other: &SearchStats) {
        self.searches += other.searches;
        self.nodes += other.nodes;
        self.terminal_positions += other.terminal_positions;
        self.white_wins += other.white_wins;
        self.black_wins += other.black_wins;
        self.draws += other.draws;
        self.horizon_evals += other.horizon_evals;
        self.stuck_nodes += other.stuck_nodes;
        self.cutoffs += other.cutoffs;
        self.branches_pruned += other.branches_pruned;
        self.max_ply = self.max_ply.max(other.max_ply);
        self.elapsed += other.elapsed;
    }

    /// Nodes per second over the recorded time
    pub fn nodes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }

    /// Share of generated moves skipped by pruning, in percent
    pub fn pruned_pct(&self) -> f64 {
        if self.nodes > 0 {
            100.0 * self.branches_pruned as f64 / (self.nodes + self.branches_pruned) as f64
        } else {
            0.0
        }
    }

    /// Emit one debug line describing a finished search.
    pub fn log_search(&self, side: Side, depth: u32, value: i32) {
        debug!(
            side = %side,
            depth,
            value,
            nodes = self.nodes,
            terminals = self.terminal_positions,
            horizon = self.horizon_evals,
            cutoffs = self.cutoffs,
            pruned = format_args!("{:.1}%", self.pruned_pct()),
            max_ply = self.max_ply,
            rate = format_args!("{:.0}/s", self.nodes_per_sec()),
            "search complete"
        );
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("Searches: {}", self.searches);
        println!("Nodes visited: {}", self.nodes);
        println!("Terminal positions: {}", self.terminal_positions);
        println!("  - White wins: {}", self.white_wins);
        println!("  - Black wins: {}", self.black_wins);
        println!("  - Draws: {}", self.draws);
        println!("Horizon evaluations: {}", self.horizon_evals);
        println!("Stuck nodes: {}", self.stuck_nodes);
        println!("Cutoffs: {}", self.cutoffs);
        println!("Branches pruned: {} ({:.1}%)", self.branches_pruned, self.pruned_pct());
        println!("Max ply: {}", self.max_ply);
        println!(
            "Search time: {:.2}s ({:.0} nodes/sec)",
            self.elapsed.as_secs_f64(),
            self.nodes_per_sec()
        );
    }
}
