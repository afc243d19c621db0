//! Alpha-beta minimax over the game tree
//!
//! Player 0 is the maximizer. Values live in {-1, 0, +1}: +1 is a forced
//! player-0 win, -1 a forced player-1 win, 0 a draw (including stalemate
//! by repetition and depth exhaustion). The solver owns a per-matchup
//! transposition table keyed by the canonical state string; tables are
//! never shared across matchups because permanent ids restart per game.

use crate::game::{apply_action, enumerate_legal_actions, hash_state, GameState, Phase};
use rustc_hash::FxHashMap;

/// Search limits.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Maximum recursion depth before a branch is scored as a draw
    pub max_depth: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits { max_depth: 200 }
    }
}

/// Statistics from one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_explored: u64,
    pub max_depth_reached: u32,
    pub terminated_by_depth_limit: bool,
}

/// Depth-first solver owning a transposition table and limits.
pub struct Solver {
    limits: SearchLimits,
    table: FxHashMap<String, i8>,
    stats: SearchStats,
}

impl Solver {
    pub fn new(limits: SearchLimits) -> Self {
        Solver {
            limits,
            table: FxHashMap::default(),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Solve the position assuming optimal two-sided play.
    pub fn solve(&mut self, state: &GameState) -> i8 {
        let value = self.evaluate(state, 0, -2, 2);
        log::debug!(
            "search finished: value={value}, nodes={}, max_depth={}, capped={}",
            self.stats.nodes_explored,
            self.stats.max_depth_reached,
            self.stats.terminated_by_depth_limit
        );
        value
    }

    fn evaluate(&mut self, state: &GameState, depth: u32, alpha: i8, beta: i8) -> i8 {
        self.stats.nodes_explored += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);

        // Terminal checks, in order: lethal life totals, then the depth
        // cap.
        let life0 = state.players[0].life;
        let life1 = state.players[1].life;
        if life0 <= 0 && life1 <= 0 {
            return 0;
        }
        if life1 <= 0 {
            return 1;
        }
        if life0 <= 0 {
            return -1;
        }
        if depth >= self.limits.max_depth {
            self.stats.terminated_by_depth_limit = true;
            return 0;
        }

        // Main-precombat checkpoint: repetition means stalemate, and the
        // transposition table is consulted and filled here.
        if state.phase == Phase::MainPrecombat {
            let key = hash_state(state);
            if state.state_history.contains(&key) {
                log::trace!("stalemate by repetition at depth {depth}");
                return 0;
            }
            if let Some(&cached) = self.table.get(&key) {
                return cached;
            }
            let mut seen = state.clone();
            seen.state_history.insert(key.clone());
            let value = self.branch(&seen, depth, alpha, beta);
            self.table.insert(key, value);
            return value;
        }

        self.branch(state, depth, alpha, beta)
    }

    fn branch(&mut self, state: &GameState, depth: u32, alpha: i8, beta: i8) -> i8 {
        // Phases with a single trivial action resolve in place.
        if state.phase.is_auto_resolve() {
            let next = apply_action(state, &crate::game::Action::Pass);
            return self.evaluate(&next, depth + 1, alpha, beta);
        }

        let actions = enumerate_legal_actions(state);
        if actions.is_empty() {
            return 0;
        }

        // Blocks are chosen by the defender; every other choice belongs
        // to the active player.
        let decision_maker = if state.phase == Phase::DeclareBlockers {
            GameState::opponent(state.active_player)
        } else {
            state.active_player
        };
        let maximizing = decision_maker == 0;

        let mut alpha = alpha;
        let mut beta = beta;
        let mut best = if maximizing { -2 } else { 2 };
        for action in &actions {
            let child = apply_action(state, action);
            let value = self.evaluate(&child, depth + 1, alpha, beta);
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
