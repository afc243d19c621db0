//! Matchup driver and round-robin runner
//!
//! The top-level evaluator: two decks in, an [`Outcome`] and search
//! statistics out. Decks containing any unresolved ability short-circuit
//! to [`Outcome::Unresolved`] before a game is ever built; the embedding
//! system routes those to a human judge.

use crate::core::Deck;
use crate::game::GameState;
use crate::search::{SearchLimits, SearchStats, Solver};
use serde::{Deserialize, Serialize};

/// Result of a matchup under optimal two-sided play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Player0Wins,
    Player1Wins,
    Draw,
    /// The engine refused to adjudicate; `reason` lists the offending
    /// cards for the judge flow.
    Unresolved { reason: String },
}

/// Statistics for one matchup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupStats {
    pub nodes_explored: u64,
    pub max_depth_reached: u32,
    pub terminated_by_depth_limit: bool,
}

impl From<SearchStats> for MatchupStats {
    fn from(stats: SearchStats) -> Self {
        MatchupStats {
            nodes_explored: stats.nodes_explored,
            max_depth_reached: stats.max_depth_reached,
            terminated_by_depth_limit: stats.terminated_by_depth_limit,
        }
    }
}

/// Decide a matchup between two decks.
///
/// Deterministic: the same decks always produce the same outcome and the
/// same node count.
pub fn simulate_matchup(deck0: &Deck, deck1: &Deck, max_depth: u32) -> (Outcome, MatchupStats) {
    if let Some(reason) = preflight_reason(deck0, deck1) {
        log::debug!("matchup {} vs {} unresolved: {reason}", deck0.name(), deck1.name());
        return (Outcome::Unresolved { reason }, MatchupStats::default());
    }

    log::debug!("simulating {} vs {}", deck0.name(), deck1.name());
    let state = GameState::initial(deck0, deck1);
    let mut solver = Solver::new(SearchLimits { max_depth });
    let value = solver.solve(&state);

    let outcome = match value {
        1 => Outcome::Player0Wins,
        -1 => Outcome::Player1Wins,
        _ => Outcome::Draw,
    };
    (outcome, solver.stats().into())
}

/// Names of unresolved cards across both decks, formatted for the judge
/// router, or `None` when the matchup is playable.
fn preflight_reason(deck0: &Deck, deck1: &Deck) -> Option<String> {
    let mut names: Vec<&str> = Vec::new();
    for name in deck0
        .unresolved_card_names()
        .into_iter()
        .chain(deck1.unresolved_card_names())
    {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    if names.is_empty() {
        None
    } else {
        Some(format!(
            "cards with unresolved abilities: {}",
            names.join(", ")
        ))
    }
}

/// One entry of a round-robin run: deck indices are positions in the
/// input slice, with `deck0` playing first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub deck0: usize,
    pub deck1: usize,
    pub outcome: Outcome,
    pub stats: MatchupStats,
}

/// Scores and per-matchup results of a full round robin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRobinReport {
    /// Points per deck, indexed like the input: 3 per win, 1 per draw,
    /// 0 per loss or unresolved matchup
    pub scores: Vec<u32>,
    pub results: Vec<MatchupRecord>,
}

/// Run every unordered pair of decks twice, once with each deck as
/// player 0, to offset first-player advantage.
pub fn run_round_robin(decks: &[Deck], max_depth: u32) -> RoundRobinReport {
    let mut scores = vec![0u32; decks.len()];
    let mut results = Vec::new();

    for i in 0..decks.len() {
        for j in (i + 1)..decks.len() {
            for (first, second) in [(i, j), (j, i)] {
                let (outcome, stats) = simulate_matchup(&decks[first], &decks[second], max_depth);
                match &outcome {
                    Outcome::Player0Wins => scores[first] += 3,
                    Outcome::Player1Wins => scores[second] += 3,
                    Outcome::Draw => {
                        scores[first] += 1;
                        scores[second] += 1;
                    }
                    // Zero points until externally adjudicated.
                    Outcome::Unresolved { .. } => {}
                }
                results.push(MatchupRecord {
                    deck0: first,
                    deck1: second,
                    outcome,
                    stats,
                });
            }
        }
    }

    RoundRobinReport { scores, results }
}
