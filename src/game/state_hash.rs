//! Canonical state keys
//!
//! The search keys its transposition table and repetition history by a
//! canonical string over the gameplay-relevant fields. Battlefield and
//! hand contents are encoded as *sorted* bags so that equivalent board
//! positions reached through different action orderings share a key;
//! ephemeral fields (marked damage, combat state, turn number) are
//! excluded.

use crate::game::{GameState, PlayerState};
use std::fmt::Write;

/// Compute the canonical key for a state.
///
/// Encodes: active player, phase, both life totals, and per player a
/// sorted bag of `(card name, tapped, summoning sick)` battlefield
/// triples plus a sorted bag of hand card names.
pub fn hash_state(state: &GameState) -> String {
    let mut key = String::with_capacity(128);
    let _ = write!(key, "a{};{};", state.active_player, state.phase);
    let _ = write!(
        key,
        "l{},{};",
        state.players[0].life, state.players[1].life
    );
    for (idx, player) in state.players.iter().enumerate() {
        let _ = write!(key, "b{idx}[{}];", battlefield_bag(player));
        let _ = write!(key, "h{idx}[{}];", hand_bag(player));
    }
    key
}

fn battlefield_bag(player: &PlayerState) -> String {
    let mut entries: Vec<String> = player
        .battlefield
        .iter()
        .map(|perm| {
            format!(
                "{}#t{}#s{}",
                perm.card.name,
                u8::from(perm.tapped),
                u8::from(perm.summoning_sick)
            )
        })
        .collect();
    entries.sort_unstable();
    entries.join(",")
}

fn hand_bag(player: &PlayerState) -> String {
    let mut names: Vec<&str> = player.hand.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    names.join(",")
}
