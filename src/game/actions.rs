//! Legal-action enumeration and application
//!
//! `enumerate_legal_actions` yields every successor choice at the current
//! phase in a deterministic order; `apply_action` is a pure function from
//! (state, action) to the next state. All game progression flows through
//! these two functions.

use crate::core::{Ability, Card, CardType, DamageTarget, Keyword};
use crate::game::{
    combat::enumerate_block_assignments, BlockAssignment, CombatState, GameState, Permanent,
    PermanentId, Phase,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One player choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Put the cards at these hand indices onto the battlefield
    /// simultaneously (mana is unconstrained in this format)
    Cast(SmallVec<[usize; 3]>),

    /// Attack with these permanents; empty means skip combat
    DeclareAttackers(SmallVec<[PermanentId; 4]>),

    /// The defender's chosen block assignment
    DeclareBlockers(BlockAssignment),

    /// Resolve the current automatic phase
    Pass,
}

/// All legal actions at the current phase, in a deterministic order that
/// depends only on the state.
pub fn enumerate_legal_actions(state: &GameState) -> Vec<Action> {
    match state.phase {
        Phase::MainPrecombat | Phase::MainPostcombat => {
            let hand_size = state.players[state.active_player].hand.len();
            subsets(hand_size)
                .map(|indices| Action::Cast(indices.into_iter().collect()))
                .collect()
        }
        Phase::DeclareAttackers => {
            let battlefield = &state.players[state.active_player].battlefield;
            let candidates: Vec<PermanentId> = battlefield
                .iter()
                .filter(|perm| GameState::can_attack(perm))
                .map(|perm| perm.id)
                .collect();
            subsets(candidates.len())
                .map(|indices| {
                    Action::DeclareAttackers(indices.iter().map(|&i| candidates[i]).collect())
                })
                .collect()
        }
        Phase::DeclareBlockers => {
            let combat = state
                .combat
                .as_ref()
                .unwrap_or_else(|| panic!("invariant breach: declare_blockers without combat"));
            let attacker_side = &state.players[state.active_player];
            let attackers: Vec<&Permanent> = combat
                .attackers
                .iter()
                .map(|&id| attacker_side.expect_permanent(id))
                .collect();
            let defender_side = &state.players[state.defending_player()];
            let potential: Vec<&Permanent> = defender_side
                .battlefield
                .iter()
                .filter(|perm| perm.card.is_creature() && !perm.tapped)
                .collect();
            enumerate_block_assignments(&attackers, &potential)
                .into_iter()
                .map(Action::DeclareBlockers)
                .collect()
        }
        Phase::FirstStrikeDamage | Phase::CombatDamage | Phase::Cleanup => vec![Action::Pass],
    }
}

/// Every subset of `0..n` as ascending index lists, empty subset first.
fn subsets(n: usize) -> impl Iterator<Item = Vec<usize>> {
    (0u64..(1 << n)).map(move |mask| (0..n).filter(|i| mask & (1 << i) != 0).collect())
}

/// Apply an action, producing the successor state. The input state is
/// untouched; search branches share nothing observable.
pub fn apply_action(state: &GameState, action: &Action) -> GameState {
    let mut next = state.clone();
    match (state.phase, action) {
        (Phase::MainPrecombat | Phase::MainPostcombat, Action::Cast(indices)) => {
            cast_from_hand(&mut next, indices);
            next.phase = match state.phase {
                Phase::MainPrecombat => Phase::DeclareAttackers,
                _ => Phase::Cleanup,
            };
        }
        (Phase::DeclareAttackers, Action::DeclareAttackers(ids)) => {
            if ids.is_empty() {
                next.combat = None;
                advance_turn(&mut next);
            } else {
                let active = next.active_player;
                for &id in ids {
                    let perm = next.players[active].permanent_mut(id).unwrap_or_else(|| {
                        panic!("invariant breach: attacker {id} not on battlefield")
                    });
                    if !perm.card.has_vigilance() {
                        perm.tap();
                    }
                    // Redundant by the time search reaches this phase
                    // (sickness clears on the owner's untap), kept as a
                    // safety invariant.
                    perm.summoning_sick = false;
                }
                next.combat = Some(CombatState::new(ids.clone()));
                next.phase = Phase::DeclareBlockers;
            }
        }
        (Phase::DeclareBlockers, Action::DeclareBlockers(assignment)) => {
            let combat = next
                .combat
                .as_mut()
                .unwrap_or_else(|| panic!("invariant breach: declare_blockers without combat"));
            combat.blockers = assignment.clone();
            next.phase = if next.combat_needs_first_strike_step() {
                Phase::FirstStrikeDamage
            } else {
                Phase::CombatDamage
            };
        }
        (Phase::FirstStrikeDamage, Action::Pass) => {
            apply_combat_step(&mut next, true);
            next.phase = Phase::CombatDamage;
        }
        (Phase::CombatDamage, Action::Pass) => {
            apply_combat_step(&mut next, false);
            next.combat = None;
            advance_turn(&mut next);
        }
        (Phase::MainPostcombat | Phase::Cleanup, Action::Pass) => {
            advance_turn(&mut next);
        }
        (phase, action) => {
            panic!("invariant breach: action {action:?} applied in phase {phase}")
        }
    }
    next
}

/// Move the chosen hand cards to the battlefield and resolve their ETB
/// triggers in arrival order.
fn cast_from_hand(state: &mut GameState, indices: &[usize]) {
    let active = state.active_player;

    let mut ascending: SmallVec<[usize; 3]> = indices.iter().copied().collect();
    ascending.sort_unstable();

    let chosen: Vec<Card> = ascending
        .iter()
        .map(|&idx| {
            state.players[active]
                .hand
                .get(idx)
                .cloned()
                .unwrap_or_else(|| panic!("invariant breach: cast index {idx} out of hand range"))
        })
        .collect();
    for &idx in ascending.iter().rev() {
        state.players[active].hand.remove(idx);
    }

    let mut entering: Vec<Vec<Ability>> = Vec::with_capacity(chosen.len());
    for card in chosen {
        let id = state.allocate_permanent_id();
        entering.push(card.abilities.clone());
        state.players[active]
            .battlefield
            .push(Permanent::enters(id, card));
    }
    for abilities in entering {
        resolve_etb_abilities(state, active, &abilities);
    }
}

fn resolve_etb_abilities(state: &mut GameState, controller: usize, abilities: &[Ability]) {
    for ability in abilities {
        match ability {
            Ability::EtbDamage { amount, target } => {
                resolve_etb_damage(state, controller, *amount, *target);
            }
            Ability::EtbLifeGain { amount } => {
                state.players[controller].life += amount;
            }
            Ability::EtbCreateToken {
                count,
                power,
                toughness,
                keywords,
            } => {
                for _ in 0..*count {
                    let id = state.allocate_permanent_id();
                    let card = token_card(*power, *toughness, keywords);
                    state.players[controller]
                        .battlefield
                        .push(Permanent::enters_token(id, card));
                }
            }
            // Keywords and static modifiers are continuous, activated
            // abilities are outside the action model, and unresolved
            // abilities never reach a game (preflight rejects them).
            Ability::Keyword(_)
            | Ability::StaticPtModifier { .. }
            | Ability::ActivatedTapDamage { .. }
            | Ability::ActivatedTapLifeGain { .. }
            | Ability::Unresolved { .. } => {}
        }
    }
}

/// ETB damage resolves without a target choice: player-legal targets hit
/// the opponent's life total, creature targets hit the oldest opposing
/// creature (fizzling when there is none).
fn resolve_etb_damage(state: &mut GameState, controller: usize, amount: i32, target: DamageTarget) {
    if amount <= 0 {
        return;
    }
    let opponent = GameState::opponent(controller);
    match target {
        DamageTarget::AnyTarget | DamageTarget::Player | DamageTarget::Opponent => {
            state.players[opponent].life -= amount;
        }
        DamageTarget::Creature => {
            let Some(pos) = state.players[opponent]
                .battlefield
                .iter()
                .position(|perm| perm.card.is_creature())
            else {
                return;
            };
            state.players[opponent].battlefield[pos].damage_marked += amount;

            let opponent_state = &state.players[opponent];
            let perm = &opponent_state.battlefield[pos];
            let destroyed = !perm.card.has_indestructible()
                && perm.damage_marked >= opponent_state.effective_toughness(perm);
            if destroyed {
                let perm = state.players[opponent].battlefield.remove(pos);
                if !perm.is_token {
                    state.players[opponent].graveyard.push(perm.card);
                }
            }
        }
    }
}

fn token_card(power: i32, toughness: i32, keywords: &[Keyword]) -> Card {
    let mut name = format!("{power}/{toughness}");
    for keyword in keywords {
        name.push(' ');
        name.push_str(&keyword.to_string());
    }
    name.push_str(" Token");

    let mut card = Card::new(name);
    card.types.push(CardType::Creature);
    card.power = Some(power);
    card.toughness = Some(toughness);
    card.abilities = keywords
        .iter()
        .cloned()
        .map(Ability::Keyword)
        .collect();
    card
}

/// Run one damage step and apply its results: mark damage on survivors,
/// move destroyed cards to graveyards (tokens vanish), filter combat down
/// to the surviving set, and apply life totals.
fn apply_combat_step(state: &mut GameState, is_first_strike: bool) {
    let outcome = state.resolve_combat_damage(is_first_strike);

    for (id, amount) in &outcome.damage_marked {
        if outcome.destroyed.contains(id) {
            continue;
        }
        for player in state.players.iter_mut() {
            if let Some(perm) = player.permanent_mut(*id) {
                perm.damage_marked += amount;
                break;
            }
        }
    }

    for &id in &outcome.destroyed {
        for player in state.players.iter_mut() {
            if let Some(pos) = player.battlefield.iter().position(|p| p.id == id) {
                let perm = player.battlefield.remove(pos);
                if !perm.is_token {
                    player.graveyard.push(perm.card);
                }
                break;
            }
        }
    }

    if let Some(combat) = &mut state.combat {
        combat.remove_destroyed(&outcome.destroyed);
    }

    state.players[0].life += outcome.life_delta[0];
    state.players[1].life += outcome.life_delta[1];
}

/// End the turn: the opponent untaps and becomes active in a fresh
/// precombat main phase. Marked damage wears off both sides; the state
/// history carries forward unchanged.
fn advance_turn(state: &mut GameState) {
    state.active_player = GameState::opponent(state.active_player);
    if state.active_player == 0 {
        state.turn += 1;
    }
    let active = state.active_player;
    for perm in &mut state.players[active].battlefield {
        perm.untap();
        perm.summoning_sick = false;
    }
    for player in &mut state.players {
        for perm in &mut player.battlefield {
            perm.damage_marked = 0;
        }
    }
    state.phase = Phase::MainPrecombat;
    state.combat = None;
}
