//! Tests for interactions between multiple keywords
//!
//! Each scenario drives the public action pipeline: both sides deploy on
//! their own turn, the attack is declared on the following turn, and the
//! damage steps resolve through `Pass`. Life totals start at 20.

use tcb_engine::core::{Card, CardType, Deck};
use tcb_engine::game::{
    apply_action, enumerate_legal_actions, Action, BlockAssignment, GameState, PermanentId, Phase,
};
use tcb_engine::parser;

fn creature(name: &str, power: i32, toughness: i32, oracle: &str) -> Card {
    let mut card = Card::new(name);
    card.types.push(CardType::Creature);
    card.power = Some(power);
    card.toughness = Some(toughness);
    card.oracle_text = oracle.to_string();
    card.abilities = parser::parse(oracle);
    card
}

/// Deploy one attacker for player 0 and the given defenders for player 1
/// (one quiet turn each), then declare the attack. The returned state is
/// at `DeclareBlockers`.
fn set_up_attack(attacker: Card, defenders: Vec<Card>) -> (GameState, PermanentId, Vec<PermanentId>) {
    let d0 = Deck::new("attacker", vec![attacker]).unwrap();
    let d1 = Deck::new("defender", defenders).unwrap();
    let mut state = GameState::initial(&d0, &d1);

    // Turn 1, player 0: deploy, no attack.
    state = apply_action(&state, &Action::Cast(std::iter::once(0).collect()));
    state = apply_action(&state, &Action::DeclareAttackers(Default::default()));

    // Turn 1, player 1: deploy everything, no attack.
    let hand = state.players[1].hand.len();
    state = apply_action(&state, &Action::Cast((0..hand).collect()));
    state = apply_action(&state, &Action::DeclareAttackers(Default::default()));

    // Turn 2, player 0: attack.
    let attacker_id = state.players[0].battlefield[0].id;
    let blocker_ids: Vec<PermanentId> =
        state.players[1].battlefield.iter().map(|p| p.id).collect();
    state = apply_action(&state, &Action::Cast(Default::default()));
    state = apply_action(
        &state,
        &Action::DeclareAttackers(std::iter::once(attacker_id).collect()),
    );
    assert_eq!(state.phase, Phase::DeclareBlockers);
    (state, attacker_id, blocker_ids)
}

fn block_with(attacker: PermanentId, blockers: &[PermanentId]) -> BlockAssignment {
    let mut assignment = BlockAssignment::new();
    assignment.insert(attacker, blockers.iter().copied().collect());
    assignment
}

/// Declare the blocks and pass through every damage step; the returned
/// state is the start of the next turn.
fn resolve_combat(state: &GameState, assignment: BlockAssignment) -> GameState {
    let mut state = apply_action(state, &Action::DeclareBlockers(assignment));
    while matches!(state.phase, Phase::FirstStrikeDamage | Phase::CombatDamage) {
        state = apply_action(&state, &Action::Pass);
    }
    state
}

#[test]
fn test_first_strike_trample_interaction() {
    // 4/4 first strike + trample attacks into a 2/2 blocker: the blocker
    // dies to first-strike damage and 2 trample over; the attacker deals
    // nothing in the regular step (first strike only) and takes nothing
    // back.
    let (state, attacker, blockers) = set_up_attack(
        creature("Charging Knight", 4, 4, "First strike, trample"),
        vec![creature("Bear", 2, 2, "")],
    );
    let done = resolve_combat(&state, block_with(attacker, &blockers));

    assert_eq!(done.players[1].life, 18);
    assert!(done.players[1].battlefield.is_empty());
    assert_eq!(done.players[1].graveyard.len(), 1);
    assert_eq!(done.players[0].battlefield.len(), 1);
    assert_eq!(done.players[0].life, 20);
}

#[test]
fn test_double_strike_trample_interaction() {
    // 3/3 double strike + trample into a 2/2: first-strike step deals 2
    // to the blocker (killing it) and tramples 1; the regular step finds
    // no surviving blocker and all 3 hit the player. Total: 4.
    let (state, attacker, blockers) = set_up_attack(
        creature("Blade Dancer", 3, 3, "Double strike, trample"),
        vec![creature("Bear", 2, 2, "")],
    );
    let done = resolve_combat(&state, block_with(attacker, &blockers));

    assert_eq!(done.players[1].life, 16);
    assert!(done.players[1].battlefield.is_empty());
    assert_eq!(done.players[0].battlefield.len(), 1);
}

#[test]
fn test_deathtouch_trample_interaction() {
    // With deathtouch, one damage is lethal assignment: a 5/5 deathtouch
    // + trample attacker pays 1 to a 4/4 blocker and tramples 4 over.
    let (state, attacker, blockers) = set_up_attack(
        creature("Venomous Crusher", 5, 5, "Deathtouch, trample"),
        vec![creature("Ox", 4, 4, "")],
    );
    let done = resolve_combat(&state, block_with(attacker, &blockers));

    assert_eq!(done.players[1].life, 16);
    assert!(done.players[1].battlefield.is_empty());
    // The crusher took 4 back but has 5 toughness.
    assert_eq!(done.players[0].battlefield.len(), 1);
}

#[test]
fn test_lifelink_trample_interaction() {
    // Lifelink counts every point dealt: 2 to the blocker plus 3 trample
    // is 5 life for the attacking player.
    let (state, attacker, blockers) = set_up_attack(
        creature("Radiant Behemoth", 5, 5, "Lifelink, trample"),
        vec![creature("Bear", 2, 2, "")],
    );
    let done = resolve_combat(&state, block_with(attacker, &blockers));

    assert_eq!(done.players[0].life, 25);
    assert_eq!(done.players[1].life, 17);
    assert!(done.players[1].battlefield.is_empty());
}

#[test]
fn test_double_strike_deathtouch_trample_interaction() {
    // All three at once: the first-strike step assigns 1 (deathtouch
    // lethal) to the 4/4 and tramples 2; the blocker is destroyed by
    // deathtouch, so the regular step is an unblocked 3. The defender
    // never gets to strike back.
    let (state, attacker, blockers) = set_up_attack(
        creature("Nightmare Lancer", 3, 3, "Double strike, deathtouch, trample"),
        vec![creature("Ox", 4, 4, "")],
    );
    let done = resolve_combat(&state, block_with(attacker, &blockers));

    assert_eq!(done.players[1].life, 15);
    assert!(done.players[1].battlefield.is_empty());
    assert_eq!(done.players[0].battlefield.len(), 1);
    assert_eq!(done.players[0].life, 20);
}

#[test]
fn test_first_strike_beats_deathtouch_blocker() {
    // The deathtouch blocker dies in the first-strike step before it can
    // deal its lethal point.
    let (state, attacker, blockers) = set_up_attack(
        creature("Duelist", 2, 2, "First strike"),
        vec![creature("Asp", 1, 1, "Deathtouch")],
    );
    let done = resolve_combat(&state, block_with(attacker, &blockers));

    assert!(done.players[1].battlefield.is_empty());
    assert_eq!(done.players[0].battlefield.len(), 1);
}

#[test]
fn test_flying_blockable_only_by_reach_or_flying() {
    let (state, attacker, blockers) = set_up_attack(
        creature("Eagle", 2, 2, "Flying"),
        vec![
            creature("Spider", 1, 3, "Reach"),
            creature("Ox", 3, 3, ""),
        ],
    );

    let actions = enumerate_legal_actions(&state);
    // Decline, or block with the spider; the ox can never be assigned.
    assert_eq!(actions.len(), 2);
    for action in &actions {
        if let Action::DeclareBlockers(assignment) = action {
            for (blocked, assigned) in assignment {
                assert_eq!(*blocked, attacker);
                assert_eq!(assigned.as_slice(), &[blockers[0]]);
            }
        } else {
            panic!("expected only block declarations, got {action:?}");
        }
    }
}

#[test]
fn test_menace_needs_two_blockers() {
    let (state, attacker, blockers) = set_up_attack(
        creature("Skulking Brute", 3, 3, "Menace"),
        vec![creature("Bear", 2, 2, ""), creature("Wolf", 2, 2, "")],
    );

    let actions = enumerate_legal_actions(&state);
    // Unblocked, or both blockers together.
    assert_eq!(actions.len(), 2);
    for action in &actions {
        if let Action::DeclareBlockers(assignment) = action {
            let count = assignment.get(&attacker).map_or(0, |b| b.len());
            assert!(count == 0 || count == 2);
        }
    }

    // The double block kills the brute for the cost of the first
    // blocker; the second takes only the leftover point.
    let done = resolve_combat(&state, block_with(attacker, &blockers));
    assert!(done.players[0].battlefield.is_empty());
    assert_eq!(done.players[1].battlefield.len(), 1);
}

#[test]
fn test_vigilance_attacker_stays_untapped() {
    let (state, attacker, _) = set_up_attack(
        creature("Watchful Knight", 2, 2, "Vigilance"),
        vec![creature("Bear", 2, 2, "")],
    );
    let perm = state.players[0]
        .battlefield
        .iter()
        .find(|p| p.id == attacker)
        .expect("attacker on battlefield");
    assert!(!perm.tapped);
}

#[test]
fn test_indestructible_blocker_survives_deathtouch() {
    let (state, attacker, blockers) = set_up_attack(
        creature("Venom Giant", 6, 6, "Deathtouch"),
        vec![creature("Eternal Monument", 1, 2, "Indestructible")],
    );
    let done = resolve_combat(&state, block_with(attacker, &blockers));

    assert_eq!(done.players[1].battlefield.len(), 1);
    assert_eq!(done.players[1].life, 20);
}
