//! Combat: block-assignment enumeration and damage resolution
//!
//! Uses `BTreeMap` keyed by permanent id for deterministic iteration
//! order; the per-attacker blocker list is ordered and is the attacker's
//! damage-assignment order.

use crate::core::Card;
use crate::game::{GameState, Permanent, PermanentId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Mapping from attacker id to its ordered blockers. An attacker absent
/// from the map (or mapped to an empty list) is unblocked.
pub type BlockAssignment = BTreeMap<PermanentId, SmallVec<[PermanentId; 2]>>;

/// Combat state for the current combat phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// Attacking permanents, in declaration order
    pub attackers: SmallVec<[PermanentId; 4]>,

    /// Blocker assignment, set when blockers are declared
    pub blockers: BlockAssignment,
}

impl CombatState {
    pub fn new(attackers: SmallVec<[PermanentId; 4]>) -> Self {
        CombatState {
            attackers,
            blockers: BlockAssignment::new(),
        }
    }

    pub fn blockers_of(&self, attacker: PermanentId) -> &[PermanentId] {
        self.blockers.get(&attacker).map_or(&[], |b| b.as_slice())
    }

    pub fn is_blocked(&self, attacker: PermanentId) -> bool {
        !self.blockers_of(attacker).is_empty()
    }

    /// Drop destroyed permanents from both sides of the combat so a
    /// second damage step runs on the surviving set only.
    pub fn remove_destroyed(&mut self, destroyed: &[PermanentId]) {
        self.attackers.retain(|id| !destroyed.contains(id));
        self.blockers.retain(|attacker, _| !destroyed.contains(attacker));
        for blockers in self.blockers.values_mut() {
            blockers.retain(|id| !destroyed.contains(id));
        }
    }
}

/// Enumerate every legal block assignment.
///
/// Each potential blocker independently either declines to block or
/// blocks exactly one attacker it can legally block; the cartesian
/// product is then filtered so that any blocked menace attacker has at
/// least two blockers. Within an attacker's list, blockers appear in the
/// order they were considered (battlefield order), which becomes the
/// damage-assignment order.
pub fn enumerate_block_assignments(
    attackers: &[&Permanent],
    potential_blockers: &[&Permanent],
) -> Vec<BlockAssignment> {
    // Per blocker, the attackers it may legally block, in declared order.
    let legal: Vec<Vec<PermanentId>> = potential_blockers
        .iter()
        .map(|blocker| {
            attackers
                .iter()
                .filter(|attacker| GameState::can_block(blocker, attacker))
                .map(|attacker| attacker.id)
                .collect()
        })
        .collect();

    let mut assignments = Vec::new();
    let mut current = BlockAssignment::new();
    expand(potential_blockers, &legal, 0, &mut current, &mut assignments);

    assignments.retain(|assignment| menace_satisfied(attackers, assignment));
    assignments
}

fn expand(
    blockers: &[&Permanent],
    legal: &[Vec<PermanentId>],
    index: usize,
    current: &mut BlockAssignment,
    out: &mut Vec<BlockAssignment>,
) {
    if index == blockers.len() {
        out.push(current.clone());
        return;
    }

    // Option 1: this blocker does not block.
    expand(blockers, legal, index + 1, current, out);

    // Option 2: block one of the legal attackers.
    for &attacker in &legal[index] {
        current.entry(attacker).or_default().push(blockers[index].id);
        expand(blockers, legal, index + 1, current, out);
        let entry = current.get_mut(&attacker).expect("entry just inserted");
        entry.pop();
        if entry.is_empty() {
            current.remove(&attacker);
        }
    }
}

fn menace_satisfied(attackers: &[&Permanent], assignment: &BlockAssignment) -> bool {
    attackers.iter().all(|attacker| {
        if !attacker.card.has_menace() {
            return true;
        }
        let blockers = assignment.get(&attacker.id).map_or(0, |b| b.len());
        blockers == 0 || blockers >= 2
    })
}

/// Result of one combat damage step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatDamage {
    /// Permanents destroyed this step, in ascending id order
    pub destroyed: Vec<PermanentId>,

    /// Life gained/lost per player this step
    pub life_delta: [i32; 2],

    /// Damage dealt to each permanent this step, in ascending id order
    pub damage_marked: Vec<(PermanentId, i32)>,
}

#[derive(Default)]
struct DamageEntry {
    total: i32,
    from_deathtouch: bool,
}

fn strikes_in_step(card: &Card, is_first_strike: bool) -> bool {
    if is_first_strike {
        card.has_first_strike() || card.has_double_strike()
    } else {
        card.has_normal_strike()
    }
}

impl GameState {
    /// True if any attacker or assigned blocker deals first-strike-step
    /// damage, i.e. whether the extra damage step is needed at all.
    pub fn combat_needs_first_strike_step(&self) -> bool {
        let Some(combat) = &self.combat else {
            return false;
        };
        let attacker_side = &self.players[self.active_player];
        let defender_side = &self.players[self.defending_player()];

        combat.attackers.iter().any(|&id| {
            let attacker = attacker_side.expect_permanent(id);
            if attacker.card.has_first_strike() || attacker.card.has_double_strike() {
                return true;
            }
            combat.blockers_of(id).iter().any(|&bid| {
                let blocker = defender_side.expect_permanent(bid);
                blocker.card.has_first_strike() || blocker.card.has_double_strike()
            })
        })
    }

    /// Resolve one combat damage step without mutating the state.
    ///
    /// Previously marked damage (`Permanent::damage_marked`) counts
    /// against remaining toughness, which is how first-strike damage
    /// carries into the regular step. The caller applies the returned
    /// deltas, removes the destroyed set, and (after a first-strike
    /// step) re-runs with the survivors.
    pub fn resolve_combat_damage(&self, is_first_strike: bool) -> CombatDamage {
        let combat = self
            .combat
            .as_ref()
            .unwrap_or_else(|| panic!("invariant breach: damage step without combat state"));
        let attacker_side = self.active_player;
        let defender_side = self.defending_player();
        let attackers_at = &self.players[attacker_side];
        let defenders_at = &self.players[defender_side];

        let mut life_delta = [0i32; 2];
        let mut accumulated: BTreeMap<PermanentId, DamageEntry> = BTreeMap::new();

        // Attackers assign damage.
        for &attacker_id in &combat.attackers {
            let attacker = attackers_at.expect_permanent(attacker_id);
            if !strikes_in_step(&attacker.card, is_first_strike) {
                continue;
            }
            let power = attackers_at.effective_power(attacker);
            if power <= 0 {
                continue;
            }
            let deathtouch = attacker.card.has_deathtouch();
            let lifelink = attacker.card.has_lifelink();
            let blockers = combat.blockers_of(attacker_id);

            if blockers.is_empty() {
                life_delta[defender_side] -= power;
            } else {
                let mut remaining = power;
                for &blocker_id in blockers {
                    if remaining <= 0 {
                        break;
                    }
                    let blocker = defenders_at.expect_permanent(blocker_id);
                    let already =
                        blocker.damage_marked + accumulated.get(&blocker_id).map_or(0, |e| e.total);
                    let lethal = if deathtouch {
                        1
                    } else {
                        (defenders_at.effective_toughness(blocker) - already).max(0)
                    };
                    let assigned = remaining.min(lethal);
                    if assigned > 0 {
                        let entry = accumulated.entry(blocker_id).or_default();
                        entry.total += assigned;
                        entry.from_deathtouch |= deathtouch;
                        remaining -= assigned;
                    }
                }
                if remaining > 0 {
                    if attacker.card.has_trample() {
                        life_delta[defender_side] -= remaining;
                    } else {
                        // No trample: the full remainder lands on the
                        // last blocker in the assignment order.
                        let last = *blockers.last().expect("non-empty blocker list");
                        let entry = accumulated.entry(last).or_default();
                        entry.total += remaining;
                        entry.from_deathtouch |= deathtouch;
                    }
                }
            }

            // Lifelink counts every point this attacker dealt, whether to
            // creatures or the defending player.
            if lifelink {
                life_delta[attacker_side] += power;
            }
        }

        // Blockers strike back.
        for &attacker_id in &combat.attackers {
            for &blocker_id in combat.blockers_of(attacker_id) {
                let blocker = defenders_at.expect_permanent(blocker_id);
                if !strikes_in_step(&blocker.card, is_first_strike) {
                    continue;
                }
                let power = defenders_at.effective_power(blocker);
                if power <= 0 {
                    continue;
                }
                let entry = accumulated.entry(attacker_id).or_default();
                entry.total += power;
                entry.from_deathtouch |= blocker.card.has_deathtouch();
                if blocker.card.has_lifelink() {
                    life_delta[defender_side] += power;
                }
            }
        }

        // Destruction check over the summed damage of this step.
        let mut destroyed = Vec::new();
        for (&id, entry) in &accumulated {
            let (owner, perm) = if let Some(perm) = attackers_at.permanent(id) {
                (attackers_at, perm)
            } else {
                (defenders_at, defenders_at.expect_permanent(id))
            };
            if perm.card.has_indestructible() {
                continue;
            }
            let lethal = perm.damage_marked + entry.total >= owner.effective_toughness(perm);
            if lethal || (entry.from_deathtouch && entry.total > 0) {
                destroyed.push(id);
            }
        }

        CombatDamage {
            destroyed,
            life_delta,
            damage_marked: accumulated
                .into_iter()
                .map(|(id, entry)| (id, entry.total))
                .collect(),
        }
    }
}
