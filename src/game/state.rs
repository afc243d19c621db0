//! Immutable per-turn game state
//!
//! `GameState` is a plain value designed to be cheaply clonable for tree
//! search: every action application produces a fresh state and branches of
//! the search share nothing observable.

use crate::core::{Ability, Card, Deck, PtTarget};
use crate::game::{CombatState, Permanent, PermanentId, Phase};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

pub const STARTING_LIFE: i32 = 20;

/// One player's side of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub life: i32,
    pub hand: Vec<Card>,
    pub battlefield: Vec<Permanent>,
    pub graveyard: Vec<Card>,
}

impl PlayerState {
    fn opening(hand: Vec<Card>) -> Self {
        PlayerState {
            life: STARTING_LIFE,
            hand,
            battlefield: Vec::new(),
            graveyard: Vec::new(),
        }
    }

    pub fn permanent(&self, id: PermanentId) -> Option<&Permanent> {
        self.battlefield.iter().find(|p| p.id == id)
    }

    pub fn permanent_mut(&mut self, id: PermanentId) -> Option<&mut Permanent> {
        self.battlefield.iter_mut().find(|p| p.id == id)
    }

    /// Permanent lookup that must succeed; a miss is an internal
    /// invariant breach (combat referencing a vanished id) and aborts.
    pub fn expect_permanent(&self, id: PermanentId) -> &Permanent {
        self.permanent(id)
            .unwrap_or_else(|| panic!("invariant breach: permanent {id} not on battlefield"))
    }

    /// Power after static modifiers from this battlefield.
    pub fn effective_power(&self, perm: &Permanent) -> i32 {
        perm.card.base_power() + self.granted_pt(perm).0
    }

    /// Toughness after static modifiers from this battlefield.
    pub fn effective_toughness(&self, perm: &Permanent) -> i32 {
        perm.card.base_toughness() + self.granted_pt(perm).1
    }

    /// Sum of anthem-style modifiers applying to `perm`. Only creatures
    /// receive them; conditional modifiers are inert; attachment-scoped
    /// targets (enchanted/equipped) never resolve because attachment is
    /// not modeled.
    fn granted_pt(&self, perm: &Permanent) -> (i32, i32) {
        if !perm.card.is_creature() {
            return (0, 0);
        }
        let mut total = (0, 0);
        for source in &self.battlefield {
            for ability in &source.card.abilities {
                if let Ability::StaticPtModifier {
                    power,
                    toughness,
                    target,
                    condition: None,
                } = ability
                {
                    let applies = match target {
                        PtTarget::CreaturesYouControl => true,
                        PtTarget::OtherCreaturesYouControl => source.id != perm.id,
                        PtTarget::Itself
                        | PtTarget::EnchantedCreature
                        | PtTarget::EquippedCreature => false,
                    };
                    if applies {
                        total.0 += power;
                        total.1 += toughness;
                    }
                }
            }
        }
        total
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Whose turn it is (0 or 1)
    pub active_player: usize,

    pub players: [PlayerState; 2],

    /// Turn number, starting at 1; incremented when play returns to
    /// player 0
    pub turn: u32,

    pub phase: Phase,

    /// Present from attacker declaration until combat damage resolves
    pub combat: Option<CombatState>,

    /// Canonical keys of positions seen at main-precombat checkpoints,
    /// used for stalemate-by-repetition detection
    pub state_history: FxHashSet<String>,

    next_permanent_id: u32,
}

impl GameState {
    /// Opening position: both three-card lists in hand, life at 20,
    /// player 0 to act in her precombat main phase of turn 1.
    pub fn initial(deck0: &Deck, deck1: &Deck) -> Self {
        GameState {
            active_player: 0,
            players: [
                PlayerState::opening(deck0.cards().to_vec()),
                PlayerState::opening(deck1.cards().to_vec()),
            ],
            turn: 1,
            phase: Phase::MainPrecombat,
            combat: None,
            state_history: FxHashSet::default(),
            next_permanent_id: 1,
        }
    }

    /// The other player.
    pub fn opponent(player: usize) -> usize {
        1 - player
    }

    /// The player defending in combat this turn.
    pub fn defending_player(&self) -> usize {
        Self::opponent(self.active_player)
    }

    /// Allocate a fresh permanent id; ids are never reused in a game.
    pub(crate) fn allocate_permanent_id(&mut self) -> PermanentId {
        let id = PermanentId::new(self.next_permanent_id);
        self.next_permanent_id += 1;
        id
    }

    /// True if `perm` may be declared as an attacker.
    pub fn can_attack(perm: &Permanent) -> bool {
        perm.card.is_creature()
            && !perm.tapped
            && !perm.card.has_defender()
            && (!perm.summoning_sick || perm.card.has_haste())
    }

    /// True if `blocker` may block `attacker`. Menace is a property of
    /// the whole assignment and is enforced by the enumeration, not here.
    pub fn can_block(blocker: &Permanent, attacker: &Permanent) -> bool {
        blocker.card.is_creature()
            && !blocker.tapped
            && (!attacker.card.has_flying()
                || blocker.card.has_flying()
                || blocker.card.has_reach())
    }
}
