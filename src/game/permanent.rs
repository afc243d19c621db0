//! Battlefield permanents

use crate::core::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer id of a permanent, unique within one game and never reused.
///
/// Ordered so that id-keyed maps iterate deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PermanentId(u32);

impl PermanentId {
    pub fn new(id: u32) -> Self {
        PermanentId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PermanentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card on the battlefield.
///
/// The wrapped [`Card`] stays immutable; all mutable battlefield state
/// (tap status, marked damage) lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permanent {
    pub id: PermanentId,
    pub card: Card,
    pub tapped: bool,
    pub summoning_sick: bool,
    /// Combat damage marked this turn; cleared when the turn advances.
    pub damage_marked: i32,
    pub is_token: bool,
}

impl Permanent {
    /// A freshly resolved permanent: untapped and summoning sick.
    pub fn enters(id: PermanentId, card: Card) -> Self {
        Permanent {
            id,
            card,
            tapped: false,
            summoning_sick: true,
            damage_marked: 0,
            is_token: false,
        }
    }

    pub fn enters_token(id: PermanentId, card: Card) -> Self {
        Permanent {
            is_token: true,
            ..Permanent::enters(id, card)
        }
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }
}
