//! Deck type for the three-card format

use crate::core::Card;
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Maximum (and nominal) deck size in Three-Card Blind.
pub const DECK_SIZE: usize = 3;

/// A named list of at most [`DECK_SIZE`] cards.
///
/// The deck doubles as the opening hand: there is no library in this
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    name: String,
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>, cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() || cards.len() > DECK_SIZE {
            return Err(EngineError::InvalidDeckSize {
                actual: cards.len(),
                max: DECK_SIZE,
            });
        }
        Ok(Deck {
            name: name.into(),
            cards,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Names of cards carrying any unresolved ability, in deck order.
    pub fn unresolved_card_names(&self) -> Vec<&str> {
        self.cards
            .iter()
            .filter(|c| c.has_unresolved_ability())
            .map(|c| c.name.as_str())
            .collect()
    }
}
