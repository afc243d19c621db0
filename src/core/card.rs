//! Card value type
//!
//! A `Card` is an identity-free immutable value: two copies of the same
//! printing compare equal. Identity on the battlefield lives in
//! `game::Permanent`, not here.

use crate::core::{Ability, CardName, CardType, Color, Keyword, Subtype, Supertype};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card name (e.g. "Grizzly Bears")
    pub name: CardName,

    /// Printed mana cost string, display only (e.g. "{1}{G}")
    pub mana_cost: String,

    /// Converted (total) cost
    pub converted_cost: u32,

    /// Colors of the card; empty for colorless
    pub colors: SmallVec<[Color; 2]>,

    /// Card types (a card can be multiple types)
    pub types: SmallVec<[CardType; 2]>,

    /// Supertypes (e.g. "Legendary")
    pub supertypes: SmallVec<[Supertype; 1]>,

    /// Subtypes (e.g. "Bear", "Aura")
    pub subtypes: SmallVec<[Subtype; 2]>,

    /// Original oracle text, kept for display
    pub oracle_text: String,

    /// Printed power (creatures; variable printings normalize to 0)
    pub power: Option<i32>,

    /// Printed toughness
    pub toughness: Option<i32>,

    /// Printed loyalty (planeswalkers)
    pub loyalty: Option<i32>,

    /// Structured abilities lifted from the oracle text
    pub abilities: Vec<Ability>,

    /// Stable external id (catalog key); empty for synthesized cards
    pub external_id: String,
}

impl Card {
    /// Create a card with the given name and no other properties set.
    pub fn new(name: impl Into<CardName>) -> Self {
        Card {
            name: name.into(),
            mana_cost: String::new(),
            converted_cost: 0,
            colors: SmallVec::new(),
            types: SmallVec::new(),
            supertypes: SmallVec::new(),
            subtypes: SmallVec::new(),
            oracle_text: String::new(),
            power: None,
            toughness: None,
            loyalty: None,
            abilities: Vec::new(),
            external_id: String::new(),
        }
    }

    pub fn is_type(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    pub fn is_creature(&self) -> bool {
        self.is_type(CardType::Creature)
    }

    /// True if any ability of this card failed to parse.
    pub fn has_unresolved_ability(&self) -> bool {
        self.abilities.iter().any(Ability::is_unresolved)
    }

    /// All keyword abilities of this card.
    pub fn keywords(&self) -> impl Iterator<Item = &Keyword> {
        self.abilities.iter().filter_map(Ability::keyword)
    }

    fn has_keyword(&self, keyword: &Keyword) -> bool {
        self.keywords().any(|kw| kw == keyword)
    }

    pub fn has_flying(&self) -> bool {
        self.has_keyword(&Keyword::Flying)
    }

    pub fn has_first_strike(&self) -> bool {
        self.has_keyword(&Keyword::FirstStrike)
    }

    pub fn has_double_strike(&self) -> bool {
        self.has_keyword(&Keyword::DoubleStrike)
    }

    /// Deals damage in the regular combat damage step.
    pub fn has_normal_strike(&self) -> bool {
        !self.has_first_strike() || self.has_double_strike()
    }

    pub fn has_trample(&self) -> bool {
        self.has_keyword(&Keyword::Trample)
    }

    pub fn has_deathtouch(&self) -> bool {
        self.has_keyword(&Keyword::Deathtouch)
    }

    pub fn has_lifelink(&self) -> bool {
        self.has_keyword(&Keyword::Lifelink)
    }

    pub fn has_reach(&self) -> bool {
        self.has_keyword(&Keyword::Reach)
    }

    pub fn has_menace(&self) -> bool {
        self.has_keyword(&Keyword::Menace)
    }

    pub fn has_defender(&self) -> bool {
        self.has_keyword(&Keyword::Defender)
    }

    pub fn has_vigilance(&self) -> bool {
        self.has_keyword(&Keyword::Vigilance)
    }

    pub fn has_indestructible(&self) -> bool {
        self.has_keyword(&Keyword::Indestructible)
    }

    pub fn has_haste(&self) -> bool {
        self.has_keyword(&Keyword::Haste)
    }

    /// Printed power, plus this card's own self-targeted static modifiers.
    ///
    /// Modifiers granted by other permanents are applied at the battlefield
    /// level (`game::PlayerState::effective_power`).
    pub fn base_power(&self) -> i32 {
        self.power.unwrap_or(0) + self.self_pt_modifier().0
    }

    /// Printed toughness, plus self-targeted static modifiers.
    pub fn base_toughness(&self) -> i32 {
        self.toughness.unwrap_or(0) + self.self_pt_modifier().1
    }

    fn self_pt_modifier(&self) -> (i32, i32) {
        let mut total = (0, 0);
        for ability in &self.abilities {
            if let Ability::StaticPtModifier {
                power,
                toughness,
                target: crate::core::PtTarget::Itself,
                condition: None,
            } = ability
            {
                total.0 += power;
                total.1 += toughness;
            }
        }
        total
    }
}
