//! Core card and ability value types

pub mod ability;
pub mod card;
pub mod deck;
pub mod types;

pub use ability::{Ability, DamageTarget, Keyword, PtTarget};
pub use card::Card;
pub use deck::{Deck, DECK_SIZE};
pub use types::{CardName, CardType, Color, Subtype, Supertype};
