//! The structured ability set lifted from oracle text

use serde::{Deserialize, Serialize};
use std::fmt;

/// Evergreen keyword abilities
///
/// Parameterized keywords (ward, protection) carry their qualifier as the
/// raw printed string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Flying,
    FirstStrike,
    DoubleStrike,
    Trample,
    Deathtouch,
    Lifelink,
    Reach,
    Menace,
    Defender,
    Vigilance,
    Indestructible,
    Haste,
    Hexproof,
    Flash,
    /// Ward cost as the printed symbol block (e.g. `"{2}"`)
    Ward(String),
    /// Protection qualifier as printed (e.g. `"red"`, `"creatures"`)
    Protection(String),
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keyword::Flying => write!(f, "flying"),
            Keyword::FirstStrike => write!(f, "first strike"),
            Keyword::DoubleStrike => write!(f, "double strike"),
            Keyword::Trample => write!(f, "trample"),
            Keyword::Deathtouch => write!(f, "deathtouch"),
            Keyword::Lifelink => write!(f, "lifelink"),
            Keyword::Reach => write!(f, "reach"),
            Keyword::Menace => write!(f, "menace"),
            Keyword::Defender => write!(f, "defender"),
            Keyword::Vigilance => write!(f, "vigilance"),
            Keyword::Indestructible => write!(f, "indestructible"),
            Keyword::Haste => write!(f, "haste"),
            Keyword::Hexproof => write!(f, "hexproof"),
            Keyword::Flash => write!(f, "flash"),
            Keyword::Ward(cost) => write!(f, "ward {cost}"),
            Keyword::Protection(from) => write!(f, "protection from {from}"),
        }
    }
}

/// What a damage effect may hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageTarget {
    AnyTarget,
    Creature,
    Player,
    Opponent,
}

/// Which creatures a static power/toughness modifier applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PtTarget {
    /// The permanent carrying the ability
    Itself,
    EnchantedCreature,
    EquippedCreature,
    OtherCreaturesYouControl,
    CreaturesYouControl,
}

/// One structured ability of a card
///
/// The parser emits `Unresolved` for any line it cannot classify; a single
/// `Unresolved` anywhere in either deck poisons the matchup (it is routed
/// to an external judge rather than guessed at).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    Keyword(Keyword),

    StaticPtModifier {
        power: i32,
        toughness: i32,
        target: PtTarget,
        condition: Option<String>,
    },

    EtbDamage {
        amount: i32,
        target: DamageTarget,
    },

    EtbLifeGain {
        amount: i32,
    },

    EtbCreateToken {
        count: u32,
        power: i32,
        toughness: i32,
        keywords: Vec<Keyword>,
    },

    ActivatedTapDamage {
        amount: i32,
        target: DamageTarget,
    },

    ActivatedTapLifeGain {
        amount: i32,
    },

    Unresolved {
        text: String,
        reason: String,
    },
}

impl Ability {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Ability::Unresolved { .. })
    }

    /// The keyword carried by this ability, if it is a keyword ability.
    pub fn keyword(&self) -> Option<&Keyword> {
        match self {
            Ability::Keyword(kw) => Some(kw),
            _ => None,
        }
    }
}
