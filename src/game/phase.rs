//! Turn phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of one turn.
///
/// `FirstStrikeDamage` only occurs when a first or double striker is in
/// combat; empty attacks jump straight to the next turn. The phase
/// machine is driven entirely by `actions::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    MainPrecombat,
    DeclareAttackers,
    DeclareBlockers,
    FirstStrikeDamage,
    CombatDamage,
    MainPostcombat,
    Cleanup,
}

impl Phase {
    /// Phases that offer no real choice: a single `Pass` resolves them.
    pub fn is_auto_resolve(&self) -> bool {
        matches!(
            self,
            Phase::FirstStrikeDamage | Phase::CombatDamage | Phase::Cleanup
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::MainPrecombat => "main_precombat",
            Phase::DeclareAttackers => "declare_attackers",
            Phase::DeclareBlockers => "declare_blockers",
            Phase::FirstStrikeDamage => "first_strike_damage",
            Phase::CombatDamage => "combat_damage",
            Phase::MainPostcombat => "main_postcombat",
            Phase::Cleanup => "cleanup",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_resolve_phases() {
        assert!(Phase::FirstStrikeDamage.is_auto_resolve());
        assert!(Phase::CombatDamage.is_auto_resolve());
        assert!(Phase::Cleanup.is_auto_resolve());
        assert!(!Phase::MainPrecombat.is_auto_resolve());
        assert!(!Phase::DeclareBlockers.is_auto_resolve());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Phase::MainPrecombat.to_string(), "main_precombat");
        assert_eq!(Phase::FirstStrikeDamage.to_string(), "first_strike_damage");
    }
}
