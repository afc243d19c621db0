//! Oracle-text parser
//!
//! Lifts printed card text into the structured [`Ability`] set. The parser
//! is deliberately conservative: each line is matched against an ordered
//! rule list and anything that does not match exactly becomes
//! [`Ability::Unresolved`], which the matchup driver surfaces to the
//! caller instead of guessing at semantics.

mod patterns;

use crate::core::{Ability, DamageTarget, PtTarget};
use patterns as pat;

pub use patterns::scan_keywords;

const NO_RULE: &str = "no matching parser rule";
const BAD_NUMBER: &str = "numeric field out of range";

/// Parse a card's full oracle text into abilities, one line at a time.
///
/// Empty or whitespace-only input yields an empty list. Lines that match
/// no rule each yield exactly one `Unresolved` ability carrying the
/// original line.
pub fn parse(oracle_text: &str) -> Vec<Ability> {
    oracle_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Vec<Ability> {
    // Rule 1: a comma-separated list where every token is a known keyword.
    // Reminder text is stripped here and only here; the later rules match
    // the raw line so embedded parentheticals cannot disrupt capture.
    if let Some(keywords) = keyword_line(line) {
        return keywords;
    }

    // Rule 2: ward {cost}
    if let Some(caps) = pat::WARD.captures(line) {
        return vec![Ability::Keyword(crate::core::Keyword::Ward(
            caps[1].to_string(),
        ))];
    }

    // Rule 3: protection from <qualifier>
    if let Some(caps) = pat::PROTECTION.captures(line) {
        return vec![Ability::Keyword(crate::core::Keyword::Protection(
            caps[1].trim().to_lowercase(),
        ))];
    }

    // Rule 4: ETB damage
    if let Some(caps) = pat::ETB_DAMAGE.captures(line) {
        return match parse_amount(&caps[1]) {
            Some(amount) => vec![Ability::EtbDamage {
                amount,
                target: damage_target(&caps[2]),
            }],
            None => vec![unresolved(line, BAD_NUMBER)],
        };
    }

    // Rule 5: ETB life gain
    if let Some(caps) = pat::ETB_LIFE_GAIN.captures(line) {
        return match parse_amount(&caps[1]) {
            Some(amount) => vec![Ability::EtbLifeGain { amount }],
            None => vec![unresolved(line, BAD_NUMBER)],
        };
    }

    // Rule 6: ETB token creation
    if let Some(caps) = pat::ETB_CREATE_TOKEN.captures(line) {
        let count = caps
            .get(1)
            .map_or(1, |word| pat::count_word(&word.as_str().to_lowercase()));
        let (power, toughness) = match (parse_amount(&caps[2]), parse_amount(&caps[3])) {
            (Some(p), Some(t)) => (p, t),
            _ => return vec![unresolved(line, BAD_NUMBER)],
        };
        return vec![Ability::EtbCreateToken {
            count,
            power,
            toughness,
            keywords: pat::scan_keywords(&caps[4]),
        }];
    }

    // Rule 7: {T}-activated damage
    if let Some(caps) = pat::TAP_DAMAGE.captures(line) {
        return match parse_amount(&caps[1]) {
            Some(amount) => vec![Ability::ActivatedTapDamage {
                amount,
                target: damage_target(&caps[2]),
            }],
            None => vec![unresolved(line, BAD_NUMBER)],
        };
    }

    // Rule 8: {T}-activated life gain
    if let Some(caps) = pat::TAP_LIFE_GAIN.captures(line) {
        return match parse_amount(&caps[1]) {
            Some(amount) => vec![Ability::ActivatedTapLifeGain { amount }],
            None => vec![unresolved(line, BAD_NUMBER)],
        };
    }

    // Rule 9: static power/toughness modifier
    if let Some(caps) = pat::STATIC_PT.captures(line) {
        let (power, toughness) = match (parse_amount(&caps[2]), parse_amount(&caps[3])) {
            (Some(p), Some(t)) => (p, t),
            _ => return vec![unresolved(line, BAD_NUMBER)],
        };
        return vec![Ability::StaticPtModifier {
            power,
            toughness,
            target: pt_target(&caps[1]),
            condition: None,
        }];
    }

    vec![unresolved(line, NO_RULE)]
}

fn keyword_line(line: &str) -> Option<Vec<Ability>> {
    let stripped = pat::REMINDER.replace_all(line, "");
    let stripped = stripped.trim().trim_end_matches('.');
    if stripped.is_empty() {
        return None;
    }
    stripped
        .split(',')
        .map(|token| pat::keyword_token(&token.to_lowercase()).map(Ability::Keyword))
        .collect()
}

fn unresolved(line: &str, reason: &str) -> Ability {
    Ability::Unresolved {
        text: line.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_amount(digits: &str) -> Option<i32> {
    digits.parse().ok()
}

/// Derive the damage target by substring containment, in the order
/// creature, opponent, player, any target.
fn damage_target(text: &str) -> DamageTarget {
    let text = text.to_lowercase();
    if text.contains("creature") {
        DamageTarget::Creature
    } else if text.contains("opponent") {
        DamageTarget::Opponent
    } else if text.contains("player") {
        DamageTarget::Player
    } else {
        DamageTarget::AnyTarget
    }
}

fn pt_target(text: &str) -> PtTarget {
    match text.to_lowercase().as_str() {
        "other creatures you control" => PtTarget::OtherCreaturesYouControl,
        "enchanted creature" => PtTarget::EnchantedCreature,
        "equipped creature" => PtTarget::EquippedCreature,
        _ => PtTarget::CreaturesYouControl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Keyword;

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \n\n  ").is_empty());
    }

    #[test]
    fn test_single_keyword() {
        assert_eq!(parse("Flying"), vec![Ability::Keyword(Keyword::Flying)]);
    }

    #[test]
    fn test_keyword_list_in_order() {
        assert_eq!(
            parse("Flying, first strike"),
            vec![
                Ability::Keyword(Keyword::Flying),
                Ability::Keyword(Keyword::FirstStrike)
            ]
        );
    }

    #[test]
    fn test_reminder_text_stripped_from_keyword_line() {
        assert_eq!(
            parse("Deathtouch (Any amount of damage this deals to a creature is enough to destroy it.)"),
            vec![Ability::Keyword(Keyword::Deathtouch)]
        );
    }

    #[test]
    fn test_keyword_line_with_unknown_token_falls_through() {
        let parsed = parse("Flying, banding");
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].is_unresolved());
    }

    #[test]
    fn test_ward_and_protection() {
        assert_eq!(
            parse("Ward {2}"),
            vec![Ability::Keyword(Keyword::Ward("{2}".to_string()))]
        );
        assert_eq!(
            parse("Protection from red (This creature can't be blocked, targeted, or dealt damage by anything red.)"),
            vec![Ability::Keyword(Keyword::Protection("red".to_string()))]
        );
    }

    #[test]
    fn test_etb_damage_targets() {
        assert_eq!(
            parse("When Flametongue enters the battlefield, it deals 4 damage to target creature."),
            vec![Ability::EtbDamage {
                amount: 4,
                target: DamageTarget::Creature
            }]
        );
        assert_eq!(
            parse("When Shock Elemental enters, it deals 1 damage to any target."),
            vec![Ability::EtbDamage {
                amount: 1,
                target: DamageTarget::AnyTarget
            }]
        );
        assert_eq!(
            parse("When Banefire Imp enters the battlefield, it deals 2 damage to each opponent."),
            vec![Ability::EtbDamage {
                amount: 2,
                target: DamageTarget::Opponent
            }]
        );
        assert_eq!(
            parse("When Fiery Visitor enters the battlefield, it deals 3 damage to target player."),
            vec![Ability::EtbDamage {
                amount: 3,
                target: DamageTarget::Player
            }]
        );
    }

    #[test]
    fn test_etb_life_gain() {
        assert_eq!(
            parse("When Healer's Hawk enters the battlefield, you gain 2 life."),
            vec![Ability::EtbLifeGain { amount: 2 }]
        );
    }

    #[test]
    fn test_etb_create_tokens() {
        assert_eq!(
            parse("When Grave Titan enters the battlefield, create two 2/2 black Zombie creature tokens."),
            vec![Ability::EtbCreateToken {
                count: 2,
                power: 2,
                toughness: 2,
                keywords: vec![]
            }]
        );
        assert_eq!(
            parse("When Aerie Keeper enters, create a 1/1 white Bird creature token with flying."),
            vec![Ability::EtbCreateToken {
                count: 1,
                power: 1,
                toughness: 1,
                keywords: vec![Keyword::Flying]
            }]
        );
    }

    #[test]
    fn test_activated_tap_abilities() {
        assert_eq!(
            parse("{T}: Prodigal Sorcerer deals 1 damage to any target."),
            vec![Ability::ActivatedTapDamage {
                amount: 1,
                target: DamageTarget::AnyTarget
            }]
        );
        assert_eq!(
            parse("{T}, {2}: You gain 1 life."),
            vec![Ability::ActivatedTapLifeGain { amount: 1 }]
        );
    }

    #[test]
    fn test_static_pt_targets() {
        assert_eq!(
            parse("Other creatures you control get +1/+1."),
            vec![Ability::StaticPtModifier {
                power: 1,
                toughness: 1,
                target: PtTarget::OtherCreaturesYouControl,
                condition: None
            }]
        );
        assert_eq!(
            parse("Enchanted creature gets +2/+2."),
            vec![Ability::StaticPtModifier {
                power: 2,
                toughness: 2,
                target: PtTarget::EnchantedCreature,
                condition: None
            }]
        );
        assert_eq!(
            parse("Creatures you control get +1/-1."),
            vec![Ability::StaticPtModifier {
                power: 1,
                toughness: -1,
                target: PtTarget::CreaturesYouControl,
                condition: None
            }]
        );
    }

    #[test]
    fn test_anthem_with_extra_grants_stays_unresolved() {
        // Conservative by design: the pump is recognizable but the line
        // grants more than the rule captures.
        let parsed = parse("Creatures you control get +1/+1 and have vigilance.");
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].is_unresolved());
    }

    #[test]
    fn test_unmatched_line() {
        let parsed = parse("Whenever a creature dies, draw a card.");
        assert_eq!(
            parsed,
            vec![Ability::Unresolved {
                text: "Whenever a creature dies, draw a card.".to_string(),
                reason: "no matching parser rule".to_string(),
            }]
        );
    }

    #[test]
    fn test_multiline_mixed() {
        let parsed = parse("Flying\nWhen Thragtusk enters the battlefield, you gain 5 life.");
        assert_eq!(
            parsed,
            vec![
                Ability::Keyword(Keyword::Flying),
                Ability::EtbLifeGain { amount: 5 },
            ]
        );
    }

    #[test]
    fn test_overflowing_number_is_unresolved() {
        let parsed =
            parse("When Hugeness enters the battlefield, it deals 99999999999 damage to any target.");
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].is_unresolved());
    }
}
