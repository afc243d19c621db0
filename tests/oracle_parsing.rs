//! Parser contract tests
//!
//! The parser must be conservative: anything it cannot classify exactly
//! comes back as `Unresolved` rather than a best-effort guess, because
//! unresolved cards are routed to a human judge instead of being
//! simulated wrongly.

use tcb_engine::core::{Ability, DamageTarget, Keyword};
use tcb_engine::parser;

#[test]
fn test_single_keyword_line() {
    assert_eq!(
        parser::parse("Flying"),
        vec![Ability::Keyword(Keyword::Flying)]
    );
}

#[test]
fn test_keyword_list_preserves_order() {
    assert_eq!(
        parser::parse("Flying, first strike"),
        vec![
            Ability::Keyword(Keyword::Flying),
            Ability::Keyword(Keyword::FirstStrike),
        ]
    );
}

#[test]
fn test_reminder_text_is_ignored_on_keyword_lines() {
    assert_eq!(
        parser::parse("Deathtouch (Any amount of damage this deals to a creature is enough to destroy it.)"),
        vec![Ability::Keyword(Keyword::Deathtouch)]
    );
}

#[test]
fn test_etb_damage_any_target() {
    assert_eq!(
        parser::parse("When X enters the battlefield, it deals 1 damage to any target"),
        vec![Ability::EtbDamage {
            amount: 1,
            target: DamageTarget::AnyTarget,
        }]
    );
}

#[test]
fn test_unmatched_line_carries_original_text_and_reason() {
    assert_eq!(
        parser::parse("Whenever a creature dies, draw a card."),
        vec![Ability::Unresolved {
            text: "Whenever a creature dies, draw a card.".to_string(),
            reason: "no matching parser rule".to_string(),
        }]
    );
}

#[test]
fn test_full_card_text_lifts_line_by_line() {
    let parsed = parser::parse(
        "Flying, vigilance\n\
         When Seraph of Dawn enters the battlefield, you gain 4 life.\n\
         Other creatures you control get +0/+1.",
    );
    assert_eq!(
        parsed,
        vec![
            Ability::Keyword(Keyword::Flying),
            Ability::Keyword(Keyword::Vigilance),
            Ability::EtbLifeGain { amount: 4 },
            Ability::StaticPtModifier {
                power: 0,
                toughness: 1,
                target: tcb_engine::core::PtTarget::OtherCreaturesYouControl,
                condition: None,
            },
        ]
    );
}

#[test]
fn test_one_bad_line_does_not_poison_good_lines() {
    let parsed = parser::parse("Trample\nProtect all your dreams.");
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0], Ability::Keyword(Keyword::Trample));
    assert!(parsed[1].is_unresolved());
}

#[test]
fn test_whitespace_only_input_is_empty() {
    assert!(parser::parse("\n   \n").is_empty());
}

#[test]
fn test_ward_cost_is_preserved() {
    assert_eq!(
        parser::parse("Ward {3}"),
        vec![Ability::Keyword(Keyword::Ward("{3}".to_string()))]
    );
}

#[test]
fn test_parameterized_keywords_in_keyword_list() {
    assert_eq!(
        parser::parse("Flying, ward {2}"),
        vec![
            Ability::Keyword(Keyword::Flying),
            Ability::Keyword(Keyword::Ward("{2}".to_string())),
        ]
    );
}
