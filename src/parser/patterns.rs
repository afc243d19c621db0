//! Rule table for the oracle-text parser
//!
//! Each rule is a lazily-compiled case-insensitive regex over one line of
//! oracle text. Rules are tried in precedence order by `parser::parse`;
//! the first match wins.

use crate::core::Keyword;
use regex::Regex;
use std::sync::LazyLock;

/// Reminder text in parentheses, stripped from keyword lines only.
pub static REMINDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// `ward {2}` — the cost is the full symbol block.
pub static WARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^ward\s+((?:\{[^}]+\})+)\s*$").unwrap());

/// `protection from red`, optionally followed by reminder text.
pub static PROTECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^protection from ([a-z][a-z ]*?)\s*(?:\([^)]*\))?\s*\.?\s*$").unwrap()
});

/// `when ~ enters (the battlefield), (it) deals N damage to <target>`
pub static ETB_DAMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^when .+? enters(?: the battlefield)?, (?:it )?deals (\d+) damage to ([^.]+?)\.?\s*$")
        .unwrap()
});

/// `when ~ enters (the battlefield), (you) gain N life`
pub static ETB_LIFE_GAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^when .+? enters(?: the battlefield)?, (?:you )?gain (\d+) life\.?\s*$")
        .unwrap()
});

/// `when ~ enters (the battlefield), create [a|an|two|...] P/T ... token(s)`
pub static ETB_CREATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^when .+? enters(?: the battlefield)?, create (?:(a|an|one|two|three|four|five|six) )?(\d+)/(\d+)(.*?\btokens?\b.*)$",
    )
    .unwrap()
});

/// `{T}...: ... deals N damage to <target>`
pub static TAP_DAMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\{t\}[^:]*:\s*.*?deals (\d+) damage to ([^.]+?)\.?\s*$").unwrap()
});

/// `{T}...: ... gain N life`
pub static TAP_LIFE_GAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\{t\}[^:]*:\s*.*?gain (\d+) life\.?\s*$").unwrap());

/// Static anthem / attachment pump. Anchored to end of line so that lines
/// granting anything beyond the +P/+T stay unresolved.
pub static STATIC_PT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(other creatures you control|enchanted creature|equipped creature|creatures you control) gets? ([+-]\d+)/([+-]\d+)\.?\s*$",
    )
    .unwrap()
});

/// Unparameterized keywords recognized on keyword lines, in canonical
/// order (also the emission order for token keyword sets).
pub fn simple_keyword(token: &str) -> Option<Keyword> {
    match token {
        "flying" => Some(Keyword::Flying),
        "first strike" => Some(Keyword::FirstStrike),
        "double strike" => Some(Keyword::DoubleStrike),
        "trample" => Some(Keyword::Trample),
        "deathtouch" => Some(Keyword::Deathtouch),
        "lifelink" => Some(Keyword::Lifelink),
        "reach" => Some(Keyword::Reach),
        "menace" => Some(Keyword::Menace),
        "defender" => Some(Keyword::Defender),
        "vigilance" => Some(Keyword::Vigilance),
        "indestructible" => Some(Keyword::Indestructible),
        "haste" => Some(Keyword::Haste),
        "hexproof" => Some(Keyword::Hexproof),
        "flash" => Some(Keyword::Flash),
        _ => None,
    }
}

const SIMPLE_KEYWORD_NAMES: &[&str] = &[
    "flying",
    "first strike",
    "double strike",
    "trample",
    "deathtouch",
    "lifelink",
    "reach",
    "menace",
    "defender",
    "vigilance",
    "indestructible",
    "haste",
    "hexproof",
    "flash",
];

/// One comma-separated token of a keyword line. Accepts the
/// parameterized forms too, so `Flying, ward {2}` parses as a keyword
/// line.
pub fn keyword_token(token: &str) -> Option<Keyword> {
    let token = token.trim();
    if let Some(kw) = simple_keyword(token) {
        return Some(kw);
    }
    if let Some(caps) = WARD.captures(token) {
        return Some(Keyword::Ward(caps[1].to_string()));
    }
    if let Some(caps) = PROTECTION.captures(token) {
        return Some(Keyword::Protection(caps[1].trim().to_lowercase()));
    }
    None
}

/// Scan free text for keyword names (used for token descriptions such as
/// `"white Soldier creature token with flying"`). Keywords come out in
/// canonical order.
pub fn scan_keywords(text: &str) -> Vec<Keyword> {
    let lowered = text.to_lowercase();
    SIMPLE_KEYWORD_NAMES
        .iter()
        .filter(|name| contains_word(&lowered, name))
        .filter_map(|name| simple_keyword(name))
        .collect()
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let at = start + pos;
        let end = at + needle.len();
        let left_ok = at == 0 || !haystack.as_bytes()[at - 1].is_ascii_alphanumeric();
        let right_ok =
            end == haystack.len() || !haystack.as_bytes()[end].is_ascii_alphanumeric();
        if left_ok && right_ok {
            return true;
        }
        start = at + 1;
    }
    false
}

/// Count word for token creation (`create two 1/1 ... tokens`).
pub fn count_word(word: &str) -> u32 {
    match word {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        // "a" / "an"
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_tokens() {
        assert_eq!(keyword_token("flying"), Some(Keyword::Flying));
        assert_eq!(keyword_token("first strike"), Some(Keyword::FirstStrike));
        assert_eq!(
            keyword_token("ward {2}"),
            Some(Keyword::Ward("{2}".to_string()))
        );
        assert_eq!(
            keyword_token("protection from red"),
            Some(Keyword::Protection("red".to_string()))
        );
        assert_eq!(keyword_token("banding"), None);
    }

    #[test]
    fn test_scan_keywords_word_boundaries() {
        assert_eq!(
            scan_keywords("green Spider creature token with reach"),
            vec![Keyword::Reach]
        );
        // "preach" must not read as reach
        assert!(scan_keywords("token that can preach").is_empty());
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_word("a"), 1);
        assert_eq!(count_word("an"), 1);
        assert_eq!(count_word("three"), 3);
        assert_eq!(count_word("six"), 6);
    }
}
