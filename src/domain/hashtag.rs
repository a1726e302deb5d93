//! Hashtag tokens and extraction from post text.
//!
//! A hashtag is `#` followed by two or more ASCII letters, digits or
//! underscores. Tokens are stored lowercase and without the leading `#`,
//! so `#Rust`, `#RUST` and `#rust` all collapse to `rust`.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Minimum number of word characters after the `#`.
pub const MIN_HASHTAG_LEN: usize = 2;

static HASHTAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    HASHTAG_PATTERN.get_or_init(|| {
        // Greedy run, so `#abc` never yields `ab`.
        Regex::new(r"#([A-Za-z0-9_]{2,})").expect("hashtag pattern compiles")
    })
}

/// A normalised hashtag token: lowercase, no leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hashtag(String);

impl Hashtag {
    /// Normalise and validate a hashtag.
    ///
    /// Accepts the token with or without its leading `#` and in any case.
    pub fn try_new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = value.as_ref();
        let body = raw.strip_prefix('#').unwrap_or(raw);
        let valid = body.len() >= MIN_HASHTAG_LEN
            && body
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_');
        if !valid {
            return Err(DomainError::InvalidHashtag {
                value: raw.to_string(),
            });
        }
        Ok(Self(body.to_ascii_lowercase()))
    }

    /// The token without the leading `#`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token as it would be written in a post, e.g. `#rust`.
    #[must_use]
    pub fn to_tag(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for Hashtag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Hashtag {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl TryFrom<&str> for Hashtag {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl From<Hashtag> for String {
    fn from(tag: Hashtag) -> Self {
        tag.0
    }
}

/// Extract the set of hashtags mentioned in `text`.
///
/// Never fails: text without hashtags (or empty text) yields an empty set.
/// The returned set is ordered, which keeps downstream processing and logs
/// deterministic; callers must not rely on the order for meaning.
#[must_use]
pub fn extract_hashtags(text: &str) -> BTreeSet<Hashtag> {
    pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| Hashtag(m.as_str().to_ascii_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> BTreeSet<Hashtag> {
        values.iter().map(|v| Hashtag::try_new(v).unwrap()).collect()
    }

    #[test]
    fn duplicates_collapse_case_insensitively() {
        assert_eq!(
            extract_hashtags("Check #AI and #ai and #AI!"),
            tags(&["ai"])
        );
    }

    #[test]
    fn extracts_multiple_tags() {
        assert_eq!(
            extract_hashtags("Loving #rust and #systems"),
            tags(&["rust", "systems"])
        );
    }

    #[test]
    fn single_character_tags_are_ignored() {
        assert!(extract_hashtags("#a #b plan").is_empty());
        assert_eq!(extract_hashtags("#a #go"), tags(&["go"]));
    }

    #[test]
    fn empty_and_tagless_text_yield_empty_set() {
        assert!(extract_hashtags("").is_empty());
        assert!(extract_hashtags("no tags here, just # and ##").is_empty());
    }

    #[test]
    fn underscores_and_digits_are_word_characters() {
        assert_eq!(
            extract_hashtags("#web3 #seed_round #2024"),
            tags(&["web3", "seed_round", "2024"])
        );
    }

    #[test]
    fn tag_stops_at_punctuation() {
        assert_eq!(
            extract_hashtags("#startup-life, #funding."),
            tags(&["startup", "funding"])
        );
    }

    #[test]
    fn doubled_hash_still_matches_inner_tag() {
        assert_eq!(extract_hashtags("##growth"), tags(&["growth"]));
    }

    #[test]
    fn extraction_is_stable_under_reapplication() {
        let text = "Raised our #Seed! #AI #ai #ml_ops and #x";
        let first = extract_hashtags(text);
        let rendered: Vec<String> = first.iter().map(Hashtag::to_tag).collect();
        let second = extract_hashtags(&rendered.join(" "));
        assert_eq!(first, second);
    }

    #[test]
    fn try_new_normalises() {
        let tag = Hashtag::try_new("#FinTech").unwrap();
        assert_eq!(tag.as_str(), "fintech");
        assert_eq!(tag.to_tag(), "#fintech");
    }

    #[test]
    fn try_new_rejects_invalid() {
        for bad in ["", "#", "#a", "two words", "emoji🚀", "dash-ed"] {
            assert!(
                matches!(
                    Hashtag::try_new(bad),
                    Err(DomainError::InvalidHashtag { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
