//! Keyword extraction.
//!
//! Text is lower-cased, stripped of everything but letters, digits and
//! whitespace, and split into tokens. Short tokens and stop words are
//! dropped, the rest are counted, and the most frequent come first.
//! Equal counts keep first-seen order.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Common function words that carry no topical signal.
pub const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "and", "or", "but", "in", "with", "to", "for",
    "of", "my", "i", "me", "you", "it", "that", "this", "was", "get", "have", "has", "had",
    "when", "where", "why", "how",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Keyword extraction tuning parameters.
#[derive(Debug, Clone)]
pub struct KeywordParams {
    /// Maximum number of keywords returned.
    pub max_keywords: usize,
    /// Tokens with fewer characters than this are dropped.
    pub min_token_len: usize,
    /// Stop words in addition to [`STOP_WORDS`].
    pub extra_stop_words: Vec<String>,
}

impl Default for KeywordParams {
    fn default() -> Self {
        Self {
            max_keywords: 5,
            min_token_len: 4,
            extra_stop_words: Vec::new(),
        }
    }
}

/// Extract up to five salient keywords, most frequent first.
pub fn extract_keywords(text: &str) -> Vec<String> {
    extract_keywords_with(text, &KeywordParams::default())
}

/// [`extract_keywords`] with explicit parameters.
pub fn extract_keywords_with(text: &str, params: &KeywordParams) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for token in normalized.split_whitespace() {
        if token.chars().count() < params.min_token_len || is_stop_word(token, params) {
            continue;
        }
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // sort_by is stable, so ties stay in first-seen order
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(params.max_keywords);
    order.into_iter().map(str::to_string).collect()
}

fn is_stop_word(token: &str, params: &KeywordParams) -> bool {
    STOP_WORD_SET.contains(token) || params.extra_stop_words.iter().any(|w| w == token)
}

/// Upper-case the first character of a word.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t ").is_empty());
    }

    #[test]
    fn test_only_short_and_stop_words() {
        assert!(extract_keywords("the cat is on a mat, why when").is_empty());
    }

    #[test]
    fn test_frequency_order() {
        let kw = extract_keywords("printer jammed. Printer offline! printer driver offline");
        assert_eq!(kw, vec!["printer", "offline", "jammed", "driver"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let kw = extract_keywords("zebra apple mango kiwis");
        assert_eq!(kw, vec!["zebra", "apple", "mango", "kiwis"]);
    }

    #[test]
    fn test_at_most_five() {
        let kw = extract_keywords("alpha bravo charlie delta echoes foxtrot golf hotel");
        assert_eq!(kw.len(), 5);
        assert_eq!(kw[0], "alpha");
    }

    #[test]
    fn test_punctuation_stripped() {
        let kw = extract_keywords("Can't login!!! (password) reset?");
        assert_eq!(kw, vec!["cant", "login", "password", "reset"]);
    }

    #[test]
    fn test_invariants_hold() {
        let text = "When where which that this have with... The server keeps timing out \
                    and the server logs show nothing useful about timing";
        let kw = extract_keywords(text);
        assert!(kw.len() <= 5);
        for k in &kw {
            assert!(k.chars().count() > 3, "too short: {}", k);
            assert!(!STOP_WORDS.contains(&k.as_str()), "stop word: {}", k);
        }
        assert_eq!(kw[0], "server");
        assert_eq!(kw[1], "timing");
    }

    #[test]
    fn test_extra_stop_words() {
        let params = KeywordParams {
            extra_stop_words: vec!["please".to_string()],
            ..KeywordParams::default()
        };
        let kw = extract_keywords_with("please please help with billing", &params);
        assert_eq!(kw, vec!["help", "billing"]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("billing"), "Billing");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("éclair"), "Éclair");
    }
}
