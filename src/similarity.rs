//! Jaccard similarity over whitespace-separated, lower-cased word sets.

use std::collections::HashSet;

/// Symmetric similarity in `[0.0, 1.0]`.
///
/// No stop-word filtering or punctuation stripping happens here. Two texts
/// with no words at all score `0.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexive() {
        for t in ["hello", "The app crashes on login", "a a a b"] {
            assert!((similarity(t, t) - 1.0).abs() < 1e-9, "not reflexive: {}", t);
        }
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let pairs = [
            ("refund my invoice", "invoice refund please"),
            ("", "something"),
            ("x y z", "z"),
            ("Login FAILS", "login fails again"),
        ];
        for (a, b) in pairs {
            let ab = similarity(a, b);
            let ba = similarity(b, a);
            assert!((ab - ba).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&ab));
        }
    }

    #[test]
    fn test_both_empty_is_zero() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("  ", "\n"), 0.0);
    }

    #[test]
    fn test_case_insensitive_set_semantics() {
        // {login, fails} vs {login, fails, again}
        assert!((similarity("Login FAILS fails", "login fails again") - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint() {
        assert_eq!(similarity("alpha beta", "gamma delta"), 0.0);
    }
}
