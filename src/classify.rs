//! Rule-based ticket classification.
//!
//! A [`Classifier`] is an ordered list of [`CategoryRule`]s. The first rule
//! with any keyword appearing as a substring of the lower-cased
//! `subject description` text decides the category; rule order is priority.
//! When nothing matches the classifier's default category is returned, so
//! every ticket gets exactly one label.

use serde::Deserialize;
use tracing::debug;

/// Category returned when no rule matches.
pub const UNCATEGORIZED: &str = "cat-5";

/// Built-in rule table, highest priority first.
pub const DEFAULT_RULES: &[(&str, &[&str])] = &[
    (
        "cat-2",
        &["bill", "charge", "payment", "invoice", "subscription", "refund", "credit card"],
    ),
    (
        "cat-3",
        &["password", "login", "access", "account", "sign in", "authenticate", "locked out"],
    ),
    (
        "cat-1",
        &[
            "error",
            "bug",
            "broken",
            "not working",
            "crash",
            "issue",
            "problem",
            "403",
            "404",
            "500",
        ],
    ),
    (
        "cat-4",
        &["feature", "request", "suggestion", "would like", "could you add", "enhancement"],
    ),
];

/// One `category -> keywords` entry of the rule table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CategoryRule {
    pub category_id: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    fn matches(&self, text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| text.contains(&k.to_lowercase()))
            .map(String::as_str)
    }
}

/// Ordered rule table plus fallback category.
#[derive(Debug, Clone)]
pub struct Classifier {
    pub rules: Vec<CategoryRule>,
    pub default_category: String,
}

impl Default for Classifier {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(id, keywords)| CategoryRule {
                category_id: id.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self {
            rules,
            default_category: UNCATEGORIZED.to_string(),
        }
    }
}

impl Classifier {
    /// Category id for a ticket's subject and description.
    pub fn classify(&self, subject: &str, description: &str) -> String {
        let text = format!("{} {}", subject, description).to_lowercase();

        for rule in &self.rules {
            if let Some(keyword) = rule.matches(&text) {
                debug!(category = %rule.category_id, keyword, "classification rule matched");
                return rule.category_id.clone();
            }
        }

        debug!(category = %self.default_category, "no classification rule matched");
        self.default_category.clone()
    }
}

/// Classify with the built-in rule table.
pub fn classify(subject: &str, description: &str) -> String {
    Classifier::default().classify(subject, description)
}

/// Classify with a caller-supplied classifier.
pub fn classify_with(subject: &str, description: &str, classifier: &Classifier) -> String {
    classifier.classify(subject, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_beats_error() {
        assert_eq!(classify("Refund error on my invoice", ""), "cat-2");
    }

    #[test]
    fn test_crash_is_bug() {
        let desc = "The app crashes with a 500 error when I try to log in. This happens every time.";
        assert_eq!(classify("App crashing", desc), "cat-1");
    }

    #[test]
    fn test_auth_rule() {
        assert_eq!(classify("Locked out", "I cannot sign in anymore"), "cat-3");
    }

    #[test]
    fn test_feature_request() {
        assert_eq!(classify("Dark mode", "Could you add a dark theme?"), "cat-4");
    }

    #[test]
    fn test_default_category() {
        assert_eq!(classify("Hello", "Just saying thanks!"), UNCATEGORIZED);
        assert_eq!(classify("", ""), UNCATEGORIZED);
    }

    #[test]
    fn test_multiword_keyword_spans_subject_and_description() {
        // "credit" ends the subject, "card" starts the description
        assert_eq!(classify("Problem with credit", "card declined"), "cat-2");
    }

    #[test]
    fn test_custom_rules_in_order() {
        let classifier = Classifier {
            rules: vec![
                CategoryRule {
                    category_id: "shipping".to_string(),
                    keywords: vec!["Parcel".to_string()],
                },
                CategoryRule {
                    category_id: "billing".to_string(),
                    keywords: vec!["refund".to_string()],
                },
            ],
            default_category: "other".to_string(),
        };
        assert_eq!(classify_with("Refund for lost parcel", "", &classifier), "shipping");
        assert_eq!(classify_with("Refund please", "", &classifier), "billing");
        assert_eq!(classify_with("Hi", "", &classifier), "other");
    }
}
