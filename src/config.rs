use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::classify::{CategoryRule, Classifier, UNCATEGORIZED};
use crate::cluster::{ClusterParams, DUPLICATE_THRESHOLD, MIN_RELATED};
use crate::compose::DEFAULT_SIGNATURE;
use crate::keywords::KeywordParams;
use crate::suggest::SuggestParams;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub keywords: KeywordsConfig,
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub reply: ReplyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data/snapshot.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeywordsConfig {
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            max_keywords: default_max_keywords(),
            min_token_len: default_min_token_len(),
            extra_stop_words: Vec::new(),
        }
    }
}

fn default_max_keywords() -> usize {
    5
}
fn default_min_token_len() -> usize {
    4
}

#[derive(Debug, Deserialize, Clone)]
pub struct SuggestConfig {
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,
    #[serde(default = "default_keyword_cap")]
    pub keyword_cap: f64,
    #[serde(default = "default_similarity_weight")]
    pub similarity_weight: f64,
    #[serde(default = "default_category_weight")]
    pub category_weight: f64,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_suggest_limit")]
    pub limit: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            keyword_weight: default_keyword_weight(),
            keyword_cap: default_keyword_cap(),
            similarity_weight: default_similarity_weight(),
            category_weight: default_category_weight(),
            min_score: default_min_score(),
            limit: default_suggest_limit(),
        }
    }
}

fn default_keyword_weight() -> f64 {
    0.2
}
fn default_keyword_cap() -> f64 {
    1.0
}
fn default_similarity_weight() -> f64 {
    0.5
}
fn default_category_weight() -> f64 {
    0.3
}
fn default_min_score() -> f64 {
    0.4
}
fn default_suggest_limit() -> usize {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClusterConfig {
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_max_similar")]
    pub max_similar: usize,
    #[serde(default = "default_min_similar")]
    pub min_similar: usize,
    #[serde(default = "default_duplicate_threshold")]
    pub duplicate_threshold: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            max_similar: default_max_similar(),
            min_similar: default_min_similar(),
            duplicate_threshold: default_duplicate_threshold(),
        }
    }
}

fn default_similarity_threshold() -> f64 {
    0.3
}
fn default_max_similar() -> usize {
    3
}
fn default_min_similar() -> usize {
    MIN_RELATED
}
fn default_duplicate_threshold() -> f64 {
    DUPLICATE_THRESHOLD
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierConfig {
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Replaces the built-in rule table when non-empty.
    #[serde(default)]
    pub rules: Vec<CategoryRule>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            rules: Vec::new(),
        }
    }
}

fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplyConfig {
    #[serde(default = "default_signature")]
    pub signature: String,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            signature: default_signature(),
        }
    }
}

fn default_signature() -> String {
    DEFAULT_SIGNATURE.to_string()
}

impl Config {
    /// All defaults, without reading a file.
    pub fn minimal() -> Self {
        Self::default()
    }

    pub fn keyword_params(&self) -> KeywordParams {
        KeywordParams {
            max_keywords: self.keywords.max_keywords,
            min_token_len: self.keywords.min_token_len,
            extra_stop_words: self
                .keywords
                .extra_stop_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    pub fn suggest_params(&self) -> SuggestParams {
        SuggestParams {
            keyword_weight: self.suggest.keyword_weight,
            keyword_cap: self.suggest.keyword_cap,
            similarity_weight: self.suggest.similarity_weight,
            category_weight: self.suggest.category_weight,
            min_score: self.suggest.min_score,
            limit: self.suggest.limit,
            explain: false,
            keywords: self.keyword_params(),
        }
    }

    pub fn cluster_params(&self) -> ClusterParams {
        ClusterParams {
            similarity_threshold: self.cluster.similarity_threshold,
            max_similar: self.cluster.max_similar,
            min_similar: self.cluster.min_similar,
            keywords: self.keyword_params(),
        }
    }

    pub fn classifier(&self) -> Classifier {
        let mut classifier = Classifier::default();
        if !self.classifier.rules.is_empty() {
            classifier.rules = self.classifier.rules.clone();
        }
        classifier.default_category = self.classifier.default_category.clone();
        classifier
    }
}

/// Load configuration from `path`, falling back to defaults if the file does
/// not exist.
pub fn load_config_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::minimal())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content).with_context(|| "Failed to parse config file")?;
    Ok(config)
}

/// Parse and validate TOML configuration text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    // Validate keywords
    if config.keywords.max_keywords == 0 {
        bail!("keywords.max_keywords must be >= 1");
    }

    // Validate suggest
    let s = &config.suggest;
    for (name, value) in [
        ("suggest.keyword_weight", s.keyword_weight),
        ("suggest.keyword_cap", s.keyword_cap),
        ("suggest.similarity_weight", s.similarity_weight),
        ("suggest.category_weight", s.category_weight),
        ("suggest.min_score", s.min_score),
    ] {
        check_unit(name, value)?;
    }
    if s.limit < 1 {
        bail!("suggest.limit must be >= 1");
    }

    // Validate cluster
    let c = &config.cluster;
    check_unit("cluster.similarity_threshold", c.similarity_threshold)?;
    check_unit("cluster.duplicate_threshold", c.duplicate_threshold)?;
    if c.min_similar < MIN_RELATED {
        bail!("cluster.min_similar must be >= {}", MIN_RELATED);
    }
    if c.max_similar < c.min_similar {
        bail!(
            "cluster.max_similar ({}) must be >= cluster.min_similar ({})",
            c.max_similar,
            c.min_similar
        );
    }

    // Validate classifier
    if config.classifier.default_category.trim().is_empty() {
        bail!("classifier.default_category must not be empty");
    }
    for (i, rule) in config.classifier.rules.iter().enumerate() {
        if rule.category_id.trim().is_empty() {
            bail!("classifier.rules[{}].category_id must not be empty", i);
        }
        if rule.keywords.is_empty() || rule.keywords.iter().any(|k| k.trim().is_empty()) {
            bail!(
                "classifier.rules[{}] ('{}') needs at least one keyword and no empty keywords",
                i,
                rule.category_id
            );
        }
    }

    Ok(())
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        bail!("{} must be in [0.0, 1.0], got {}", name, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.data.path, PathBuf::from("./data/snapshot.json"));
        assert_eq!(cfg.keywords.max_keywords, 5);
        assert!((cfg.suggest.min_score - 0.4).abs() < 1e-9);
        assert!((cfg.cluster.duplicate_threshold - 0.7).abs() < 1e-9);
        assert_eq!(cfg.classifier().rules.len(), 4);
        assert_eq!(cfg.classifier().default_category, "cat-5");
        assert_eq!(cfg.reply.signature, "Support Team");
    }

    #[test]
    fn test_partial_sections() {
        let cfg = parse_config(
            r#"
[suggest]
min_score = 0.25
limit = 3

[cluster]
max_similar = 5
"#,
        )
        .unwrap();
        let params = cfg.suggest_params();
        assert!((params.min_score - 0.25).abs() < 1e-9);
        assert_eq!(params.limit, 3);
        assert!((params.similarity_weight - 0.5).abs() < 1e-9);
        assert_eq!(cfg.cluster_params().max_similar, 5);
        assert_eq!(cfg.cluster_params().min_similar, 2);
    }

    #[test]
    fn test_custom_rules_replace_builtin() {
        let cfg = parse_config(
            r#"
[classifier]
default_category = "other"

[[classifier.rules]]
category_id = "shipping"
keywords = ["parcel", "delivery"]
"#,
        )
        .unwrap();
        let classifier = cfg.classifier();
        assert_eq!(classifier.rules.len(), 1);
        assert_eq!(classifier.classify("Where is my parcel", ""), "shipping");
        assert_eq!(classifier.classify("Refund", ""), "other");
    }

    #[test]
    fn test_rejects_out_of_range_weight() {
        let err = parse_config("[suggest]\ncategory_weight = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("suggest.category_weight"));
    }

    #[test]
    fn test_rejects_zero_limit() {
        assert!(parse_config("[suggest]\nlimit = 0\n").is_err());
    }

    #[test]
    fn test_rejects_inverted_cluster_bounds() {
        let err = parse_config("[cluster]\nmax_similar = 1\nmin_similar = 2\n").unwrap_err();
        assert!(err.to_string().contains("max_similar"));
    }

    #[test]
    fn test_rejects_small_min_similar() {
        for value in [0, 1] {
            let err = parse_config(&format!("[cluster]\nmin_similar = {}\n", value)).unwrap_err();
            assert!(err.to_string().contains("cluster.min_similar"));
        }
        assert!(parse_config("[cluster]\nmin_similar = 2\n").is_ok());
    }

    #[test]
    fn test_keyword_section_reaches_cluster_params() {
        let cfg = parse_config("[keywords]\nextra_stop_words = [\"Login\"]\n").unwrap();
        assert_eq!(cfg.cluster_params().keywords.extra_stop_words, vec!["login"]);
    }

    #[test]
    fn test_rejects_rule_without_keywords() {
        let err = parse_config(
            "[[classifier.rules]]\ncategory_id = \"x\"\nkeywords = []\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("classifier.rules[0]"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let cfg = load_config_or_default(Path::new("/nonexistent/tsense.toml")).unwrap();
        assert_eq!(cfg.suggest.limit, 5);
    }
}
