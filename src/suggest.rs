//! Knowledge-base article ranking.
//!
//! # Scoring
//!
//! For each published article:
//!
//! 1. `keyword = min(keyword_weight × matches, keyword_cap)`, where `matches`
//!    counts ticket keywords that occur as substrings of the article's
//!    lower-cased `title content tags` text.
//! 2. `similarity = similarity_weight × jaccard(ticket text, article text)`.
//! 3. `category = category_weight` when the category ids are equal
//!    (including both absent).
//! 4. `score = min(keyword + similarity + category, 1.0)`.
//!
//! Articles scoring at or below `min_score` are dropped. The rest are sorted
//! by score (desc, stable on input order) and truncated to `limit`.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::keywords::{extract_keywords_with, KeywordParams};
use crate::models::{KbArticle, ScoreExplanation, Suggestion, Ticket};
use crate::similarity::similarity;

/// Ranking tuning parameters, decoupled from application config.
#[derive(Debug, Clone)]
pub struct SuggestParams {
    pub keyword_weight: f64,
    /// Upper bound on the keyword component.
    pub keyword_cap: f64,
    pub similarity_weight: f64,
    pub category_weight: f64,
    /// Relevance threshold; a suggestion must score strictly above it.
    pub min_score: f64,
    /// Maximum suggestions returned.
    pub limit: usize,
    /// If true, populate [`ScoreExplanation`] on each suggestion.
    pub explain: bool,
    /// How ticket keywords are extracted.
    pub keywords: KeywordParams,
}

impl Default for SuggestParams {
    fn default() -> Self {
        Self {
            keyword_weight: 0.2,
            keyword_cap: 1.0,
            similarity_weight: 0.5,
            category_weight: 0.3,
            min_score: 0.4,
            limit: 5,
            explain: false,
            keywords: KeywordParams::default(),
        }
    }
}

/// Rank published articles against a ticket with default parameters,
/// stamping suggestions with the current time.
pub fn suggest_articles(ticket: &Ticket, articles: &[KbArticle]) -> Vec<Suggestion> {
    rank_articles(ticket, articles, &SuggestParams::default(), Utc::now())
}

/// Rank published articles against a ticket.
///
/// Deterministic for identical inputs and `now`.
pub fn rank_articles(
    ticket: &Ticket,
    articles: &[KbArticle],
    params: &SuggestParams,
    now: DateTime<Utc>,
) -> Vec<Suggestion> {
    let ticket_text = ticket.text().to_lowercase();
    let keywords = extract_keywords_with(&ticket_text, &params.keywords);

    let mut suggestions: Vec<Suggestion> = articles
        .iter()
        .filter(|a| a.is_published)
        .filter_map(|article| {
            let explanation = score_article(ticket, &ticket_text, &keywords, article, params);
            let score = explanation.raw_score.min(1.0);
            if score <= params.min_score {
                debug!(article = %article.id, score, "article below relevance threshold");
                return None;
            }
            Some(Suggestion {
                id: format!("suggestion-{}-{}", ticket.id, article.id),
                ticket_id: ticket.id.clone(),
                kb_article_id: article.id.clone(),
                article: article.clone(),
                relevance_score: score,
                suggested_at: now,
                explain: params.explain.then_some(explanation),
            })
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    suggestions.truncate(params.limit);

    debug!(ticket = %ticket.id, count = suggestions.len(), "ranked articles");
    suggestions
}

fn score_article(
    ticket: &Ticket,
    ticket_text: &str,
    keywords: &[String],
    article: &KbArticle,
    params: &SuggestParams,
) -> ScoreExplanation {
    let article_text = article.searchable_text();

    let matched_keywords: Vec<String> = keywords
        .iter()
        .filter(|k| article_text.contains(k.as_str()))
        .cloned()
        .collect();
    let keyword_score =
        (params.keyword_weight * matched_keywords.len() as f64).min(params.keyword_cap);

    let sim = similarity(ticket_text, &article_text);
    let similarity_score = params.similarity_weight * sim;

    // Two missing categories count as the same category.
    let category_match = ticket.category_id == article.category_id;
    let category_score = if category_match {
        params.category_weight
    } else {
        0.0
    };

    ScoreExplanation {
        matched_keywords,
        keyword_score,
        similarity: sim,
        similarity_score,
        category_match,
        raw_score: keyword_score + similarity_score + category_score,
    }
}
