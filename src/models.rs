//! Core data models consumed and produced by the relevance engine.
//!
//! Tickets and articles are owned by the storage layer; the engine only
//! reads them. Everything else here (suggestions, clusters, duplicate
//! groups) is derived on demand and never persisted by this crate.
//!
//! Field names serialize in camelCase to match the dashboard's JSON records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A support ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    pub subject: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl Ticket {
    /// Subject and description joined by a single space.
    ///
    /// This is the text every similarity and keyword computation over a
    /// ticket operates on.
    pub fn text(&self) -> String {
        format!("{} {}", self.subject, self.description)
    }
}

/// A knowledge-base article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KbArticle {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub helpful_count: u64,
    #[serde(default)]
    pub usage_count: u64,
}

impl KbArticle {
    /// Lower-cased `title content tags...`, the text tickets are matched against.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.content, self.tags.join(" ")).to_lowercase()
    }
}

/// A ranked KB article proposed for a ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// `suggestion-<ticket id>-<article id>`.
    pub id: String,
    pub ticket_id: String,
    pub kb_article_id: String,
    pub article: KbArticle,
    /// Relevance score in `(min_score, 1.0]`.
    pub relevance_score: f64,
    pub suggested_at: DateTime<Utc>,
    /// Scoring breakdown (populated when explain is requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<ScoreExplanation>,
}

/// Scoring breakdown for a [`Suggestion`].
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreExplanation {
    /// Ticket keywords found in the article text.
    pub matched_keywords: Vec<String>,
    /// Weighted, capped keyword component.
    pub keyword_score: f64,
    /// Raw Jaccard similarity between ticket and article text.
    pub similarity: f64,
    /// Weighted similarity component.
    pub similarity_score: f64,
    /// Whether the ticket and article share a category.
    pub category_match: bool,
    /// Sum of the components before clamping to 1.0.
    pub raw_score: f64,
}

/// A group of topically similar tickets, anchor first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,
    pub tickets: Vec<Ticket>,
}

impl Cluster {
    pub fn ticket_ids(&self) -> Vec<&str> {
        self.tickets.iter().map(|t| t.id.as_str()).collect()
    }
}

/// Tickets judged near-identical to an earlier anchor ticket.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub anchor_id: String,
    pub duplicate_ids: Vec<String>,
}

/// The ticket and article collections handed to the engine by the storage layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub articles: Vec<KbArticle>,
}

impl Snapshot {
    pub fn ticket(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }
}
