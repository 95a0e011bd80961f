//! # Ticket Sense
//!
//! An explainable relevance and classification engine for support tickets.
//!
//! Ticket Sense takes plain ticket and knowledge-base article records and
//! returns keywords, similarity scores, category labels, ranked article
//! suggestions, topic clusters, duplicate groups, summaries and draft
//! replies. Every engine function is a deterministic heuristic over its
//! inputs; nothing is persisted, and no model or network is involved.
//!
//! ## Architecture
//!
//! ```text
//!              ┌────────────┐
//!              │  keywords  │◀──────────────┬──────────────┐
//!              └─────┬──────┘               │              │
//!                    ▼                      │              │
//! ┌────────────┐ ┌────────────┐      ┌─────────────┐ ┌───────────┐
//! │ similarity │▶│  suggest   │─────▶│   compose   │ │  cluster  │
//! └─────┬──────┘ └────────────┘      └─────────────┘ └─────▲─────┘
//!       └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! tsense keywords "The app crashes on login"
//! tsense classify --subject "Refund error" --description "invoice is wrong"
//! tsense suggest ticket-1 --explain --data ./data/snapshot.json
//! tsense clusters --json
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Ticket, article, suggestion and cluster types |
//! | [`keywords`] | Keyword extraction |
//! | [`similarity`] | Jaccard text similarity |
//! | [`classify`] | Ordered-rule category classifier |
//! | [`suggest`] | KB article ranking |
//! | [`cluster`] | Similar tickets, clustering, duplicate detection |
//! | [`compose`] | Summaries and draft replies |
//! | [`config`] | TOML configuration parsing |
//! | [`snapshot`] | JSON snapshot loading |
//! | [`commands`] | CLI command implementations |

pub mod classify;
pub mod cluster;
pub mod commands;
pub mod compose;
pub mod config;
pub mod keywords;
pub mod models;
pub mod similarity;
pub mod snapshot;
pub mod suggest;

pub use classify::classify;
pub use cluster::{cluster_tickets, detect_duplicates, find_similar_tickets};
pub use compose::{draft_reply, summarize};
pub use keywords::extract_keywords;
pub use similarity::similarity;
pub use suggest::suggest_articles;
