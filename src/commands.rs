//! CLI command implementations for `tsense`.
//!
//! Each `run_*` function loads whatever it needs (config, snapshot), calls
//! the engine, and prints either a human-readable listing or, with `json`,
//! a single pretty-printed JSON document on stdout.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::path::Path;

use crate::classify::classify_with;
use crate::cluster::{cluster_tickets_with, detect_duplicates_with, find_similar_tickets};
use crate::compose::{compose_reply, summarize_with};
use crate::config::Config;
use crate::keywords::extract_keywords_with;
use crate::models::{Snapshot, Ticket};
use crate::similarity::similarity;
use crate::snapshot::load_snapshot;
use crate::suggest::rank_articles;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn find_ticket<'a>(snapshot: &'a Snapshot, id: &str) -> Result<&'a Ticket> {
    snapshot
        .ticket(id)
        .with_context(|| format!("Ticket not found: {}", id))
}

pub fn run_keywords(config: &Config, text: &str, json: bool) -> Result<()> {
    let keywords = extract_keywords_with(text, &config.keyword_params());
    if json {
        return print_json(&keywords);
    }
    if keywords.is_empty() {
        println!("No keywords.");
    }
    for k in &keywords {
        println!("{}", k);
    }
    Ok(())
}

pub fn run_similarity(a: &str, b: &str, json: bool) -> Result<()> {
    let score = similarity(a, b);
    if json {
        return print_json(&json!({ "similarity": score }));
    }
    println!("{:.4}", score);
    Ok(())
}

pub fn run_classify(config: &Config, subject: &str, description: &str, json: bool) -> Result<()> {
    let category = classify_with(subject, description, &config.classifier());
    if json {
        return print_json(&json!({ "categoryId": category }));
    }
    println!("{}", category);
    Ok(())
}

pub fn run_summarize(config: &Config, text: &str, json: bool) -> Result<()> {
    let summary = summarize_with(text, &config.keyword_params());
    if json {
        return print_json(&json!({ "summary": summary }));
    }
    println!("{}", summary);
    Ok(())
}

pub fn run_suggest(
    config: &Config,
    snapshot: &Snapshot,
    ticket_id: &str,
    limit: Option<usize>,
    explain: bool,
    json: bool,
) -> Result<()> {
    if limit == Some(0) {
        bail!("--limit must be >= 1");
    }
    let ticket = find_ticket(snapshot, ticket_id)?;
    let mut params = config.suggest_params();
    params.explain = explain;
    if let Some(limit) = limit {
        params.limit = limit;
    }

    let suggestions = rank_articles(ticket, &snapshot.articles, &params, Utc::now());
    if json {
        return print_json(&suggestions);
    }
    if suggestions.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }

    for (i, s) in suggestions.iter().enumerate() {
        println!(
            "{}. [{:.2}] {} / {}",
            i + 1,
            s.relevance_score,
            s.kb_article_id,
            s.article.title
        );
        if let Some(ref ex) = s.explain {
            println!(
                "    keywords: {:.2} ({})",
                ex.keyword_score,
                ex.matched_keywords.join(", ")
            );
            println!(
                "    similarity: {:.2} (jaccard {:.4})",
                ex.similarity_score, ex.similarity
            );
            println!("    category match: {}", ex.category_match);
        }
    }
    Ok(())
}

pub fn run_similar(config: &Config, snapshot: &Snapshot, ticket_id: &str, json: bool) -> Result<()> {
    let ticket = find_ticket(snapshot, ticket_id)?;
    let similar = find_similar_tickets(ticket, &snapshot.tickets, &config.cluster_params());
    if json {
        return print_json(&similar);
    }
    if similar.is_empty() {
        println!("No similar tickets.");
        return Ok(());
    }
    let text = ticket.text();
    for t in &similar {
        println!("[{:.2}] {} / {}", similarity(&text, &t.text()), t.id, t.subject);
    }
    Ok(())
}

pub fn run_clusters(config: &Config, snapshot: &Snapshot, json: bool) -> Result<()> {
    let clusters = cluster_tickets_with(&snapshot.tickets, &config.cluster_params());
    if json {
        return print_json(&clusters);
    }
    if clusters.is_empty() {
        println!("No clusters.");
        return Ok(());
    }
    for c in &clusters {
        println!("{} ({} tickets)", c.name, c.tickets.len());
        for t in &c.tickets {
            println!("    {} / {}", t.id, t.subject);
        }
    }
    Ok(())
}

pub fn run_duplicates(config: &Config, snapshot: &Snapshot, json: bool) -> Result<()> {
    let groups = detect_duplicates_with(&snapshot.tickets, config.cluster.duplicate_threshold);
    if json {
        return print_json(&groups);
    }
    if groups.is_empty() {
        println!("No duplicates.");
        return Ok(());
    }
    for g in &groups {
        println!("{} <- {}", g.anchor_id, g.duplicate_ids.join(", "));
    }
    Ok(())
}

pub fn run_draft(config: &Config, snapshot: &Snapshot, ticket_id: &str, json: bool) -> Result<()> {
    let ticket = find_ticket(snapshot, ticket_id)?;
    let suggestions = rank_articles(
        ticket,
        &snapshot.articles,
        &config.suggest_params(),
        Utc::now(),
    );
    let reply = compose_reply(
        ticket,
        suggestions.first().map(|s| &s.article),
        &config.reply.signature,
    );
    if json {
        return print_json(&json!({
            "ticketId": ticket.id,
            "kbArticleId": suggestions.first().map(|s| s.kb_article_id.clone()),
            "reply": reply,
        }));
    }
    println!("{}", reply);
    Ok(())
}

/// Load the snapshot named by `--data` or `[data].path`.
pub fn open_snapshot(config: &Config, data: Option<&Path>) -> Result<Snapshot> {
    let path = data.unwrap_or(config.data.path.as_path());
    load_snapshot(path)
}
