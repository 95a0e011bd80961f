//! Similar-ticket search, greedy topic clustering, and duplicate detection.
//!
//! All three compare tickets by [`similarity`] over `subject description`
//! and are O(n²) in the number of tickets. Callers with large collections
//! should page or batch.

use std::collections::HashSet;

use tracing::debug;

use crate::keywords::{extract_keywords_with, title_case, KeywordParams};
use crate::models::{Cluster, DuplicateGroup, Ticket};
use crate::similarity::similarity;

/// Clustering tuning parameters.
#[derive(Debug, Clone)]
pub struct ClusterParams {
    /// Tickets must be strictly more similar than this to count as related.
    pub similarity_threshold: f64,
    /// At most this many related tickets join an anchor.
    pub max_similar: usize,
    /// An anchor needs at least this many related tickets to form a cluster.
    /// Values below [`MIN_RELATED`] are raised to it.
    pub min_similar: usize,
    /// How cluster names are derived from the anchor text.
    pub keywords: KeywordParams,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,
            max_similar: 3,
            min_similar: MIN_RELATED,
            keywords: KeywordParams::default(),
        }
    }
}

/// Fewest related tickets an anchor needs, so every cluster has at least
/// three members.
pub const MIN_RELATED: usize = 2;

/// Default threshold above which two tickets are duplicates.
pub const DUPLICATE_THRESHOLD: f64 = 0.7;

/// Tickets related to `ticket`, most similar first.
///
/// `ticket` itself (by id) is never included.
pub fn find_similar_tickets(
    ticket: &Ticket,
    all_tickets: &[Ticket],
    params: &ClusterParams,
) -> Vec<Ticket> {
    ranked_similar(ticket, all_tickets, params, &HashSet::new())
        .into_iter()
        .map(|(t, _)| t.clone())
        .collect()
}

fn ranked_similar<'a>(
    ticket: &Ticket,
    all_tickets: &'a [Ticket],
    params: &ClusterParams,
    exclude: &HashSet<String>,
) -> Vec<(&'a Ticket, f64)> {
    let text = ticket.text();

    let mut scored: Vec<(&Ticket, f64)> = all_tickets
        .iter()
        .filter(|t| t.id != ticket.id && !exclude.contains(&t.id))
        .map(|t| (t, similarity(&text, &t.text())))
        .filter(|(_, score)| *score > params.similarity_threshold)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(params.max_similar);
    scored
}

/// Group tickets into topic clusters with default parameters.
pub fn cluster_tickets(tickets: &[Ticket]) -> Vec<Cluster> {
    cluster_tickets_with(tickets, &ClusterParams::default())
}

/// Group tickets into topic clusters.
///
/// Tickets are visited in input order. A ticket not yet clustered becomes an
/// anchor if it has at least `min_similar` related tickets; the anchor and
/// those tickets form a cluster and are all marked clustered. Already
/// clustered tickets never anchor a new cluster.
pub fn cluster_tickets_with(tickets: &[Ticket], params: &ClusterParams) -> Vec<Cluster> {
    let mut clustered: HashSet<String> = HashSet::new();
    tickets
        .iter()
        .filter_map(|anchor| cluster_around(anchor, tickets, params, &mut clustered))
        .collect()
}

fn cluster_around(
    anchor: &Ticket,
    tickets: &[Ticket],
    params: &ClusterParams,
    clustered: &mut HashSet<String>,
) -> Option<Cluster> {
    if clustered.contains(&anchor.id) {
        return None;
    }

    // Tickets already clustered under an earlier anchor are not candidates.
    let similar: Vec<&Ticket> = ranked_similar(anchor, tickets, params, clustered)
        .into_iter()
        .map(|(t, _)| t)
        .collect();

    if similar.len() < params.min_similar.max(MIN_RELATED) {
        return None;
    }

    let mut members = Vec::with_capacity(similar.len() + 1);
    members.push(anchor.clone());
    members.extend(similar.into_iter().cloned());

    for t in &members {
        clustered.insert(t.id.clone());
    }

    let name = cluster_name(anchor, &params.keywords);
    debug!(name = %name, anchor = %anchor.id, size = members.len(), "formed cluster");

    Some(Cluster {
        name,
        tickets: members,
    })
}

/// Title-cased top two keywords of the anchor, followed by `Issues`.
fn cluster_name(anchor: &Ticket, params: &KeywordParams) -> String {
    let keywords = extract_keywords_with(&anchor.text(), params);
    let mut parts: Vec<String> = keywords.iter().take(2).map(|k| title_case(k)).collect();
    parts.push("Issues".to_string());
    parts.join(" ")
}

/// Duplicate groups with the default threshold.
pub fn detect_duplicates(tickets: &[Ticket]) -> Vec<DuplicateGroup> {
    detect_duplicates_with(tickets, DUPLICATE_THRESHOLD)
}

/// For every pair `(i, j)` with `i < j` and similarity above `threshold`,
/// record ticket `j` as a duplicate of ticket `i`.
///
/// Groups are ordered by the anchor's position in the input.
pub fn detect_duplicates_with(tickets: &[Ticket], threshold: f64) -> Vec<DuplicateGroup> {
    let texts: Vec<String> = tickets.iter().map(Ticket::text).collect();
    let mut groups = Vec::new();

    for (i, anchor) in tickets.iter().enumerate() {
        let duplicate_ids: Vec<String> = tickets
            .iter()
            .enumerate()
            .skip(i + 1)
            .filter(|(j, _)| similarity(&texts[i], &texts[*j]) > threshold)
            .map(|(_, t)| t.id.clone())
            .collect();

        if !duplicate_ids.is_empty() {
            debug!(anchor = %anchor.id, count = duplicate_ids.len(), "found duplicates");
            groups.push(DuplicateGroup {
                anchor_id: anchor.id.clone(),
                duplicate_ids,
            });
        }
    }

    groups
}
