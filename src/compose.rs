//! Ticket summaries and draft replies.

use crate::keywords::{extract_keywords_with, KeywordParams};
use crate::models::{KbArticle, Ticket};
use crate::suggest::suggest_articles;

const SUMMARY_SENTENCE_CHARS: usize = 80;
const SUMMARY_FALLBACK_CHARS: usize = 100;
const ARTICLE_EXCERPT_CHARS: usize = 200;

/// Signature used by [`draft_reply`].
pub const DEFAULT_SIGNATURE: &str = "Support Team";

/// First `n` characters of `s`, never splitting a code point.
fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// One-line summary of a ticket description.
///
/// The first sentence (cut to 80 characters) followed by ` - Key: ` and the
/// top two keywords. Without keywords the sentence is cut to 100 characters;
/// without any sentence the raw text is.
pub fn summarize(description: &str) -> String {
    summarize_with(description, &KeywordParams::default())
}

/// [`summarize`] with custom keyword extraction.
pub fn summarize_with(description: &str, params: &KeywordParams) -> String {
    let first_sentence = description
        .split(['.', '!', '?'])
        .map(str::trim)
        .find(|s| !s.is_empty());

    let Some(sentence) = first_sentence else {
        return truncate_chars(description, SUMMARY_FALLBACK_CHARS).to_string();
    };

    let keywords = extract_keywords_with(description, params);
    if keywords.is_empty() {
        return truncate_chars(sentence, SUMMARY_FALLBACK_CHARS).to_string();
    }

    let top: Vec<&str> = keywords.iter().take(2).map(String::as_str).collect();
    format!(
        "{} - Key: {}",
        truncate_chars(sentence, SUMMARY_SENTENCE_CHARS),
        top.join(", ")
    )
}

/// Draft a reply to `ticket`, quoting the best-matching published article.
pub fn draft_reply(ticket: &Ticket, articles: &[KbArticle]) -> String {
    draft_reply_signed(ticket, articles, DEFAULT_SIGNATURE)
}

/// [`draft_reply`] with a custom signature line.
pub fn draft_reply_signed(ticket: &Ticket, articles: &[KbArticle], signature: &str) -> String {
    let suggestions = suggest_articles(ticket, articles);
    compose_reply(ticket, suggestions.first().map(|s| &s.article), signature)
}

/// Render the reply template around an optional article.
pub fn compose_reply(ticket: &Ticket, article: Option<&KbArticle>, signature: &str) -> String {
    let opening = format!(
        "Hello,\n\nThank you for contacting support regarding: \"{}\"\n\n",
        ticket.subject
    );
    let closing = format!("\n\nBest regards,\n{}", signature);

    match article {
        None => format!(
            "{}I've reviewed your ticket and I'm looking into this issue. \
             I'll get back to you shortly with more information.{}",
            opening, closing
        ),
        Some(article) => {
            let excerpt = match article.summary.as_deref() {
                Some(summary) if !summary.is_empty() => summary,
                _ => truncate_chars(&article.content, ARTICLE_EXCERPT_CHARS),
            };
            format!(
                "{}I found this helpful article that might address your issue:\n\n\
                 \"{}\"\n{}\n\n\
                 Please let me know if this helps or if you need additional assistance.{}",
                opening, article.title, excerpt, closing
            )
        }
    }
}
