//! Loading the ticket/article snapshot handed over by the storage layer.
//!
//! The snapshot is a JSON object with `tickets` and `articles` arrays in the
//! dashboard's camelCase record shape. Records with an empty subject,
//! description, or title violate the engine's input contract and are
//! rejected here rather than scored.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::models::Snapshot;

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
    parse_snapshot(&content)
        .with_context(|| format!("Invalid snapshot file: {}", path.display()))
}

pub fn parse_snapshot(content: &str) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_str(content)?;
    validate(&snapshot)?;
    Ok(snapshot)
}

fn validate(snapshot: &Snapshot) -> Result<()> {
    for t in &snapshot.tickets {
        if t.id.is_empty() {
            bail!("ticket with subject '{}' has an empty id", t.subject);
        }
        if t.subject.trim().is_empty() || t.description.trim().is_empty() {
            bail!("ticket {} must have a non-empty subject and description", t.id);
        }
    }
    for a in &snapshot.articles {
        if a.id.is_empty() {
            bail!("article '{}' has an empty id", a.title);
        }
        if a.title.trim().is_empty() {
            bail!("article {} must have a non-empty title", a.id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_records() {
        let snapshot = parse_snapshot(
            r#"{
                "tickets": [{
                    "id": "t1",
                    "ticketNumber": "TKT-000001",
                    "subject": "Cannot log in",
                    "description": "Password reset fails",
                    "categoryId": "cat-3",
                    "status": "open",
                    "createdAt": "2024-01-15T09:30:00Z"
                }],
                "articles": [{
                    "id": "kb1",
                    "title": "Resetting your password",
                    "content": "Open settings",
                    "tags": ["password"],
                    "isPublished": true,
                    "viewCount": 12
                }]
            }"#,
        )
        .unwrap();
        let t = snapshot.ticket("t1").unwrap();
        assert_eq!(t.category_id.as_deref(), Some("cat-3"));
        assert_eq!(t.ticket_number.as_deref(), Some("TKT-000001"));
        assert!(snapshot.articles[0].is_published);
        assert_eq!(snapshot.articles[0].view_count, 12);
        assert!(snapshot.articles[0].summary.is_none());
        assert!(snapshot.ticket("missing").is_none());
    }

    #[test]
    fn test_missing_collections_default_empty() {
        let snapshot = parse_snapshot("{}").unwrap();
        assert!(snapshot.tickets.is_empty());
        assert!(snapshot.articles.is_empty());
    }

    #[test]
    fn test_unpublished_by_default() {
        let snapshot =
            parse_snapshot(r#"{"articles": [{"id": "kb1", "title": "T", "content": ""}]}"#).unwrap();
        assert!(!snapshot.articles[0].is_published);
    }

    #[test]
    fn test_rejects_empty_description() {
        let err = parse_snapshot(
            r#"{"tickets": [{"id": "t1", "subject": "Help", "description": "  "}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("t1"));
    }

    #[test]
    fn test_rejects_missing_required_field() {
        assert!(parse_snapshot(r#"{"tickets": [{"id": "t1", "subject": "Help"}]}"#).is_err());
    }
}
