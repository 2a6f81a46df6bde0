//! Shared types used by the Paperless client and helpers.

use std::collections::HashMap;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned while interacting with Paperless-ngx.
#[derive(Debug, Error)]
pub enum PaperlessError {
    /// Base URL failed to parse or normalize.
    #[error("Invalid Paperless URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed before receiving a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Paperless responded with an unexpected status code.
    #[error("Unexpected Paperless response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned from Paperless.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
}

/// Document record as returned by the Paperless REST API.
///
/// This server only reads documents; the remote service owns them. Fields that
/// Paperless may omit or null out are modelled as `Option` so rendering can
/// apply deterministic fallbacks.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Numeric document identifier.
    pub id: i64,
    /// Human-assigned title, absent for untitled uploads.
    #[serde(default)]
    pub title: Option<String>,
    /// Filename of the originally uploaded file.
    #[serde(default)]
    pub original_file_name: Option<String>,
    /// Creation date reported by Paperless.
    #[serde(default)]
    pub created: Option<String>,
    /// Extracted text content, possibly empty.
    #[serde(default)]
    pub content: Option<String>,
    /// Free-form notes attached to the document.
    #[serde(default)]
    pub notes: Option<String>,
    /// Ordered tag id references.
    #[serde(default)]
    pub tags: Vec<i64>,
}

/// Tag record as returned by the Paperless REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    /// Numeric tag identifier.
    pub id: i64,
    /// Display name of the tag.
    pub name: String,
}

/// Standard Paperless list envelope wrapping paginated results.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    /// Total number of matching records on the server.
    pub count: i64,
    /// URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
    /// Records contained in this page.
    pub results: Vec<T>,
}

/// Immutable id-to-tag lookup built once at startup.
///
/// Handlers assume synchronous lookups with no fallback fetch, so the cache
/// must be fully populated before any tool is served. It is shared read-only
/// and never refreshed for the process lifetime.
#[derive(Debug, Default)]
pub struct TagCache {
    entries: HashMap<i64, Tag>,
}

impl TagCache {
    /// Build a cache from a list of tags fetched from the server.
    pub fn from_tags(tags: Vec<Tag>) -> Self {
        let entries = tags.into_iter().map(|tag| (tag.id, tag)).collect();
        Self { entries }
    }

    /// Resolve a tag id to its name, degrading to an empty string for unknown ids.
    pub fn name_of(&self, id: i64) -> &str {
        self.entries
            .get(&id)
            .map(|tag| tag.name.as_str())
            .unwrap_or("")
    }

    /// Number of tags held by the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no tags.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn name_of_resolves_known_ids() {
        let cache = TagCache::from_tags(vec![tag(1, "invoices"), tag(2, "receipts")]);
        assert_eq!(cache.name_of(1), "invoices");
        assert_eq!(cache.name_of(2), "receipts");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn name_of_degrades_to_empty_string_for_unknown_ids() {
        let cache = TagCache::from_tags(vec![tag(1, "invoices")]);
        assert_eq!(cache.name_of(999), "");
    }

    #[test]
    fn document_deserializes_with_absent_optional_fields() {
        let doc: Document =
            serde_json::from_value(serde_json::json!({ "id": 7, "tags": [3, 4] }))
                .expect("document parses");
        assert_eq!(doc.id, 7);
        assert!(doc.title.is_none());
        assert!(doc.content.is_none());
        assert_eq!(doc.tags, vec![3, 4]);
    }
}
