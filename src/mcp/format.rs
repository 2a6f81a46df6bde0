//! Formatting helpers shared across MCP handlers.

use crate::paperless::{Document, TagCache};

/// Maximum number of content characters shown in search previews.
pub(crate) const CONTENT_PREVIEW_LIMIT: usize = 500;

/// Notice appended to truncated content directing the caller at `get_document`.
pub(crate) const TRUNCATION_NOTICE: &str =
    "\nDocument truncated, request document by ID to fetch full contents";

/// Separator placed between rendered documents in search results.
pub(crate) const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Render a document as a human-readable text block.
///
/// Pure and deterministic: the title falls back to the original filename, the
/// notes line is omitted entirely when absent or empty, tag ids resolve through
/// the cache in order (unknown ids degrade to empty names), and content is
/// truncated to [`CONTENT_PREVIEW_LIMIT`] characters unless `full_content` is set.
pub(crate) fn render_document(doc: &Document, tags: &TagCache, full_content: bool) -> String {
    let title = doc
        .title
        .as_deref()
        .filter(|value| !value.is_empty())
        .or(doc.original_file_name.as_deref())
        .unwrap_or("");
    let created = doc.created.as_deref().unwrap_or("");
    let tag_names: Vec<&str> = doc.tags.iter().map(|&id| tags.name_of(id)).collect();

    let content = doc.content.as_deref().unwrap_or("");
    let content = if !full_content && content.chars().count() > CONTENT_PREVIEW_LIMIT {
        let preview: String = content.chars().take(CONTENT_PREVIEW_LIMIT).collect();
        format!("{preview}{TRUNCATION_NOTICE}")
    } else {
        content.to_string()
    };

    let mut rendered = String::new();
    rendered.push_str(&format!("Title: {title}\n"));
    rendered.push_str(&format!("ID: {}\n", doc.id));
    rendered.push_str(&format!("Created: {created}\n"));
    if let Some(notes) = doc.notes.as_deref()
        && !notes.is_empty()
    {
        rendered.push_str(&format!("Notes: {notes}\n"));
    }
    rendered.push_str(&format!("Tags: {}\n", tag_names.join(",")));
    rendered.push_str(&format!("Content: {content}"));
    rendered
}
