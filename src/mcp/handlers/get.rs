//! Handler for the `get_document` tool.

use rmcp::model::{CallToolResult, Content};
use serde::Deserialize;

use crate::{
    mcp::format::render_document,
    paperless::{PaperlessClient, PaperlessError, TagCache},
};

/// Request payload shared by the document-id tools.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DocumentIdRequest {
    /// Identifier of the target document.
    #[serde(rename = "documentId")]
    pub(crate) document_id: i64,
}

/// Handle the `get_document` tool by returning the full document text.
pub(crate) async fn handle_get(
    client: &PaperlessClient,
    tags: &TagCache,
    document_id: i64,
) -> Result<CallToolResult, PaperlessError> {
    let Some(document) = client.get_document(document_id).await? else {
        return Ok(CallToolResult::error(vec![Content::text(format!(
            "Document with ID {document_id} not found"
        ))]));
    };

    tracing::debug!(document_id, "get_document completed");
    Ok(CallToolResult::success(vec![Content::text(
        render_document(&document, tags, true),
    )]))
}
