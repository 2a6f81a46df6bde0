//! Handler and helpers for the `search_documents` tool.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    mcp::format::{DOCUMENT_SEPARATOR, render_document},
    paperless::{PaperlessClient, PaperlessError, SearchQuery, TagCache},
};

/// Raw search request payload accepted from MCP clients.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SearchDocumentsRequest {
    /// Free-text search term.
    #[serde(rename = "searchTerm")]
    pub(crate) search_term: String,
    /// Optional inclusive creation-date lower bound (`YYYY-MM-DD`).
    #[serde(rename = "dateFrom", default)]
    pub(crate) date_from: Option<String>,
    /// Optional inclusive creation-date upper bound (`YYYY-MM-DD`).
    #[serde(rename = "dateTo", default)]
    pub(crate) date_to: Option<String>,
}

/// Validate search arguments and normalize them into a REST query.
pub(crate) fn validate_search_request(
    args: SearchDocumentsRequest,
) -> Result<SearchQuery, McpError> {
    if args.search_term.trim().is_empty() {
        return Err(McpError::invalid_params(
            "`searchTerm` must not be empty",
            None,
        ));
    }

    let date_from = validate_date("dateFrom", args.date_from)?;
    let date_to = validate_date("dateTo", args.date_to)?;

    Ok(SearchQuery {
        search_term: args.search_term,
        date_from,
        date_to,
    })
}

fn validate_date(label: &str, value: Option<String>) -> Result<Option<String>, McpError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let format = format_description!("[year]-[month]-[day]");
    let trimmed = value.trim();
    Date::parse(trimmed, &format).map_err(|_| {
        McpError::invalid_params(
            format!("`{label}` must be a date formatted as YYYY-MM-DD (got '{value}')"),
            None,
        )
    })?;
    Ok(Some(trimmed.to_string()))
}

/// Handle the `search_documents` tool by querying the archive and rendering previews.
pub(crate) async fn handle_search(
    client: &PaperlessClient,
    tags: &TagCache,
    query: SearchQuery,
) -> Result<CallToolResult, PaperlessError> {
    let documents = client.search_documents(&query).await?;
    tracing::debug!(
        search_term = %query.search_term,
        results = documents.len(),
        "search_documents completed"
    );

    if documents.is_empty() {
        return Ok(CallToolResult::success(vec![Content::text(
            "No documents found",
        )]));
    }

    let rendered: Vec<String> = documents
        .iter()
        .map(|doc| render_document(doc, tags, false))
        .collect();
    Ok(CallToolResult::success(vec![Content::text(
        rendered.join(DOCUMENT_SEPARATOR),
    )]))
}
