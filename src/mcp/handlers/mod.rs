//! Tool handlers for the MCP server.

use std::future::Future;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::paperless::PaperlessError;

pub mod download;
pub mod get;
pub mod search;

/// Parse structured arguments supplied to a tool invocation.
pub(crate) fn parse_arguments<T: DeserializeOwned>(
    arguments: Option<JsonObject>,
) -> Result<T, McpError> {
    let value = arguments
        .map(Value::Object)
        .unwrap_or_else(|| Value::Object(JsonObject::new()));
    serde_json::from_value(value)
        .map_err(|err| McpError::invalid_params(format!("Invalid arguments: {err}"), None))
}

/// Run a handler body, converting any failure into an error-flagged tool result.
///
/// This is the single failure-handling policy for every registered tool: domain
/// errors never escape as protocol errors and never crash the process. The
/// failure is logged before being surfaced to the caller.
pub(crate) async fn catch_and_report<F>(tool: &'static str, handler: F) -> CallToolResult
where
    F: Future<Output = Result<CallToolResult, PaperlessError>>,
{
    match handler.await {
        Ok(result) => result,
        Err(error) => {
            tracing::error!(tool, error = %error, "Tool invocation failed");
            CallToolResult::error(vec![Content::text(format!(
                "An error occurred while processing the request: {error}"
            ))])
        }
    }
}

/// First text block of a tool result, for assertions.
#[cfg(test)]
pub(crate) fn first_text(result: &CallToolResult) -> &str {
    result
        .content
        .first()
        .and_then(|content| content.as_text())
        .map(|text| text.text.as_str())
        .expect("text content")
}
