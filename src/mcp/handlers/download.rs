//! Handler for the `download_document` tool.

use std::path::PathBuf;

use reqwest::header::CONTENT_TYPE;
use rmcp::model::{AnnotateAble, Annotations, CallToolResult, Content, RawContent, RawResource, Role};

use crate::paperless::{PaperlessClient, PaperlessError};

/// Fallback MIME type when the download response does not declare one.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Handle the `download_document` tool.
///
/// Fetches the document metadata for its filename, downloads the binary
/// content, writes it to a uniquely named temporary file, and returns a
/// resource link pointing at that file. The temporary file is never cleaned up
/// by this server.
pub(crate) async fn handle_download(
    client: &PaperlessClient,
    document_id: i64,
) -> Result<CallToolResult, PaperlessError> {
    let Some(document) = client.get_document(document_id).await? else {
        return Ok(CallToolResult::error(vec![Content::text(format!(
            "Document with ID {document_id} not found"
        ))]));
    };

    let response = client.download_document(document_id).await?;
    let status = response.status();
    if !status.is_success() {
        return Ok(CallToolResult::error(vec![Content::text(format!(
            "Failed to download document with ID {document_id}: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        ))]));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    let payload = response.bytes().await?;

    let filename = document
        .original_file_name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("document_{document_id}.pdf"));
    let temp_path = temp_file_path(document_id, &filename);
    tracing::debug!(document_id, path = %temp_path.display(), "Writing downloaded document");

    if let Err(err) = tokio::fs::write(&temp_path, &payload).await {
        return Ok(CallToolResult::error(vec![Content::text(format!(
            "Failed to save document to temporary file: {err}"
        ))]));
    }

    let uri = reqwest::Url::from_file_path(&temp_path)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| format!("file://{}", temp_path.display()));
    let display_title = document
        .title
        .as_deref()
        .filter(|title| !title.is_empty())
        .unwrap_or(&filename);

    let mut resource = RawResource::new(uri, filename.clone());
    resource.description = Some(format!("Downloaded document: {display_title}"));
    resource.mime_type = Some(content_type);

    Ok(CallToolResult::success(vec![RawContent::ResourceLink(
        resource,
    )
    .annotate(Annotations {
        audience: Some(vec![Role::User]),
        priority: Some(0.9),
        last_modified: None,
    })]))
}

/// Build the temporary file path for a download.
///
/// The document id embedded in the name keeps concurrent downloads of
/// different documents from colliding; the filename portion is sanitized so
/// characters illegal on common filesystems cannot escape the temp directory.
fn temp_file_path(document_id: i64, filename: &str) -> PathBuf {
    let sanitized = sanitize_filename(filename);
    std::env::temp_dir().join(format!("paperless_{document_id}_{sanitized}"))
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::handlers::first_text;
    use httpmock::{Method::GET, MockServer};
    use serde_json::json;

    fn test_client(base_url: String) -> PaperlessClient {
        PaperlessClient {
            client: reqwest::Client::builder()
                .user_agent("paperless-mcp-test")
                .build()
                .expect("client"),
            base_url,
            api_key: "secret".into(),
        }
    }

    #[test]
    fn sanitize_replaces_illegal_path_characters() {
        assert_eq!(
            sanitize_filename(r#"a/b\c:d*e?f"g<h>i|j.pdf"#),
            "a_b_c_d_e_f_g_h_i_j.pdf"
        );
        assert_eq!(sanitize_filename("plain-name.pdf"), "plain-name.pdf");
    }

    #[test]
    fn temp_path_embeds_the_document_id() {
        let path = temp_file_path(42, "scan.pdf");
        let name = path.file_name().and_then(|n| n.to_str()).expect("name");
        assert_eq!(name, "paperless_42_scan.pdf");
        assert!(path.starts_with(std::env::temp_dir()));
    }

    #[tokio::test]
    async fn upstream_failure_yields_error_result_with_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/documents/9/");
                then.status(200)
                    .json_body(json!({ "id": 9, "title": "Broken", "tags": [] }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/documents/9/download/");
                then.status(502).body("bad gateway");
            })
            .await;

        let client = test_client(server.base_url());
        let result = handle_download(&client, 9).await.expect("result");

        assert_eq!(result.is_error, Some(true));
        let text = first_text(&result);
        assert!(text.contains("502"));
        assert!(text.contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn write_failure_yields_error_result_with_underlying_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/documents/777/");
                then.status(200).json_body(json!({
                    "id": 777,
                    "title": "Blocked",
                    "original_file_name": "blocked.pdf",
                    "tags": []
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/documents/777/download/");
                then.status(200)
                    .header("content-type", "application/pdf")
                    .body("%PDF-1.4 blocked payload");
            })
            .await;

        // Occupy the target path with a directory so the file write must fail.
        let blocked_path = temp_file_path(777, "blocked.pdf");
        std::fs::create_dir_all(&blocked_path).expect("blocking directory");

        let client = test_client(server.base_url());
        let result = handle_download(&client, 777).await.expect("result");
        let _ = std::fs::remove_dir(&blocked_path);

        assert_eq!(result.is_error, Some(true));
        let text = first_text(&result);
        assert!(text.starts_with("Failed to save document to temporary file:"));
    }

    #[tokio::test]
    async fn successful_download_writes_file_and_links_it() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/documents/314/");
                then.status(200).json_body(json!({
                    "id": 314,
                    "title": "Insurance Policy",
                    "original_file_name": "policy: renewal?.pdf",
                    "tags": []
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/documents/314/download/");
                then.status(200)
                    .header("content-type", "application/pdf")
                    .body("%PDF-1.4 fake payload");
            })
            .await;

        let client = test_client(server.base_url());
        let result = handle_download(&client, 314).await.expect("result");

        assert_ne!(result.is_error, Some(true));
        let RawContent::ResourceLink(resource) = &result.content[0].raw else {
            panic!("expected a resource link");
        };
        assert_eq!(resource.name, "policy: renewal?.pdf");
        assert_eq!(resource.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(
            resource.description.as_deref(),
            Some("Downloaded document: Insurance Policy")
        );
        assert!(resource.uri.contains("paperless_314_policy_%20renewal_.pdf"));

        let expected_path = std::env::temp_dir().join("paperless_314_policy_ renewal_.pdf");
        let written = std::fs::read(&expected_path).expect("downloaded file exists");
        assert_eq!(written, b"%PDF-1.4 fake payload");
        let _ = std::fs::remove_file(expected_path);
    }
}
