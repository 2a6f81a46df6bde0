//! HTTP client wrapper for interacting with the Paperless-ngx REST API.

use crate::config::get_config;
use crate::paperless::types::{Document, ListEnvelope, PaperlessError, Tag, TagCache};
use reqwest::{Client, Method, StatusCode};

/// Page size override used when fetching the full tag list in one call.
const TAG_PAGE_SIZE: u32 = 1000;
/// Page size override used so a search returns its full result set in one call.
const SEARCH_PAGE_SIZE: u32 = 100_000;

/// Filters accepted by the document search endpoint.
#[derive(Debug, Default, Clone)]
pub struct SearchQuery {
    /// Free-text search term matched across title, content, and other fields.
    pub search_term: String,
    /// Inclusive lower bound on the creation date (`YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Inclusive upper bound on the creation date (`YYYY-MM-DD`).
    pub date_to: Option<String>,
}

/// Lightweight HTTP client for Paperless-ngx operations.
///
/// Every request carries an `Authorization: Token <key>` header. No retry or
/// timeout configuration is applied; failures surface directly to the caller.
pub struct PaperlessClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
}

impl PaperlessClient {
    /// Construct a new client using configuration derived from the environment.
    pub fn new() -> Result<Self, PaperlessError> {
        let config = get_config();
        let client = Client::builder().user_agent("paperless-mcp/0.1").build()?;

        let base_url =
            normalize_base_url(&config.paperless_server).map_err(PaperlessError::InvalidUrl)?;
        tracing::debug!(url = %base_url, "Initialized Paperless HTTP client");

        Ok(Self {
            client,
            base_url,
            api_key: config.paperless_api_key.clone(),
        })
    }

    /// Fetch the full tag list and build the id-to-name lookup used for rendering.
    ///
    /// Runs once at startup; a failure here is fatal since handlers assume the
    /// cache is complete.
    pub async fn fetch_tag_cache(&self) -> Result<TagCache, PaperlessError> {
        let response = self
            .request(Method::GET, "api/tags/")
            .query(&[("page_size", TAG_PAGE_SIZE)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = PaperlessError::UnexpectedStatus { status, body };
            tracing::error!(error = %error, "Failed to list tags");
            return Err(error);
        }

        let envelope: ListEnvelope<Tag> = response.json().await?;
        let cache = TagCache::from_tags(envelope.results);
        tracing::debug!(tags = cache.len(), "Tag cache populated");
        Ok(cache)
    }

    /// Search documents by free text with optional creation-date bounds.
    ///
    /// A single page is requested with an inflated page-size override so the
    /// whole result set arrives in one call; no pagination loop is performed.
    pub async fn search_documents(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<Document>, PaperlessError> {
        let mut params: Vec<(&str, String)> = vec![
            ("search", query.search_term.clone()),
            ("page_size", SEARCH_PAGE_SIZE.to_string()),
        ];
        if let Some(date_from) = &query.date_from {
            params.push(("created__date__gte", date_from.clone()));
        }
        if let Some(date_to) = &query.date_to {
            params.push(("created__date__lte", date_to.clone()));
        }

        let response = self
            .request(Method::GET, "api/documents/")
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = PaperlessError::UnexpectedStatus { status, body };
            tracing::error!(error = %error, "Document search failed");
            return Err(error);
        }

        let envelope: ListEnvelope<Document> = response.json().await?;
        tracing::debug!(
            count = envelope.count,
            returned = envelope.results.len(),
            "Document search completed"
        );
        Ok(envelope.results)
    }

    /// Fetch a single document by id, mapping a 404 to `None`.
    pub async fn get_document(&self, id: i64) -> Result<Option<Document>, PaperlessError> {
        let response = self
            .request(Method::GET, &format!("api/documents/{id}/"))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => {
                let body = response.text().await.unwrap_or_default();
                let error = PaperlessError::UnexpectedStatus { status, body };
                tracing::error!(document_id = id, error = %error, "Document fetch failed");
                Err(error)
            }
        }
    }

    /// Fetch the raw binary content of a document from the download endpoint.
    ///
    /// Returns the response unconsumed so the caller can inspect the status,
    /// content type, and body bytes.
    pub async fn download_document(&self, id: i64) -> Result<reqwest::Response, PaperlessError> {
        let response = self
            .request(Method::GET, &format!("api/documents/{id}/download/"))
            .send()
            .await?;
        Ok(response)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format_endpoint(&self.base_url, path);
        self.client
            .request(method, url)
            .header("Authorization", format!("Token {}", self.api_key))
    }
}

fn normalize_base_url(url: &str) -> Result<String, String> {
    let mut parsed = reqwest::Url::parse(url).map_err(|err| err.to_string())?;
    let path = parsed.path().trim_end_matches('/').to_string();
    parsed.set_path(&path);
    Ok(parsed.to_string())
}

fn format_endpoint(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};
    use serde_json::json;

    fn test_client(base_url: String) -> PaperlessClient {
        PaperlessClient {
            client: Client::builder()
                .user_agent("paperless-mcp-test")
                .build()
                .expect("client"),
            base_url,
            api_key: "secret-token".into(),
        }
    }

    #[tokio::test]
    async fn fetch_tag_cache_sends_auth_header_and_page_size() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/tags/")
                    .header("Authorization", "Token secret-token")
                    .query_param("page_size", "1000");
                then.status(200).json_body(json!({
                    "count": 2,
                    "next": null,
                    "previous": null,
                    "results": [
                        { "id": 1, "name": "invoices" },
                        { "id": 2, "name": "receipts" }
                    ]
                }));
            })
            .await;

        let client = test_client(server.base_url());
        let cache = client.fetch_tag_cache().await.expect("tag cache");

        mock.assert();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.name_of(1), "invoices");
    }

    #[tokio::test]
    async fn search_documents_applies_date_filters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/documents/")
                    .query_param("search", "lease")
                    .query_param("page_size", "100000")
                    .query_param("created__date__gte", "2024-01-01")
                    .query_param("created__date__lte", "2024-12-31");
                then.status(200).json_body(json!({
                    "count": 1,
                    "next": null,
                    "previous": null,
                    "results": [
                        { "id": 12, "title": "Lease", "tags": [] }
                    ]
                }));
            })
            .await;

        let client = test_client(server.base_url());
        let query = SearchQuery {
            search_term: "lease".into(),
            date_from: Some("2024-01-01".into()),
            date_to: Some("2024-12-31".into()),
        };
        let documents = client.search_documents(&query).await.expect("search");

        mock.assert();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, 12);
    }

    #[tokio::test]
    async fn get_document_maps_not_found_to_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/documents/42/");
                then.status(404).json_body(json!({ "detail": "Not found." }));
            })
            .await;

        let client = test_client(server.base_url());
        let document = client.get_document(42).await.expect("request succeeds");
        assert!(document.is_none());
    }

    #[tokio::test]
    async fn get_document_surfaces_unexpected_statuses() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/documents/42/");
                then.status(500).body("boom");
            })
            .await;

        let client = test_client(server.base_url());
        let error = client.get_document(42).await.unwrap_err();
        match error {
            PaperlessError::UnexpectedStatus { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn normalize_base_url_strips_trailing_slash() {
        let normalized = normalize_base_url("http://paperless.local:8000/").expect("url");
        assert_eq!(normalized, "http://paperless.local:8000/");
        assert_eq!(
            format_endpoint(&normalized, "api/tags/"),
            "http://paperless.local:8000/api/tags/"
        );
    }
}
