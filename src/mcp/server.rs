//! MCP server bootstrap and request dispatch.

use std::{borrow::Cow, sync::Arc};

use crate::{
    mcp::{
        handlers::{
            self,
            download::handle_download,
            get::{DocumentIdRequest, handle_get},
            search::{SearchDocumentsRequest, handle_search, validate_search_request},
        },
        registry, schemas,
    },
    paperless::{PaperlessClient, TagCache},
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, ServerCapabilities, ServerInfo,
        Tool, ToolAnnotations,
    },
};

/// MCP server implementation exposing the Paperless document archive.
#[derive(Clone)]
pub struct PaperlessMcpServer {
    client: Arc<PaperlessClient>,
    tags: Arc<TagCache>,
    registry: Arc<registry::Registry>,
}

impl PaperlessMcpServer {
    /// Create a new MCP server around an authenticated client and a populated tag cache.
    ///
    /// The tag cache must be fully built before construction; handlers resolve
    /// tag ids synchronously with no fallback fetch.
    pub fn new(client: Arc<PaperlessClient>, tags: Arc<TagCache>) -> Self {
        let mut registry = registry::Registry::new();
        registry.register_tool("search_documents", tool_search_documents);
        registry.register_tool("get_document", tool_get_document);
        registry.register_tool("download_document", tool_download_document);

        Self {
            client,
            tags,
            registry: Arc::new(registry),
        }
    }

    fn describe_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: Cow::Borrowed("search_documents"),
                title: Some("Search Documents".to_string()),
                description: Some(Cow::Borrowed(
                    "Search Paperless documents with optional date filtering",
                )),
                input_schema: Arc::new(schemas::search_documents_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Search Documents")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("get_document"),
                title: Some("Get Document".to_string()),
                description: Some(Cow::Borrowed(
                    "Get the full contents of the document text, by ID",
                )),
                input_schema: Arc::new(schemas::document_id_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Get Document")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("download_document"),
                title: Some("Download Document".to_string()),
                description: Some(Cow::Borrowed("Download the document, usually as a PDF")),
                input_schema: Arc::new(schemas::document_id_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Download Document")
                        .read_only(true)
                        .idempotent(false)
                        .open_world(false),
                ),
                icons: None,
            },
        ]
    }
}

fn tool_search_documents(
    server: &PaperlessMcpServer,
    request: CallToolRequestParam,
) -> registry::ToolFuture {
    let client = server.client.clone();
    let tags = server.tags.clone();
    Box::pin(async move {
        let args: SearchDocumentsRequest = handlers::parse_arguments(request.arguments)?;
        let query = validate_search_request(args)?;
        Ok(handlers::catch_and_report("search_documents", handle_search(&client, &tags, query))
            .await)
    })
}

fn tool_get_document(
    server: &PaperlessMcpServer,
    request: CallToolRequestParam,
) -> registry::ToolFuture {
    let client = server.client.clone();
    let tags = server.tags.clone();
    Box::pin(async move {
        let args: DocumentIdRequest = handlers::parse_arguments(request.arguments)?;
        Ok(handlers::catch_and_report(
            "get_document",
            handle_get(&client, &tags, args.document_id),
        )
        .await)
    })
}

fn tool_download_document(
    server: &PaperlessMcpServer,
    request: CallToolRequestParam,
) -> registry::ToolFuture {
    let client = server.client.clone();
    Box::pin(async move {
        let args: DocumentIdRequest = handlers::parse_arguments(request.arguments)?;
        Ok(handlers::catch_and_report(
            "download_document",
            handle_download(&client, args.document_id),
        )
        .await)
    })
}

impl ServerHandler for PaperlessMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut implementation = rmcp::model::Implementation::from_build_env();
        implementation.name = "paperless-mcp".to_string();
        implementation.title = Some("Paperless MCP".to_string());
        implementation.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: implementation,
            instructions: Some(
                "Use this server to search a Paperless-ngx document archive. Search for documents by term and date range, fetch a document's full text by ID, or download the original file for the user.".into(),
            ),
            ..ServerInfo::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools = self.describe_tools();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            if let Some(handler) = self.registry.tools.get(request.name.as_ref()) {
                return handler(self, request).await;
            }

            Err(McpError::invalid_params(
                format!("Unknown tool: {}", request.name),
                None,
            ))
        }
    }
}
